//! Derive implementations and their attribute parsing.

pub(crate) mod attrs;
pub(crate) mod crate_path;
pub(crate) mod merge_left;
