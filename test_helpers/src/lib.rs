//! Test helpers shared across the strata-config workspace.
//!
//! - [`env`] serialises process environment mutation behind RAII guards.
//! - [`io`] provides readers that fail on demand and streams that record
//!   whether they were released.
//! - [`counter`] provides a cloneable call counter for asserting that a
//!   candidate was, or was not, invoked.

pub mod counter;
pub mod env;
pub mod io;
