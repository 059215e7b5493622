//! Layered configuration resolution.
//!
//! Configuration is resolved from one or more [`source::Source`]s, each
//! paired with a [`decode::Decoder`] through [`Options`]. A single pair is
//! resolved with [`new`] or merged into an existing value with [`fill`];
//! several pairs are combined by [`Multi`], either taking the first that
//! resolves ([`Multi::one_of`]) or merging all of them with earlier sources
//! taking precedence ([`Multi::all_of`]).
//!
//! Merging follows [`MergeLeft`]: the left value wins unless it is the zero
//! value for its type. Structs derive the field walk with
//! `#[derive(MergeLeft)]`.
//!
//! ```no_run
//! use clap::Parser;
//! use serde::{Deserialize, Serialize};
//! use strata_config::decode::{CmdlineDecoder, EnvDecoder};
//! use strata_config::source::{CmdlineSource, EnvSource, FileSource};
//! use strata_config::{MergeLeft, Multi, Options};
//!
//! #[derive(Debug, Default, Parser, Serialize, Deserialize, MergeLeft)]
//! struct AppConfig {
//!     #[arg(long)]
//!     pub name: Option<String>,
//!     #[arg(long)]
//!     pub port: Option<u16>,
//! }
//!
//! let cfg: AppConfig = Multi::new()
//!     .add(CmdlineSource::new(), Options::with_decoder(CmdlineDecoder))
//!     .add(EnvSource::new(), Options::with_decoder(EnvDecoder::prefixed("APP_")))
//!     .add(FileSource::new("app.json"), Options::default())
//!     .all_of()?;
//! # let _ = cfg;
//! # Ok::<(), std::sync::Arc<strata_config::ConfigError>>(())
//! ```

extern crate self as strata_config;

use std::sync::Arc;

pub use strata_config_macros::MergeLeft;

pub mod decode;
mod error;
mod merge;
mod multi;
mod options;
mod resolve;
mod result_ext;
pub mod source;

pub use error::{AggregatedErrors, BoxedError, ConfigError, is_display_request};
pub use merge::{MergeLeft, merge_left};
pub use multi::Multi;
pub use options::Options;
pub use resolve::{fill, new};
pub use result_ext::{ConfigResultExt, DecodeResultExt};

/// Result type used throughout the crate.
///
/// Errors are shared so combinators can keep every failure they record.
pub type ConfigResult<T> = Result<T, Arc<ConfigError>>;
