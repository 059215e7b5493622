//! Error types produced while resolving configuration.

mod aggregate;
mod constructors;
mod conversions;
mod helpers;
mod types;

pub use aggregate::AggregatedErrors;
pub use helpers::is_display_request;
pub use types::{BoxedError, ConfigError};
