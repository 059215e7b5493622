//! Extensions for mapping errors to `ConfigResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(ConfigError::…(e)))`
//! patterns when converting external error types into the crate's
//! `ConfigResult<T>` alias (`Result<T, Arc<ConfigError>>`).
//!
//! # Examples
//!
//! ```
//! use strata_config::{ConfigResult, ConfigResultExt};
//!
//! fn parse() -> ConfigResult<serde_json::Value> {
//!     serde_json::from_str("{\"port\": 8080}").into_config()
//! }
//! # assert!(parse().is_ok());
//! ```

use std::sync::Arc;

use crate::{ConfigError, ConfigResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<ConfigError>`
/// into a `ConfigResult<T>`.
pub trait ConfigResultExt<T, E> {
    /// Convert `Result<T, E>` into `ConfigResult<T>` using `Into<ConfigError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ConfigError>`.
    fn into_config(self) -> ConfigResult<T>;
}

impl<T, E> ConfigResultExt<T, E> for Result<T, E>
where
    E: Into<ConfigError>,
{
    fn into_config(self) -> ConfigResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension tailored to attributing decoder failures to a named format.
pub trait DecodeResultExt<T> {
    /// Convert the error into [`ConfigError::Decode`] tagged with `format`.
    ///
    /// # Errors
    ///
    /// Returns the wrapped decode failure when the input is `Err`.
    fn decode_as(self, format: &'static str) -> ConfigResult<T>;
}

impl<T, E> DecodeResultExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn decode_as(self, format: &'static str) -> ConfigResult<T> {
        self.map_err(|e| Arc::new(ConfigError::decode(format, e)))
    }
}
