//! Trait-based conversions between external error types and `ConfigError`.

use figment::Error as FigmentError;

use super::ConfigError;

/// Convert JSON encoding or decoding failures into
/// [`ConfigError::Decode`].
impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::decode("json", e)
    }
}

impl From<clap::Error> for ConfigError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(e.into())
    }
}

impl From<FigmentError> for ConfigError {
    fn from(e: FigmentError) -> Self {
        Self::Gathering(e.into())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Read(e)
    }
}
