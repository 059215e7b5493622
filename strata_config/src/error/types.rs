//! Primary error enum for configuration resolution flows.

use std::error::Error;
use std::sync::Arc;

use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;

/// Boxed error reported by a source, decoder or stream.
pub type BoxedError = Box<dyn Error + Send + Sync>;

/// Errors that can occur while resolving configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A source could not produce a byte stream.
    #[error("provide config from {source_name}: {cause}")]
    Source {
        /// Human-readable description of the failing source.
        source_name: String,
        /// Underlying failure.
        #[source]
        cause: BoxedError,
    },

    /// A decoder could not populate the target value.
    #[error("decode {format} config: {cause}")]
    Decode {
        /// Name of the format the decoder understands.
        format: &'static str,
        /// Underlying failure.
        #[source]
        cause: BoxedError,
    },

    /// Releasing an acquired byte stream failed.
    #[error("release stream: {0}")]
    Release(#[source] std::io::Error),

    /// Reading the byte stream failed before decoding could start.
    #[error("read stream: {0}")]
    Read(#[source] std::io::Error),

    /// A combinator slot was never supplied.
    #[error("absent candidate at position {position}")]
    AbsentCandidate {
        /// Zero-based slot index.
        position: usize,
    },

    /// A failure attributed to one candidate of a combinator.
    #[error("candidate {position}: {source}")]
    Candidate {
        /// Zero-based slot index.
        position: usize,
        /// Failure reported by that candidate.
        #[source]
        source: Arc<ConfigError>,
    },

    /// Error parsing command-line tokens.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// Error while extracting a value from a figment of decoded data.
    #[error("Failed to gather configuration: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// Several failures joined together, in the order they occurred.
    #[error("multiple configuration errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
