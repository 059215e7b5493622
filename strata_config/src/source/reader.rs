//! Source serving a caller-supplied reader.

use std::borrow::Cow;
use std::io::Read;
use std::sync::Arc;

use super::{ByteStream, Releasable, Source};
use crate::{ConfigError, ConfigResult};

/// Hands over a reader on the first [`Source::provide`] call.
///
/// Later calls fail, because the reader has been consumed.
///
/// # Examples
///
/// ```
/// use strata_config::source::{ReaderSource, Source};
///
/// let mut source = ReaderSource::new(&b"{}"[..]);
/// assert!(source.provide().is_ok());
/// assert!(source.provide().is_err());
/// ```
#[derive(Debug)]
pub struct ReaderSource {
    stream: Option<ByteStream>,
}

impl ReaderSource {
    /// Serve `reader` without a release step.
    pub fn new(reader: impl Read + 'static) -> Self {
        Self {
            stream: Some(ByteStream::new(reader)),
        }
    }

    /// Serve `reader` and release it after decoding.
    pub fn releasing(reader: impl Releasable + 'static) -> Self {
        Self {
            stream: Some(ByteStream::releasing(reader)),
        }
    }

    /// Serve an in-memory document.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            stream: Some(ByteStream::from_bytes(bytes)),
        }
    }
}

impl Source for ReaderSource {
    fn provide(&mut self) -> ConfigResult<ByteStream> {
        self.stream.take().ok_or_else(|| {
            Arc::new(ConfigError::source_failure(
                self.describe(),
                "reader already consumed",
            ))
        })
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("reader")
    }
}
