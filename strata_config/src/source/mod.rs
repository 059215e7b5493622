//! Byte-stream sources.
//!
//! A [`Source`] produces a [`ByteStream`] holding configuration data, or
//! fails. Streams may carry a release obligation; the resolution primitive
//! always releases a stream after decoding, whether decoding succeeded or
//! not, and reports release failures alongside any decode failure.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Cursor, Read};

use crate::ConfigResult;

mod cmdline;
mod env;
mod fallback;
mod file;
mod kv;
mod none;
mod reader;

#[cfg(feature = "consul")]
mod consul;

pub use cmdline::{CMDLINE_SEPARATOR, CmdlineSource};
#[cfg(feature = "consul")]
pub use consul::ConsulKv;
pub use env::{EnvOptions, EnvSource, HOSTNAME_KEY};
pub use fallback::FallbackSource;
pub use file::FileSource;
pub use kv::{KvSource, KvStore, MemoryKv};
pub use none::NoSource;
pub use reader::ReaderSource;

/// Capability producing configuration bytes.
pub trait Source {
    /// Acquire a byte stream.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ConfigError`] when the data cannot be obtained, for
    /// example a missing file or an absent remote key.
    fn provide(&mut self) -> ConfigResult<ByteStream>;

    /// Human-readable description used in diagnostics.
    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn provide(&mut self) -> ConfigResult<ByteStream> {
        (**self).provide()
    }

    fn describe(&self) -> Cow<'_, str> {
        (**self).describe()
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn provide(&mut self) -> ConfigResult<ByteStream> {
        (**self).provide()
    }

    fn describe(&self) -> Cow<'_, str> {
        (**self).describe()
    }
}

/// Reader that must be explicitly released once decoding is finished.
pub trait Releasable: Read {
    /// Release the underlying resource.
    ///
    /// # Errors
    ///
    /// Returns the I/O error reported while releasing.
    fn release(self: Box<Self>) -> io::Result<()>;
}

enum StreamInner {
    Plain(Box<dyn Read>),
    Releasable(Box<dyn Releasable>),
}

/// Configuration bytes handed from a [`Source`] to a decoder.
pub struct ByteStream {
    inner: StreamInner,
}

impl ByteStream {
    /// Wrap a reader that needs no release step.
    pub fn new(reader: impl Read + 'static) -> Self {
        Self {
            inner: StreamInner::Plain(Box::new(reader)),
        }
    }

    /// Wrap a reader whose [`Releasable::release`] must run after decoding.
    pub fn releasing(reader: impl Releasable + 'static) -> Self {
        Self {
            inner: StreamInner::Releasable(Box::new(reader)),
        }
    }

    /// Serve an in-memory buffer.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(Cursor::new(bytes.into()))
    }

    /// Returns `true` when the stream carries a release obligation.
    #[must_use]
    pub const fn needs_release(&self) -> bool {
        matches!(self.inner, StreamInner::Releasable(_))
    }

    /// Consume the stream, running its release step if it has one.
    ///
    /// # Errors
    ///
    /// Returns the I/O error reported by [`Releasable::release`].
    pub fn release(self) -> io::Result<()> {
        match self.inner {
            StreamInner::Plain(_) => Ok(()),
            StreamInner::Releasable(reader) => reader.release(),
        }
    }
}

impl Read for ByteStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            StreamInner::Plain(reader) => reader.read(buf),
            StreamInner::Releasable(reader) => reader.read(buf),
        }
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStream")
            .field("needs_release", &self.needs_release())
            .finish_non_exhaustive()
    }
}
