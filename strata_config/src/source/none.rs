//! Source that never yields data.

use std::borrow::Cow;
use std::io::{self, Read};

use super::{ByteStream, Source};
use crate::ConfigResult;

/// Provides a stream whose first read fails with
/// [`io::ErrorKind::UnexpectedEof`].
///
/// Pair it with a decoder that has its own fallback, such as
/// [`crate::decode::EnvDecoder`] reading the live process environment, to
/// resolve configuration without any byte source.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSource;

struct EndOfData;

impl Read for EndOfData {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no configuration source",
        ))
    }
}

impl Source for NoSource {
    fn provide(&mut self) -> ConfigResult<ByteStream> {
        Ok(ByteStream::new(EndOfData))
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("no source")
    }
}
