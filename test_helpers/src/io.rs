//! Readers with scripted failures and release tracking for exercising stream handling.

use std::io::{self, Cursor, Read};

use crate::counter::CallCounter;

/// Reader whose every read fails with `kind`.
///
/// # Examples
///
/// ```
/// use std::io::{ErrorKind, Read};
/// use test_helpers::io::FailingReader;
///
/// let mut reader = FailingReader::new(ErrorKind::BrokenPipe);
/// let err = reader.read(&mut [0; 4]).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::BrokenPipe);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FailingReader {
    kind: io::ErrorKind,
}

impl FailingReader {
    /// Create a reader failing with `kind`.
    #[must_use]
    pub const fn new(kind: io::ErrorKind) -> Self {
        Self { kind }
    }
}

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(self.kind, "reader configured to fail"))
    }
}

/// In-memory reader that counts releases and can be told to fail them.
#[derive(Debug)]
pub struct TrackedReader {
    data: Cursor<Vec<u8>>,
    releases: CallCounter,
    fail_release: bool,
}

impl TrackedReader {
    /// Serve `data` and record releases on `releases`.
    #[must_use]
    pub fn new(data: impl Into<Vec<u8>>, releases: CallCounter) -> Self {
        Self {
            data: Cursor::new(data.into()),
            releases,
            fail_release: false,
        }
    }

    /// Make [`TrackedReader::finish`] report an error.
    #[must_use]
    pub const fn failing_release(mut self) -> Self {
        self.fail_release = true;
        self
    }

    /// Record the release and report the configured outcome.
    ///
    /// # Errors
    ///
    /// Returns an error when the reader was built with
    /// [`TrackedReader::failing_release`].
    pub fn finish(&self) -> io::Result<()> {
        self.releases.hit();
        if self.fail_release {
            return Err(io::Error::other("release configured to fail"));
        }
        Ok(())
    }
}

impl Read for TrackedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}
