//! Source reading a local file.

use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{ByteStream, Source};
use crate::{ConfigError, ConfigResult};

/// Opens a file on every [`Source::provide`] call.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this source opens.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Source for FileSource {
    fn provide(&mut self) -> ConfigResult<ByteStream> {
        let file = File::open(&self.path)
            .map_err(|e| Arc::new(ConfigError::source_failure(self.describe(), e)))?;
        Ok(ByteStream::new(file))
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Owned(format!("file '{}'", self.path.display()))
    }
}
