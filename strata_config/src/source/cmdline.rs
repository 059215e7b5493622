//! Source joining command-line arguments.

use std::borrow::Cow;

use super::{ByteStream, Source};
use crate::ConfigResult;

/// Separator placed between arguments, and split on by
/// [`crate::decode::CmdlineDecoder`].
pub const CMDLINE_SEPARATOR: &str = " ";

/// Provides the arguments after the program name, joined by
/// [`CMDLINE_SEPARATOR`].
///
/// Arguments are captured when [`Source::provide`] runs, unless explicit
/// arguments were supplied with [`CmdlineSource::from_args`].
#[derive(Clone, Debug, Default)]
pub struct CmdlineSource {
    args: Option<Vec<String>>,
}

impl CmdlineSource {
    /// Read the process arguments.
    #[must_use]
    pub const fn new() -> Self {
        Self { args: None }
    }

    /// Use `args` instead of the process arguments. The program name must
    /// not be included.
    pub fn from_args<I, A>(args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            args: Some(args.into_iter().map(Into::into).collect()),
        }
    }
}

impl Source for CmdlineSource {
    fn provide(&mut self) -> ConfigResult<ByteStream> {
        let joined = match &self.args {
            Some(args) => args.join(CMDLINE_SEPARATOR),
            None => std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(CMDLINE_SEPARATOR),
        };
        Ok(ByteStream::from_bytes(joined))
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("command line")
    }
}
