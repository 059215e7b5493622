//! Decoding command-line tokens with `clap`.

use std::io::Read;
use std::iter;
use std::sync::Arc;

use clap::Parser;

use super::Decoder;
use crate::source::CMDLINE_SEPARATOR;
use crate::{ConfigError, ConfigResult, ConfigResultExt, is_display_request};

/// Parses the stream as command-line arguments for a [`clap::Parser`].
///
/// The stream is split on [`CMDLINE_SEPARATOR`] with empty tokens dropped,
/// the command's name is prepended as the program name, and the parsed
/// matches update the target in place. Arguments are therefore unable to
/// contain spaces.
///
/// A `--help` or `--version` request prints the rendered text to standard
/// output and terminates the process with a success status.
///
/// # Examples
///
/// ```
/// use clap::Parser;
/// use strata_config::decode::{CmdlineDecoder, Decoder};
///
/// #[derive(Default, Parser)]
/// struct Cli {
///     #[arg(long)]
///     name: Option<String>,
/// }
///
/// let mut cli = Cli::default();
/// CmdlineDecoder.decode(&mut &b"--name demo"[..], &mut cli).expect("valid arguments");
/// assert_eq!(cli.name.as_deref(), Some("demo"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CmdlineDecoder;

impl<T: Parser> Decoder<T> for CmdlineDecoder {
    fn decode(&self, reader: &mut dyn Read, target: &mut T) -> ConfigResult<()> {
        let mut line = String::new();
        reader.read_to_string(&mut line).into_config()?;

        let command = T::command();
        let program = command.get_name().to_owned();
        let tokens = line
            .split(CMDLINE_SEPARATOR)
            .filter(|token| !token.is_empty())
            .map(str::to_owned);

        let matches = match command.try_get_matches_from(iter::once(program).chain(tokens)) {
            Ok(matches) => matches,
            Err(err) if is_display_request(&err) => err.exit(),
            Err(err) => return Err(Arc::new(ConfigError::from(err))),
        };
        target.update_from_arg_matches(&matches).into_config()
    }
}
