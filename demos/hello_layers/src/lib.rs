//! Greeting settings resolved from layered sources.
//!
//! Precedence, highest first: command line, `HELLO_*` environment
//! variables, the first readable settings file, built-in defaults.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde::{Deserialize, Serialize};
use strata_config::decode::{CmdlineDecoder, EnvDecoder, FallbackDecoder, IniDecoder, JsonDecoder};
use strata_config::source::{CmdlineSource, EnvSource, FallbackSource, FileSource, ReaderSource};
use strata_config::{ConfigError, MergeLeft, Multi, Options};

/// Environment variable naming an explicit settings file.
pub const CONFIG_PATH_ENV: &str = "HELLO_CONFIG";

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "hello_layers.json";

const DEFAULTS: &str = r#"{"salutation": "Hello", "recipient": "World"}"#;

/// Errors raised by the demo.
#[derive(Debug, thiserror::Error)]
pub enum HelloError {
    /// Settings could not be resolved.
    #[error("failed to resolve settings: {0}")]
    Config(#[from] Arc<ConfigError>),

    /// The greeting could not be written.
    #[error("failed to write greeting: {0}")]
    Io(#[from] std::io::Error),
}

/// Greeting settings.
#[derive(Debug, Default, PartialEq, Eq, Parser, Serialize, Deserialize, MergeLeft)]
#[command(name = "hello-layers", version, about = "Greets someone using layered settings")]
pub struct Settings {
    /// Who to greet.
    #[arg(long)]
    pub recipient: Option<String>,

    /// Greeting word.
    #[arg(long)]
    pub salutation: Option<String>,

    /// End with an exclamation mark.
    #[arg(long)]
    pub excited: bool,
}

impl Settings {
    /// Render the greeting line.
    #[must_use]
    pub fn greeting(&self) -> String {
        let salutation = self.salutation.as_deref().unwrap_or("Hello");
        let recipient = self.recipient.as_deref().unwrap_or("World");
        let mark = if self.excited { '!' } else { '.' };
        format!("{salutation}, {recipient}{mark}")
    }
}

/// Settings files tried in order: `$HELLO_CONFIG` when set, then
/// [`DEFAULT_CONFIG_FILE`], then the built-in defaults.
fn file_layer() -> FallbackSource {
    let explicit = std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .map(|path| Box::new(FileSource::new(path)) as Box<dyn strata_config::source::Source>);
    FallbackSource::new()
        .or_absent(explicit)
        .or(FileSource::new(DEFAULT_CONFIG_FILE))
        .or(ReaderSource::from_bytes(DEFAULTS))
}

/// Settings files may be JSON or INI.
fn file_options() -> Options<Settings> {
    Options::with_decoder(FallbackDecoder::new().or(JsonDecoder).or(IniDecoder))
}

/// Build the layered resolver over `args` (program name excluded).
pub fn resolver<I, A>(args: I) -> Multi<Settings>
where
    I: IntoIterator<Item = A>,
    A: Into<String>,
{
    Multi::new()
        .add(
            CmdlineSource::from_args(args),
            Options::with_decoder(CmdlineDecoder),
        )
        .add(
            EnvSource::new(),
            Options::with_decoder(EnvDecoder::prefixed("HELLO_")),
        )
        .add(file_layer(), file_options())
}

/// Resolve settings for the current process.
///
/// # Errors
///
/// Returns [`HelloError::Config`] when any layer fails to resolve.
pub fn load() -> Result<Settings, HelloError> {
    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());
    Ok(resolver(args).all_of()?)
}
