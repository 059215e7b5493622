//! Decoders populating a target value from configuration bytes.
//!
//! A [`Decoder`] reads everything it needs from the supplied reader and
//! writes into a target that starts out as the type's default. Decoders may
//! leave the target partially written when they fail; callers must not
//! assume a rollback.

use std::io::Read;

use crate::ConfigResult;

mod cmdline;
mod env;
mod fallback;
mod ini;
mod json;
mod layer;

pub use cmdline::CmdlineDecoder;
pub use env::EnvDecoder;
pub use fallback::FallbackDecoder;
pub use ini::IniDecoder;
pub use json::{JsonDecoder, merge_value};

/// Capability populating a `T` from a byte stream.
///
/// Closures of the form `Fn(&mut dyn Read, &mut T) -> ConfigResult<()>`
/// implement the trait directly:
///
/// ```
/// use std::io::Read;
/// use strata_config::decode::Decoder;
/// use strata_config::{ConfigResult, ConfigResultExt};
///
/// let upper = |reader: &mut dyn Read, target: &mut String| -> ConfigResult<()> {
///     reader.read_to_string(target).into_config()?;
///     target.make_ascii_uppercase();
///     Ok(())
/// };
/// let mut out = String::new();
/// upper.decode(&mut &b"abc"[..], &mut out).expect("decodes");
/// assert_eq!(out, "ABC");
/// ```
pub trait Decoder<T> {
    /// Read `reader` and write the decoded configuration into `target`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ConfigError`] when the bytes cannot be read or do
    /// not describe a valid `T`.
    fn decode(&self, reader: &mut dyn Read, target: &mut T) -> ConfigResult<()>;
}

impl<T, F> Decoder<T> for F
where
    F: Fn(&mut dyn Read, &mut T) -> ConfigResult<()>,
{
    fn decode(&self, reader: &mut dyn Read, target: &mut T) -> ConfigResult<()> {
        self(reader, target)
    }
}
