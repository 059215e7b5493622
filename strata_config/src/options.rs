//! Recognised options for a single resolution.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::decode::{Decoder, JsonDecoder};

/// Options applied when resolving a value from one source.
///
/// The default options decode JSON. Builder calls are applied in order, so
/// the last decoder supplied wins, and an absent decoder passed to
/// [`Options::decoder_opt`] leaves the current one in place.
///
/// # Examples
///
/// ```
/// use strata_config::Options;
/// use strata_config::decode::{EnvDecoder, IniDecoder};
///
/// #[derive(Default, serde::Serialize, serde::Deserialize)]
/// struct Cfg {
///     port: u16,
/// }
///
/// let options: Options<Cfg> = Options::default()
///     .decoder(IniDecoder)
///     .decoder(EnvDecoder::new())
///     .decoder_opt(None);
/// # let _ = options;
/// ```
pub struct Options<T> {
    decoder: Box<dyn Decoder<T>>,
}

impl<T> Options<T> {
    /// Options decoding with `decoder`.
    ///
    /// Unlike [`Options::default`], this places no serde bounds on `T`,
    /// which suits targets that are only ever filled from the command line
    /// or a custom decoder.
    pub fn with_decoder(decoder: impl Decoder<T> + 'static) -> Self {
        Self {
            decoder: Box::new(decoder),
        }
    }

    /// Replace the decoder.
    #[must_use]
    pub fn decoder(mut self, decoder: impl Decoder<T> + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    /// Replace the decoder when one is supplied.
    #[must_use]
    pub fn decoder_opt(self, decoder: Option<Box<dyn Decoder<T>>>) -> Self {
        match decoder {
            Some(replacement) => Self {
                decoder: replacement,
            },
            None => self,
        }
    }

    pub(crate) fn decoder_ref(&self) -> &dyn Decoder<T> {
        self.decoder.as_ref()
    }
}

impl<T> Default for Options<T>
where
    T: Serialize + DeserializeOwned,
{
    fn default() -> Self {
        Self::with_decoder(JsonDecoder)
    }
}

impl<T> fmt::Debug for Options<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options").finish_non_exhaustive()
    }
}
