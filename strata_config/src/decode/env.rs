//! Decoding environment variables into a structured target.

use std::env;
use std::io::Read;

use figment::value::{Dict, Value};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Decoder;
use super::layer::{ParsedLayer, insert_path};
use crate::ConfigResult;

/// Decodes environment variables.
///
/// The stream is expected to hold a JSON object of strings, as produced by
/// [`crate::source::EnvSource`]. When it cannot be read or is not such an
/// object, the live process environment is used instead, which makes the
/// decoder usable with [`crate::source::NoSource`].
///
/// Keys are lower-cased by default so `PORT` fills a `port` field. With
/// [`EnvDecoder::prefixed`] only keys starting with the prefix (compared
/// case-insensitively) are used, with the prefix removed. With
/// [`EnvDecoder::split`] keys are nested on the separator, so
/// `DB__HOST` fills `db.host`. Values reach string fields unchanged, are
/// converted for numeric and boolean fields, and are split on commas for
/// sequence fields.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use strata_config::decode::{Decoder, EnvDecoder};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct Db {
///     host: String,
/// }
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct Cfg {
///     db: Db,
///     hosts: Vec<String>,
/// }
///
/// let env = br#"{"APP_DB__HOST": "db.local", "APP_HOSTS": "a,b", "OTHER": "x"}"#;
/// let mut cfg = Cfg::default();
/// EnvDecoder::prefixed("APP_")
///     .split("__")
///     .decode(&mut &env[..], &mut cfg)
///     .expect("valid environment");
/// assert_eq!(cfg.db.host, "db.local");
/// assert_eq!(cfg.hosts, ["a", "b"]);
/// ```
#[derive(Clone, Debug)]
pub struct EnvDecoder {
    prefix: Option<String>,
    separator: Option<String>,
    lowercase: bool,
}

impl Default for EnvDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvDecoder {
    /// Use every variable, lower-casing keys.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prefix: None,
            separator: None,
            lowercase: true,
        }
    }

    /// Use only variables starting with `prefix`.
    #[must_use]
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::new()
        }
    }

    /// Nest keys on `separator`.
    #[must_use]
    pub fn split(mut self, separator: impl Into<String>) -> Self {
        let sep: String = separator.into();
        self.separator = Some(sep).filter(|s| !s.is_empty());
        self
    }

    /// Keep keys in their original case.
    #[must_use]
    pub const fn preserve_case(mut self) -> Self {
        self.lowercase = false;
        self
    }

    fn variables(reader: &mut dyn Read) -> Vec<(String, String)> {
        let mut raw = Vec::new();
        let parsed = reader
            .read_to_end(&mut raw)
            .ok()
            .and_then(|_| serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(&raw).ok());
        match parsed {
            Some(map) => map
                .into_iter()
                .filter_map(|(key, value)| match value {
                    serde_json::Value::String(s) => Some((key, s)),
                    _ => None,
                })
                .collect(),
            None => {
                tracing::debug!("stream holds no environment object; reading process environment");
                env::vars_os()
                    .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                    .collect()
            }
        }
    }

    /// Map a variable name to its key path, or `None` when it is not used.
    fn key_path(&self, name: &str) -> Option<Vec<String>> {
        let stripped = match &self.prefix {
            Some(prefix) => name
                .get(..prefix.len())
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .and_then(|_| name.get(prefix.len()..))?,
            None => name,
        };
        if stripped.is_empty() {
            return None;
        }
        let key = if self.lowercase {
            stripped.to_lowercase()
        } else {
            stripped.to_owned()
        };
        let path: Vec<String> = match &self.separator {
            Some(sep) => key.split(sep.as_str()).map(str::to_owned).collect(),
            None => vec![key],
        };
        if path.iter().any(String::is_empty) {
            return None;
        }
        Some(path)
    }
}

impl<T> Decoder<T> for EnvDecoder
where
    T: Serialize + DeserializeOwned,
{
    fn decode(&self, reader: &mut dyn Read, target: &mut T) -> ConfigResult<()> {
        let mut dict = Dict::new();
        for (name, value) in Self::variables(reader) {
            if let Some(path) = self.key_path(&name) {
                insert_path(&mut dict, &path, Value::from(value));
            }
        }
        ParsedLayer::new("environment", dict).apply(target)
    }
}
