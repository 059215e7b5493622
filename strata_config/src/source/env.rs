//! Source serialising the process environment.

use std::borrow::Cow;
use std::env;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::{ByteStream, Source};
use crate::{ConfigError, ConfigResult};

/// Key under which the machine hostname is always provided.
pub const HOSTNAME_KEY: &str = "HOSTNAME";

/// Options controlling how [`EnvSource`] renders the environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnvOptions {
    /// Replace `$VAR` and `${VAR}` in values with the current values of those
    /// variables. Unknown variables expand to the empty string.
    pub expand_env: bool,

    /// Lower-case every key, including [`HOSTNAME_KEY`].
    pub key_to_lowercase: bool,
}

/// Provides the process environment as a JSON object of strings.
///
/// The machine hostname is inserted under [`HOSTNAME_KEY`] before the real
/// environment is read, so an exported `HOSTNAME` variable takes precedence.
/// Variables whose name or value is not valid Unicode are skipped.
///
/// ```text
/// FOO=bar
/// BUZ=foo
/// // becomes
/// {"HOSTNAME": "<machine>", "FOO": "bar", "BUZ": "foo"}
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvSource {
    options: EnvOptions,
}

impl EnvSource {
    /// Provide the environment verbatim.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            options: EnvOptions {
                expand_env: false,
                key_to_lowercase: false,
            },
        }
    }

    /// Provide the environment transformed according to `options`.
    #[must_use]
    pub const fn with_options(options: EnvOptions) -> Self {
        Self { options }
    }

    fn key(&self, raw: &str) -> String {
        if self.options.key_to_lowercase {
            raw.to_lowercase()
        } else {
            raw.to_owned()
        }
    }

    fn value(&self, raw: String) -> String {
        if !self.options.expand_env {
            return raw;
        }
        shellexpand::env_with_context_no_errors(&raw, |name| {
            Some(env::var(name).unwrap_or_default())
        })
        .into_owned()
    }

    fn collect(&self) -> ConfigResult<Map<String, Value>> {
        let hostname = hostname::get()
            .map_err(|e| Arc::new(ConfigError::source_failure("hostname", e)))?;
        let mut map = Map::new();
        map.insert(
            self.key(HOSTNAME_KEY),
            Value::String(hostname.to_string_lossy().into_owned()),
        );
        for (raw_key, raw_value) in env::vars_os() {
            let (Ok(key), Ok(value)) = (raw_key.into_string(), raw_value.into_string()) else {
                continue;
            };
            map.insert(self.key(&key), Value::String(self.value(value)));
        }
        Ok(map)
    }
}

impl Source for EnvSource {
    fn provide(&mut self) -> ConfigResult<ByteStream> {
        let map = self.collect()?;
        let bytes = serde_json::to_vec(&map)
            .map_err(|e| Arc::new(ConfigError::source_failure(self.describe(), e)))?;
        Ok(ByteStream::from_bytes(bytes))
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("environment")
    }
}
