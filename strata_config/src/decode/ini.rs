//! Decoding section-based INI text.

use std::io::Read;

use figment::value::{Dict, Value};
use ini::Ini;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Decoder;
use super::layer::{ParsedLayer, insert_path};
use crate::{ConfigResult, DecodeResultExt};

/// Decodes INI text.
///
/// Properties outside any section fill top-level fields. Each `[section]`
/// fills the nested table of the same name, and dotted section names such
/// as `[server.tls]` nest further. Values are treated like environment
/// values: kept verbatim for string fields, converted for numeric and
/// boolean fields, and split on commas for sequence fields.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use strata_config::decode::{Decoder, IniDecoder};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct Server {
///     port: u16,
/// }
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct Cfg {
///     name: String,
///     server: Server,
/// }
///
/// let text = "name = demo\n[server]\nport = 8080\n";
/// let mut cfg = Cfg::default();
/// IniDecoder.decode(&mut text.as_bytes(), &mut cfg).expect("valid ini");
/// assert_eq!((cfg.name.as_str(), cfg.server.port), ("demo", 8080));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct IniDecoder;

impl<T> Decoder<T> for IniDecoder
where
    T: Serialize + DeserializeOwned,
{
    fn decode(&self, mut reader: &mut dyn Read, target: &mut T) -> ConfigResult<()> {
        let document = Ini::read_from(&mut reader).decode_as("ini")?;
        let mut dict = Dict::new();
        for (section, properties) in &document {
            let prefix: Vec<String> = section
                .map(|name| name.split('.').map(str::to_owned).collect())
                .unwrap_or_default();
            for (key, value) in properties {
                let mut path = prefix.clone();
                path.push(key.to_owned());
                insert_path(&mut dict, &path, Value::from(value));
            }
        }
        ParsedLayer::new("ini", dict).apply(target)
    }
}
