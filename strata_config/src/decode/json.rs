//! JSON decoding layered over the target's current contents.

use std::io::Read;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::Decoder;
use crate::{ConfigError, ConfigResult, ConfigResultExt};

/// Decodes a JSON document.
///
/// The document is overlaid on the serialised target: objects merge key by
/// key, any other value replaces what was there. Keys absent from the
/// document therefore keep the target's existing values. Only the first
/// JSON value in the stream is read; anything after it is ignored.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use strata_config::decode::{Decoder, JsonDecoder};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct Cfg {
///     name: String,
///     port: u16,
/// }
///
/// let mut cfg = Cfg { name: "kept".into(), port: 1 };
/// JsonDecoder.decode(&mut &br#"{"port": 8080}"#[..], &mut cfg).expect("valid json");
/// assert_eq!((cfg.name.as_str(), cfg.port), ("kept", 8080));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonDecoder;

impl<T> Decoder<T> for JsonDecoder
where
    T: Serialize + DeserializeOwned,
{
    fn decode(&self, reader: &mut dyn Read, target: &mut T) -> ConfigResult<()> {
        let layer = serde_json::Deserializer::from_reader(reader)
            .into_iter::<Value>()
            .next()
            .ok_or_else(|| Arc::new(ConfigError::decode("json", "empty document")))?
            .into_config()?;
        let mut base = serde_json::to_value(&*target).into_config()?;
        merge_value(&mut base, layer);
        *target = serde_json::from_value(base).into_config()?;
        Ok(())
    }
}

/// Merge a JSON `layer` into `target`.
///
/// Objects merge recursively; any other value replaces the existing one.
///
/// # Examples
///
/// ```rust
/// use strata_config::decode::merge_value;
/// use serde_json::json;
///
/// let mut acc = json!({"a": 1, "b": {"x": 1}});
/// merge_value(&mut acc, json!({"b": {"y": 2}, "c": 3}));
/// assert_eq!(acc, json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3}));
///
/// // Arrays replace existing values.
/// merge_value(&mut acc, json!({"b": [1, 2, 3]}));
/// assert_eq!(acc["b"], json!([1, 2, 3]));
/// ```
pub fn merge_value(target: &mut Value, layer: Value) {
    match layer {
        Value::Object(map) => merge_object(target, map),
        _ => *target = layer,
    }
}

fn merge_object(target: &mut Value, map: Map<String, Value>) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(existing) = target {
        for (key, value) in map {
            match existing.get_mut(&key) {
                Some(slot) => merge_value(slot, value),
                None => {
                    existing.insert(key, value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the JSON decoder.

    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Db {
        host: String,
        port: u16,
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Cfg {
        name: String,
        tags: Vec<String>,
        db: Db,
    }

    fn decode(raw: &str, target: &mut Cfg) -> Result<()> {
        JsonDecoder
            .decode(&mut raw.as_bytes(), target)
            .map_err(|e| anyhow!("{e}"))
    }

    #[rstest]
    fn decodes_into_default_target() -> Result<()> {
        let mut cfg = Cfg::default();
        decode(r#"{"name":"svc","db":{"host":"h","port":5}}"#, &mut cfg)?;
        ensure!(cfg.name == "svc");
        ensure!(cfg.db == Db { host: "h".into(), port: 5 });
        Ok(())
    }

    #[rstest]
    fn nested_objects_keep_unmentioned_keys() -> Result<()> {
        let mut cfg = Cfg {
            db: Db {
                host: "kept".into(),
                port: 1,
            },
            ..Cfg::default()
        };
        decode(r#"{"db":{"port":2}}"#, &mut cfg)?;
        ensure!(cfg.db == Db { host: "kept".into(), port: 2 });
        Ok(())
    }

    #[rstest]
    fn arrays_replace() -> Result<()> {
        let mut cfg = Cfg {
            tags: vec!["old".into(), "older".into()],
            ..Cfg::default()
        };
        decode(r#"{"tags":["new"]}"#, &mut cfg)?;
        ensure!(cfg.tags == vec!["new".to_owned()]);
        Ok(())
    }

    #[rstest]
    #[case::syntax("{")]
    #[case::type_mismatch(r#"{"db":{"port":"many"}}"#)]
    #[case::empty("")]
    #[case::blank("  \n")]
    fn malformed_input_is_a_decode_failure(#[case] raw: &str) {
        let mut cfg = Cfg::default();
        let err = JsonDecoder.decode(&mut raw.as_bytes(), &mut cfg).err();
        assert!(matches!(
            err.as_deref(),
            Some(crate::ConfigError::Decode { format: "json", .. })
        ));
    }

    #[rstest]
    #[case::garbage(r#"{"name":"first"} trailing"#)]
    #[case::second_document(r#"{"name":"first"} {"name":"second"}"#)]
    fn only_the_first_value_is_read(#[case] raw: &str) -> Result<()> {
        let mut cfg = Cfg::default();
        decode(raw, &mut cfg)?;
        ensure!(cfg.name == "first");
        Ok(())
    }

    #[rstest]
    fn scalar_layer_replaces_object() {
        let mut value = json!({"a": 1});
        merge_value(&mut value, json!(3));
        assert_eq!(value, json!(3));
    }
}
