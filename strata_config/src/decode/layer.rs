//! Flat key/value layers extracted through `figment`.
//!
//! Environment and INI data arrive as strings and are kept that way, so a
//! `String` field receives `8080` or `a,b` verbatim. Extraction is lossy:
//! a string becomes a number or a bool only where the target field asks for
//! one. A string aimed at a field whose current value serialises as a
//! sequence is split on commas first, unless it is a JSON array. The
//! resulting dictionary is merged over the serialised target so that keys
//! the layer does not mention keep their current values.

use figment::providers::Serialized;
use figment::value::{Dict, Map, Tag, Value};
use figment::{Figment, Metadata, Profile, Provider};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ConfigResult, ConfigResultExt};

/// Provider serving a prebuilt dictionary under the default profile.
pub(crate) struct ParsedLayer {
    name: &'static str,
    dict: Dict,
}

impl ParsedLayer {
    pub(crate) const fn new(name: &'static str, dict: Dict) -> Self {
        Self { name, dict }
    }

    /// Merge this layer over `target`, replacing it with the result.
    pub(crate) fn apply<T>(mut self, target: &mut T) -> ConfigResult<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let shape = Value::serialize(&*target).into_config()?;
        split_lists(&mut self.dict, shape.as_dict());
        let merged: T = Figment::from(Serialized::defaults(&*target))
            .merge(self)
            .extract_lossy()
            .into_config()?;
        *target = merged;
        Ok(())
    }
}

impl Provider for ParsedLayer {
    fn metadata(&self) -> Metadata {
        Metadata::named(self.name)
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Ok(Profile::Default.collect(self.dict.clone()))
    }
}

/// Turn strings aimed at sequence fields into arrays.
///
/// `shape` is the serialised target at the same depth as `dict`. Keys the
/// shape does not know, or knows as anything other than an array, are left
/// alone.
fn split_lists(dict: &mut Dict, shape: Option<&Dict>) {
    for (key, value) in dict.iter_mut() {
        let expected = shape.and_then(|s| s.get(key));
        let replacement = match value {
            Value::Dict(_, child) => {
                split_lists(child, expected.and_then(Value::as_dict));
                None
            }
            Value::String(_, raw) if matches!(expected, Some(Value::Array(..))) => {
                Some(parse_list(raw))
            }
            _ => None,
        };
        if let Some(list) = replacement {
            *value = list;
        }
    }
}

/// Parse a raw string destined for a sequence.
///
/// A JSON array is used as written; anything else is split on commas with
/// surrounding whitespace trimmed. Blank text is an empty list.
fn parse_list(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.starts_with('[')
        && let Ok(json @ serde_json::Value::Array(_)) = serde_json::from_str(trimmed)
        && let Ok(array) = Value::serialize(json)
    {
        return array;
    }
    trimmed
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| Value::from(item.to_owned()))
        .collect::<Vec<_>>()
        .into()
}

/// Insert `value` at `path`, creating intermediate tables as needed.
///
/// A scalar already occupying an intermediate position is replaced by a
/// table.
pub(crate) fn insert_path(dict: &mut Dict, path: &[String], value: Value) {
    match path {
        [] => {}
        [last] => {
            dict.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            let entry = dict
                .entry(head.clone())
                .or_insert_with(|| Value::Dict(Tag::Default, Dict::new()));
            if !matches!(entry, Value::Dict(..)) {
                *entry = Value::Dict(Tag::Default, Dict::new());
            }
            if let Value::Dict(_, child) = entry {
                insert_path(child, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for list splitting, nesting and lossy extraction.

    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use serde::Deserialize;

    fn strings(value: Value) -> Option<Vec<String>> {
        value
            .into_array()
            .map(|a| a.into_iter().filter_map(Value::into_string).collect())
    }

    #[rstest]
    #[case::comma_list("x, y", &["x", "y"])]
    #[case::single("x", &["x"])]
    #[case::blank("  ", &[])]
    #[case::json_array(r#"["a,b", "c"]"#, &["a,b", "c"])]
    #[case::broken_json("[a, b", &["[a", "b"])]
    fn lists_are_parsed(#[case] raw: &str, #[case] expected: &[&str]) {
        let want: Vec<String> = expected.iter().map(|s| (*s).to_owned()).collect();
        assert_eq!(strings(parse_list(raw)), Some(want));
    }

    #[rstest]
    fn only_sequence_fields_are_split() {
        let mut shape = Dict::new();
        shape.insert("tags".into(), Value::from(Vec::<String>::new()));
        shape.insert("name".into(), Value::from(String::new()));
        let mut dict = Dict::new();
        dict.insert("tags".into(), Value::from("a,b"));
        dict.insert("name".into(), Value::from("a,b"));
        dict.insert("unknown".into(), Value::from("a,b"));
        split_lists(&mut dict, Some(&shape));
        assert_eq!(
            dict.get("tags").cloned().and_then(strings),
            Some(vec!["a".to_owned(), "b".to_owned()])
        );
        assert_eq!(dict.get("name").and_then(Value::as_str), Some("a,b"));
        assert_eq!(dict.get("unknown").and_then(Value::as_str), Some("a,b"));
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Typed {
        label: String,
        port: u16,
        enabled: bool,
        ids: Vec<u32>,
        note: Option<String>,
    }

    fn layer(pairs: &[(&str, &str)]) -> ParsedLayer {
        let dict = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), Value::from(*v)))
            .collect();
        ParsedLayer::new("test", dict)
    }

    #[rstest]
    #[case::digits("8080")]
    #[case::boolean("true")]
    #[case::leading_zero("007")]
    #[case::comma("a,b")]
    fn strings_reach_string_fields_verbatim(#[case] raw: &str) -> Result<()> {
        let mut target = Typed::default();
        layer(&[("label", raw), ("note", raw)])
            .apply(&mut target)
            .map_err(|e| anyhow!("{e}"))?;
        ensure!(target.label == raw);
        ensure!(target.note.as_deref() == Some(raw));
        Ok(())
    }

    #[rstest]
    fn strings_convert_where_the_target_asks() -> Result<()> {
        let mut target = Typed::default();
        layer(&[("port", "8080"), ("enabled", "true"), ("ids", "1, 2")])
            .apply(&mut target)
            .map_err(|e| anyhow!("{e}"))?;
        ensure!(target.port == 8080);
        ensure!(target.enabled);
        ensure!(target.ids == vec![1, 2]);
        Ok(())
    }

    #[rstest]
    fn nested_paths_share_tables() {
        let mut dict = Dict::new();
        insert_path(&mut dict, &["db".into(), "host".into()], Value::from("h"));
        insert_path(&mut dict, &["db".into(), "port".into()], Value::from(5_u16));
        let db = dict.get("db").and_then(Value::as_dict);
        assert_eq!(db.map(Dict::len), Some(2));
    }

    #[rstest]
    fn scalars_give_way_to_tables() {
        let mut dict = Dict::new();
        insert_path(&mut dict, &["a".into()], Value::from("flat"));
        insert_path(&mut dict, &["a".into(), "b".into()], Value::from("deep"));
        assert!(dict.get("a").and_then(Value::as_dict).is_some());
    }
}
