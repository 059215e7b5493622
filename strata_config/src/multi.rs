//! Resolving one value from several sources.

use std::fmt;
use std::sync::Arc;

use crate::options::Options;
use crate::resolve::decode_into;
use crate::source::Source;
use crate::{ConfigError, ConfigResult, MergeLeft};

struct Entry<T> {
    source: Box<dyn Source>,
    options: Options<T>,
}

/// Ordered list of sources combined into one value.
///
/// [`Multi::all_of`] resolves every source and merges the results, earlier
/// sources taking precedence over later ones for fields both set.
/// [`Multi::one_of`] returns the first source that resolves, without
/// merging. Each call starts from `T::default()` and keeps no state between
/// calls.
///
/// `T::default()` must be the zero value, i.e. satisfy
/// [`MergeLeft::is_zero`]. Every layer is decoded over a fresh default, so a
/// non-zero default field would be set in every layer and the first layer's
/// copy would shadow later explicit values.
///
/// # Examples
///
/// ```
/// use strata_config::source::ReaderSource;
/// use strata_config::{MergeLeft, Multi, Options};
///
/// #[derive(Debug, Default, PartialEq, MergeLeft, serde::Serialize, serde::Deserialize)]
/// struct Cfg {
///     pub name: String,
///     pub port: u16,
/// }
///
/// let cfg: Cfg = Multi::new()
///     .add(ReaderSource::from_bytes(r#"{"name": "primary"}"#), Options::default())
///     .add(ReaderSource::from_bytes(r#"{"name": "other", "port": 80}"#), Options::default())
///     .all_of()
///     .expect("both sources resolve");
/// assert_eq!(cfg, Cfg { name: "primary".into(), port: 80 });
/// ```
pub struct Multi<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for Multi<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Multi<T> {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a source decoded according to `options`.
    #[must_use]
    pub fn add(mut self, source: impl Source + 'static, options: Options<T>) -> Self {
        self.entries.push(Entry {
            source: Box::new(source),
            options,
        });
        self
    }

    /// Number of registered sources.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no source was registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Multi<T>
where
    T: Default + MergeLeft,
{
    /// Return the value of the first source that resolves.
    ///
    /// Every candidate is decoded into its own fresh value, so a failed
    /// candidate's partial writes never leak into the result.
    ///
    /// # Errors
    ///
    /// Returns an [`ConfigError::Aggregate`] holding one positional cause per
    /// source when none resolves. An empty list fails with no causes.
    pub fn one_of(&mut self) -> ConfigResult<T> {
        let mut failures = Vec::with_capacity(self.entries.len());
        for (position, entry) in self.entries.iter_mut().enumerate() {
            let mut value = T::default();
            match decode_into(entry.source.as_mut(), entry.options.decoder_ref(), &mut value) {
                Ok(()) => {
                    tracing::debug!(position, source = %entry.source.describe(), "resolved configuration");
                    return Ok(value);
                }
                Err(err) => {
                    tracing::debug!(position, error = %err, "configuration candidate failed");
                    failures.push(ConfigError::candidate(position, err));
                }
            }
        }
        tracing::warn!(candidates = failures.len(), "no configuration source resolved");
        Err(Arc::new(ConfigError::aggregate(failures)))
    }

    /// [`Multi::one_of`], writing into `cfg`.
    ///
    /// On failure `cfg` is reset to `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns the failure reported by [`Multi::one_of`].
    pub fn one_of_fill(&mut self, cfg: &mut T) -> ConfigResult<()> {
        store(self.one_of(), cfg)
    }

    /// Resolve every source and merge the results in order.
    ///
    /// A failing source does not stop the walk, so every failure is
    /// collected. The merged value is only returned when all sources
    /// resolved. An empty list resolves to `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns an [`ConfigError::Aggregate`] holding one positional cause per
    /// failed source.
    ///
    /// # Panics
    ///
    /// In debug builds, panics when `T::default()` is not zero.
    pub fn all_of(&mut self) -> ConfigResult<T> {
        let mut merged = T::default();
        debug_assert!(merged.is_zero(), "Default must be the zero value for layered merging");
        let mut failures = Vec::new();
        for (position, entry) in self.entries.iter_mut().enumerate() {
            let mut fresh = T::default();
            match decode_into(entry.source.as_mut(), entry.options.decoder_ref(), &mut fresh) {
                Ok(()) => {
                    tracing::debug!(position, source = %entry.source.describe(), "merged configuration layer");
                    merged = merged.merge_left(fresh);
                }
                Err(err) => {
                    tracing::debug!(position, error = %err, "configuration layer failed");
                    failures.push(ConfigError::candidate(position, err));
                }
            }
        }
        if failures.is_empty() {
            return Ok(merged);
        }
        tracing::warn!(
            failed = failures.len(),
            sources = self.entries.len(),
            "configuration sources failed"
        );
        Err(Arc::new(ConfigError::aggregate(failures)))
    }

    /// [`Multi::all_of`], writing into `cfg`.
    ///
    /// On failure `cfg` is reset to `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns the failure reported by [`Multi::all_of`].
    ///
    /// # Panics
    ///
    /// Under the same condition as [`Multi::all_of`].
    pub fn all_of_fill(&mut self, cfg: &mut T) -> ConfigResult<()> {
        store(self.all_of(), cfg)
    }
}

fn store<T: Default>(result: ConfigResult<T>, cfg: &mut T) -> ConfigResult<()> {
    match result {
        Ok(value) => {
            *cfg = value;
            Ok(())
        }
        Err(err) => {
            *cfg = T::default();
            Err(err)
        }
    }
}

impl<T> fmt::Debug for Multi<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| entry.source.describe()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for multi-source aggregation.

    use super::*;
    use crate::source::{FileSource, ReaderSource};
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize, crate::MergeLeft)]
    struct Cfg {
        pub foo: String,
        pub bar: String,
    }

    fn doc(raw: &'static str) -> ReaderSource {
        ReaderSource::from_bytes(raw)
    }

    fn missing() -> FileSource {
        FileSource::new("/no/such/config.json")
    }

    #[rstest]
    fn all_of_prefers_earlier_sources() -> Result<()> {
        let cfg: Cfg = Multi::new()
            .add(doc(r#"{"foo":"first"}"#), Options::default())
            .add(doc(r#"{"foo":"second","bar":"second"}"#), Options::default())
            .all_of()
            .map_err(|e| anyhow!("{e}"))?;
        ensure!(cfg == Cfg { foo: "first".into(), bar: "second".into() });
        Ok(())
    }

    #[rstest]
    fn all_of_fails_if_any_source_fails() {
        let mut multi = Multi::new()
            .add(doc(r#"{"foo":"first"}"#), Options::default())
            .add(missing(), Options::default())
            .add(doc("{broken"), Options::default());
        let mut cfg = Cfg {
            foo: "stale".into(),
            bar: String::new(),
        };
        let err = multi.all_of_fill(&mut cfg).err();
        assert_eq!(cfg, Cfg::default());
        let Some(ConfigError::Aggregate(agg)) = err.as_deref() else {
            panic!("expected aggregate");
        };
        let positions: Vec<usize> = agg
            .iter()
            .filter_map(|e| match e {
                ConfigError::Candidate { position, .. } => Some(*position),
                _ => None,
            })
            .collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[rstest]
    fn one_of_does_not_merge() -> Result<()> {
        let cfg: Cfg = Multi::new()
            .add(missing(), Options::default())
            .add(doc(r#"{"foo":"winner"}"#), Options::default())
            .add(doc(r#"{"foo":"later","bar":"later"}"#), Options::default())
            .one_of()
            .map_err(|e| anyhow!("{e}"))?;
        ensure!(cfg == Cfg { foo: "winner".into(), bar: String::new() });
        Ok(())
    }

    #[rstest]
    fn one_of_fill_resets_on_failure() {
        let mut multi = Multi::new().add(missing(), Options::default());
        let mut cfg = Cfg {
            foo: "stale".into(),
            bar: "stale".into(),
        };
        assert!(multi.one_of_fill(&mut cfg).is_err());
        assert_eq!(cfg, Cfg::default());
    }

    #[rstest]
    fn empty_lists() -> Result<()> {
        let mut multi: Multi<Cfg> = Multi::new();
        ensure!(multi.is_empty());
        ensure!(multi.all_of().map_err(|e| anyhow!("{e}"))? == Cfg::default());
        let err = multi.one_of().err();
        ensure!(matches!(err.as_deref(), Some(ConfigError::Aggregate(agg)) if agg.is_empty()));
        Ok(())
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize, crate::MergeLeft)]
    struct Preset {
        pub port: u16,
    }

    impl Default for Preset {
        fn default() -> Self {
            Self { port: 8080 }
        }
    }

    // Without the check, the first layer's default 8080 would shadow the
    // second layer's explicit 9.
    #[cfg(debug_assertions)]
    #[rstest]
    #[should_panic(expected = "Default must be the zero value")]
    fn all_of_rejects_non_zero_default() {
        let outcome = Multi::<Preset>::new()
            .add(doc("{}"), Options::default())
            .add(doc(r#"{"port":9}"#), Options::default())
            .all_of();
        assert!(outcome.is_ok());
    }
}
