//! Source trying candidates in order.

use std::borrow::Cow;
use std::sync::Arc;

use super::{ByteStream, Source};
use crate::{ConfigError, ConfigResult};

/// Provides the stream of the first candidate that succeeds.
///
/// Candidates are tried in order and the search stops at the first success,
/// so later candidates are never invoked. Slots may be absent; an absent slot
/// is recorded as [`ConfigError::AbsentCandidate`] and skipped. When every
/// slot fails the error is an [`ConfigError::Aggregate`] holding one cause
/// per slot, each tagged with its position.
///
/// # Examples
///
/// ```
/// use strata_config::source::{FallbackSource, FileSource, ReaderSource, Source};
///
/// let mut source = FallbackSource::new()
///     .or(FileSource::new("/definitely/missing.json"))
///     .or(ReaderSource::from_bytes(r#"{"port": 80}"#));
/// assert!(source.provide().is_ok());
/// ```
#[derive(Default)]
pub struct FallbackSource {
    candidates: Vec<Option<Box<dyn Source>>>,
}

impl FallbackSource {
    /// Create an empty fallback list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }

    /// Build from a list of possibly absent candidates.
    #[must_use]
    pub const fn from_candidates(candidates: Vec<Option<Box<dyn Source>>>) -> Self {
        Self { candidates }
    }

    /// Append a candidate.
    #[must_use]
    pub fn or(mut self, source: impl Source + 'static) -> Self {
        self.candidates.push(Some(Box::new(source)));
        self
    }

    /// Append a slot that may be absent.
    #[must_use]
    pub fn or_absent(mut self, source: Option<Box<dyn Source>>) -> Self {
        self.candidates.push(source);
        self
    }

    /// Number of slots, absent ones included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` when no slot was added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl Source for FallbackSource {
    fn provide(&mut self) -> ConfigResult<ByteStream> {
        let mut failures = Vec::with_capacity(self.candidates.len());
        for (position, slot) in self.candidates.iter_mut().enumerate() {
            let Some(candidate) = slot else {
                failures.push(ConfigError::AbsentCandidate { position });
                continue;
            };
            match candidate.provide() {
                Ok(stream) => {
                    tracing::debug!(
                        position,
                        source = %candidate.describe(),
                        "fallback source selected"
                    );
                    return Ok(stream);
                }
                Err(err) => failures.push(ConfigError::candidate(position, err)),
            }
        }
        tracing::warn!(candidates = self.candidates.len(), "every fallback source failed");
        Err(Arc::new(ConfigError::aggregate(failures)))
    }

    fn describe(&self) -> Cow<'_, str> {
        let names: Vec<Cow<'_, str>> = self
            .candidates
            .iter()
            .map(|slot| {
                slot.as_ref()
                    .map_or(Cow::Borrowed("<absent>"), |source| source.describe())
            })
            .collect();
        Cow::Owned(format!("fallback [{}]", names.join(", ")))
    }
}

impl std::fmt::Debug for FallbackSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackSource")
            .field("candidates", &self.describe())
            .finish()
    }
}
