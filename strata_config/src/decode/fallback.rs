//! Decoder trying candidates in order over one buffered input.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use super::Decoder;
use crate::{ConfigError, ConfigResult, ConfigResultExt};

/// Decodes with the first candidate that succeeds.
///
/// The input is read into memory once and every candidate gets its own view
/// of the same bytes, so a candidate that fails part-way cannot disturb the
/// next one. Candidates after the first success are never run. Absent slots
/// are recorded as [`ConfigError::AbsentCandidate`]. When every slot fails
/// the error is an [`ConfigError::Aggregate`] with one cause per slot, and
/// the target is left as the last attempted candidate left it.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use strata_config::decode::{Decoder, FallbackDecoder, IniDecoder, JsonDecoder};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct Cfg {
///     name: String,
/// }
///
/// let decoder = FallbackDecoder::new().or(JsonDecoder).or(IniDecoder);
/// let mut cfg = Cfg::default();
/// decoder.decode(&mut &b"name = from-ini"[..], &mut cfg).expect("ini fallback");
/// assert_eq!(cfg.name, "from-ini");
/// ```
pub struct FallbackDecoder<T> {
    candidates: Vec<Option<Box<dyn Decoder<T>>>>,
}

impl<T> Default for FallbackDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FallbackDecoder<T> {
    /// Create an empty fallback list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }

    /// Build from a list of possibly absent candidates.
    #[must_use]
    pub const fn from_candidates(candidates: Vec<Option<Box<dyn Decoder<T>>>>) -> Self {
        Self { candidates }
    }

    /// Append a candidate.
    #[must_use]
    pub fn or(mut self, decoder: impl Decoder<T> + 'static) -> Self {
        self.candidates.push(Some(Box::new(decoder)));
        self
    }

    /// Append a slot that may be absent.
    #[must_use]
    pub fn or_absent(mut self, decoder: Option<Box<dyn Decoder<T>>>) -> Self {
        self.candidates.push(decoder);
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

impl<T> Decoder<T> for FallbackDecoder<T> {
    fn decode(&self, reader: &mut dyn Read, target: &mut T) -> ConfigResult<()> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).into_config()?;

        let mut failures = Vec::with_capacity(self.candidates.len());
        for (position, slot) in self.candidates.iter().enumerate() {
            let Some(candidate) = slot else {
                failures.push(ConfigError::AbsentCandidate { position });
                continue;
            };
            let mut view = data.as_slice();
            match candidate.decode(&mut view, target) {
                Ok(()) => {
                    tracing::debug!(position, "fallback decoder succeeded");
                    return Ok(());
                }
                Err(err) => failures.push(ConfigError::candidate(position, err)),
            }
        }
        tracing::warn!(candidates = self.candidates.len(), "every fallback decoder failed");
        Err(Arc::new(ConfigError::aggregate(failures)))
    }
}

impl<T> fmt::Debug for FallbackDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackDecoder")
            .field("candidates", &self.candidates.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the fallback decoder.

    use super::*;
    use crate::decode::JsonDecoder;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use test_helpers::counter::CallCounter;

    fn consuming_failure(reader: &mut dyn Read, _target: &mut String) -> ConfigResult<()> {
        let mut sink = Vec::new();
        reader.read_to_end(&mut sink).into_config()?;
        Err(Arc::new(ConfigError::decode("first", "always fails")))
    }

    fn counting(calls: CallCounter) -> impl Decoder<String> {
        move |reader: &mut dyn Read, target: &mut String| -> ConfigResult<()> {
            calls.hit();
            reader.read_to_string(target).into_config()?;
            Ok(())
        }
    }

    #[rstest]
    fn later_candidates_see_the_full_input() -> Result<()> {
        let decoder = FallbackDecoder::new()
            .or(consuming_failure)
            .or(counting(CallCounter::default()));
        let mut out = String::new();
        decoder
            .decode(&mut &b"payload"[..], &mut out)
            .map_err(|e| anyhow!("{e}"))?;
        ensure!(out == "payload");
        Ok(())
    }

    #[rstest]
    fn stops_after_first_success() -> Result<()> {
        let winner = CallCounter::default();
        let skipped = CallCounter::default();
        let decoder = FallbackDecoder::new()
            .or(consuming_failure)
            .or(counting(winner.clone()))
            .or(counting(skipped.clone()));
        let mut out = String::new();
        decoder
            .decode(&mut &b"x"[..], &mut out)
            .map_err(|e| anyhow!("{e}"))?;
        ensure!(winner.count() == 1);
        ensure!(!skipped.was_called());
        Ok(())
    }

    #[rstest]
    fn exhaustion_reports_every_slot() {
        let decoder: FallbackDecoder<String> = FallbackDecoder::new()
            .or_absent(None)
            .or(consuming_failure)
            .or(JsonDecoder);
        let mut out = String::new();
        let err = decoder.decode(&mut &b"not json"[..], &mut out).err();
        let Some(ConfigError::Aggregate(agg)) = err.as_deref() else {
            panic!("expected aggregate error");
        };
        assert_eq!(agg.len(), 3);
        assert!(matches!(
            agg.iter().next(),
            Some(ConfigError::AbsentCandidate { position: 0 })
        ));
    }
}
