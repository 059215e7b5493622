//! Constructors, joining and inspection helpers for `ConfigError`.

use std::error::Error;
use std::sync::Arc;

use super::{AggregatedErrors, ConfigError};

impl ConfigError {
    /// Tries to build a [`ConfigError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the inner error when a single [`Arc`] is uniquely owned;
    /// * [`Self::Aggregate`] containing that single [`Arc`] when the error is already shared; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.is_empty() {
            return None;
        }
        Some(if arcs.len() == 1 {
            let last = arcs.pop()?;
            match Arc::try_unwrap(last) {
                Ok(err) => err,
                Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
            }
        } else {
            Self::Aggregate(Box::new(AggregatedErrors::new(arcs)))
        })
    }

    /// Join every error into a single [`Self::Aggregate`], even when only one
    /// error is supplied.
    ///
    /// Combinators use this so that callers can always count the causes of
    /// an exhausted candidate list.
    ///
    /// ```
    /// use strata_config::ConfigError;
    /// let e = ConfigError::aggregate([ConfigError::AbsentCandidate { position: 0 }]);
    /// assert!(matches!(e, ConfigError::Aggregate(ref agg) if agg.len() == 1));
    /// ```
    #[must_use]
    pub fn aggregate<I, E>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        Self::Aggregate(Box::new(AggregatedErrors::new(arcs)))
    }

    /// Join `later` onto an optional earlier failure without discarding either.
    ///
    /// Returns `later` unchanged when there was no earlier failure.
    #[must_use]
    pub fn join(earlier: Option<Arc<Self>>, later: Arc<Self>) -> Arc<Self> {
        match earlier {
            None => later,
            Some(first) => Arc::new(Self::aggregate([first, later])),
        }
    }

    /// Construct a source failure for the source described by `source_name`.
    pub fn source_failure(
        source_name: impl Into<String>,
        cause: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self::Source {
            source_name: source_name.into(),
            cause: cause.into(),
        }
    }

    /// Construct a decode failure for `format`.
    pub fn decode(format: &'static str, cause: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Decode {
            format,
            cause: cause.into(),
        }
    }

    /// Attribute `source` to the candidate at `position`.
    #[must_use]
    pub const fn candidate(position: usize, source: Arc<Self>) -> Self {
        Self::Candidate { position, source }
    }

    /// Flatten aggregates and positional wrappers, returning every
    /// underlying failure in the order it was recorded.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use strata_config::ConfigError;
    ///
    /// let inner = Arc::new(ConfigError::AbsentCandidate { position: 1 });
    /// let e = ConfigError::aggregate([
    ///     ConfigError::candidate(0, Arc::new(ConfigError::AbsentCandidate { position: 0 })),
    ///     ConfigError::candidate(1, inner),
    /// ]);
    /// assert_eq!(e.leaves().len(), 2);
    /// ```
    #[must_use]
    pub fn leaves(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Self>) {
        match self {
            Self::Aggregate(agg) => {
                for err in agg.iter() {
                    err.collect_leaves(out);
                }
            }
            Self::Candidate { source, .. } => source.collect_leaves(out),
            other => out.push(other),
        }
    }

    /// Returns `true` when any underlying cause is an I/O error of `kind`.
    ///
    /// The search walks aggregates, positional wrappers and the
    /// `source()` chain of every leaf.
    #[must_use]
    pub fn has_io_kind(&self, kind: std::io::ErrorKind) -> bool {
        self.leaves().into_iter().any(|leaf| {
            let mut current: Option<&(dyn Error + 'static)> = Some(leaf);
            while let Some(err) = current {
                if err
                    .downcast_ref::<std::io::Error>()
                    .is_some_and(|io| io.kind() == kind)
                {
                    return true;
                }
                current = err.source();
            }
            false
        })
    }
}
