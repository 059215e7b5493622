//! Aggregation container and iteration support for multiple `ConfigError` values.

use std::{error::Error, fmt, sync::Arc};

use super::ConfigError;

/// Ordered collection of [`ConfigError`]s joined by a single operation.
///
/// # Examples
///
/// ```
/// use strata_config::ConfigError;
/// let e = ConfigError::aggregate(vec![
///     ConfigError::AbsentCandidate { position: 0 },
///     ConfigError::AbsentCandidate { position: 1 },
/// ]);
/// if let ConfigError::Aggregate(agg) = e {
///     assert_eq!(agg.len(), 2);
/// }
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<ConfigError>>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<Arc<ConfigError>>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing was joined.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a ConfigError;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, Arc<ConfigError>>,
        fn(&'a Arc<ConfigError>) -> &'a ConfigError,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(Arc::as_ref)
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<ConfigError>;
    type IntoIter = std::vec::IntoIter<Arc<ConfigError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
