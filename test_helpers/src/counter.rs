//! Shared call counter for test doubles.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cloneable counter; every clone observes the same count.
///
/// # Examples
///
/// ```
/// use test_helpers::counter::CallCounter;
///
/// let counter = CallCounter::default();
/// let shared = counter.clone();
/// counter.hit();
/// assert_eq!(shared.count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    /// Record one call.
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of calls recorded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Returns `true` when at least one call was recorded.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.count() > 0
    }
}
