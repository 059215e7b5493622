//! Helpers for safely mutating environment variables in tests.
//!
//! Every mutation takes a global re-entrant mutex and returns a guard that
//! restores the previous value (or removes the variable) when dropped.
//! Tests that read the environment across several steps should hold
//! [`lock`] for their whole body.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("STRATA_DOC_KEY", "VALUE");
//! assert_eq!(std::env::var("STRATA_DOC_KEY").as_deref(), Ok("VALUE"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

/// RAII guard that serialises environment access for its lifetime.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

fn mutate<K, F>(key: K, mutator: F) -> EnvVarGuard
where
    K: Into<String>,
    F: FnOnce(&str),
{
    let key = key.into();
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// Sets an environment variable and returns a guard restoring its prior value.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: mutation happens while `ENV_MUTEX` is held.
    mutate(key, |k| unsafe { env::set_var(k, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: mutation happens while `ENV_MUTEX` is held.
    mutate(key, |k| unsafe { env::remove_var(k) })
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: restoration happens while `ENV_MUTEX` is held.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: restoration happens while `ENV_MUTEX` is held.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Acquire the global environment lock for the lifetime of the guard.
///
/// The lock is re-entrant, so [`set_var`] and [`remove_var`] may be called
/// while it is held.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        _guard: ENV_MUTEX.lock(),
    }
}
