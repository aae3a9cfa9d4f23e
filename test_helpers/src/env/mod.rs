//! Serialised mutation of environment variables.
//!
//! Every mutation takes a global re-entrant mutex and returns an RAII guard
//! restoring the previous state on drop. Tests that read the environment as a
//! whole (for example by capturing a snapshot under a prefix) should hold an
//! [`EnvScope`], which keeps the mutex for its whole lifetime.
//!
//! # Examples
//!
//! ```
//! use safe_coerce_test_helpers::env;
//!
//! let scope = env::EnvScope::with_vars([("DEMO_PORT", "8080")]);
//! assert_eq!(std::env::var("DEMO_PORT").as_deref(), Ok("8080"));
//! drop(scope);
//! ```

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

fn write_var(key: &str, value: Option<&OsString>) {
    let _guard = ENV_MUTEX.lock();
    match value {
        // SAFETY: environment writes in this crate hold `ENV_MUTEX`.
        Some(text) => unsafe { env::set_var(key, text) },
        // SAFETY: environment writes in this crate hold `ENV_MUTEX`.
        None => unsafe { env::remove_var(key) },
    }
}

/// Restores one variable to its prior value when dropped.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    fn replace(key: String, value: Option<OsString>) -> Self {
        let _guard = ENV_MUTEX.lock();
        let original = env::var_os(&key);
        write_var(&key, value.as_ref());
        Self { key, original }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        write_var(&self.key, self.original.as_ref());
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

/// Set `key` to `value` until the guard is dropped.
pub fn set_var(key: impl Into<String>, value: impl Into<OsString>) -> EnvVarGuard {
    EnvVarGuard::replace(key.into(), Some(value.into()))
}

/// Unset `key` until the guard is dropped.
pub fn remove_var(key: impl Into<String>) -> EnvVarGuard {
    EnvVarGuard::replace(key.into(), None)
}

/// Holds the environment mutex together with the guards it protects.
///
/// Guards are restored, in reverse order, before the mutex is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl EnvScope {
    /// Lock the environment without changing it.
    pub fn locked() -> Self {
        Self {
            guards: Vec::new(),
            _lock: ENV_MUTEX.lock(),
        }
    }

    /// Lock the environment and set every pair.
    pub fn with_vars<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OsString>,
    {
        let mut scope = Self::locked();
        scope.guards = pairs
            .into_iter()
            .map(|(key, value)| set_var(key, value))
            .collect();
        scope
    }

    /// Unset every variable whose name starts with `prefix`, ignoring ASCII
    /// case, for the lifetime of the scope.
    pub fn clear_prefix(mut self, prefix: &str) -> Self {
        let doomed: Vec<String> = env::vars_os()
            .filter_map(|(key, _)| key.into_string().ok())
            .filter(|key| {
                key.get(..prefix.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
            })
            .collect();
        self.guards.extend(doomed.into_iter().map(remove_var));
        self
    }

    /// Set one more variable inside the scope.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.guards.push(set_var(key, value));
        self
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}
