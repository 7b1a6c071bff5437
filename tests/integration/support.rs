//! Shared test utilities for integration tests
//!
//! Centralizes environment-variable isolation so tests that touch the
//! layered configuration loader do not race each other when run in
//! parallel.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Serializes access to process environment variables across tests.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

pub struct EnvGuard {
    _lock: MutexGuard<'static, ()>,
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    /// Capture the variables we are about to touch and hold the lock until
    /// the guard drops.
    pub fn isolate(config_home: &Path, home: &Path) -> Self {
        let lock = ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let keys: [&'static str; 3] = ["XDG_CONFIG_HOME", "HOME", "VISTA_LOGGING__LEVEL"];
        let saved = keys
            .iter()
            .map(|key| (*key, std::env::var(key).ok()))
            .collect();

        std::env::set_var("XDG_CONFIG_HOME", config_home);
        std::env::set_var("HOME", home);
        std::env::remove_var("VISTA_LOGGING__LEVEL");

        EnvGuard { _lock: lock, saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}
