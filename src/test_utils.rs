#![expect(clippy::unwrap_used, reason = "Test utilities use .unwrap() for brevity")]

//! Shared test utilities for Desktop Curator unit tests.
//!
//! This module provides common test infrastructure used across multiple test
//! modules. It is only compiled during testing (`#[cfg(test)]`).

use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize tests that modify the APPDATA environment variable.
/// This prevents race conditions when multiple tests run in parallel and try to
/// set different APPDATA values.
static APPDATA_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// RAII guard that sets the APPDATA environment variable for a test scope
/// and restores the original value when dropped.
///
/// # Safety Considerations
///
/// `std::env::set_var`/`remove_var` are unsafe because concurrent readers of
/// the environment race with the modification. The guard keeps this sound in
/// parallel test runs:
/// 1. Each test gets its own unique `TempDir`, so parallel tests write to
///    different paths
/// 2. The `APPDATA_LOCK` mutex ensures tests modify APPDATA serially
/// 3. The guard is RAII-based and restores the original value on drop,
///    preventing environment pollution between tests, even on panic
pub struct AppdataGuard {
    original: Option<String>,
    // Lock guard must be held for the lifetime of this struct to ensure
    // exclusive access to APPDATA across parallel tests
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables with documented safety invariants"
)]
impl AppdataGuard {
    /// Create a new guard that sets APPDATA to the given temp directory path.
    pub fn new(temp_dir: &TempDir) -> Self {
        // Acquire lock to serialize APPDATA modifications across parallel
        // tests; a poisoned lock only means another test panicked
        let lock = APPDATA_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var("APPDATA").ok();
        // SAFETY: Serialized by APPDATA_LOCK; each test uses its own TempDir;
        // the original value is restored on drop. See struct-level docs.
        unsafe {
            std::env::set_var("APPDATA", temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables with documented safety invariants"
)]
impl Drop for AppdataGuard {
    fn drop(&mut self) {
        // SAFETY: Still holding APPDATA_LOCK; restoring the original state
        // prevents test pollution. See struct-level docs.
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var("APPDATA", original);
            }
        } else {
            unsafe {
                std::env::remove_var("APPDATA");
            }
        }
    }
}
