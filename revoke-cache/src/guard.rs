//! Initialization guard.

use std::sync::atomic::{AtomicBool, Ordering};

use revoke_core::error::{Result, RevocationError};

/// Precondition check for state that only becomes usable after an explicit
/// initialization step.
///
/// Each guarded value owns its own `InitGuard`; checking one guard never
/// affects another, and code without a guard is never checked.
/// The flag only moves from false to true.
#[derive(Debug, Default)]
pub struct InitGuard {
    initialized: AtomicBool,
}

impl InitGuard {
    /// Creates a guard in the uninitialized state.
    pub const fn new() -> Self {
        Self {
            initialized: AtomicBool::new(false),
        }
    }

    /// Fails with [`RevocationError::NotInitialized`] until
    /// [`mark_initialized`](Self::mark_initialized) has been called.
    #[inline]
    pub fn check(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(RevocationError::NotInitialized)
        }
    }

    /// Returns true once initialization has completed.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Marks initialization as complete.
    ///
    /// Everything written before this call is visible to threads that
    /// subsequently pass [`check`](Self::check).
    pub fn mark_initialized(&self) {
        self.initialized.store(true, Ordering::Release);
    }
}
