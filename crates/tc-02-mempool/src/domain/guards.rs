//! Skip-if-busy latches for the control loops.
//!
//! A loop that finds its latch held skips the tick instead of waiting.

use std::sync::atomic::{AtomicBool, Ordering};

/// Non-blocking mutual exclusion latch.
#[derive(Debug, Default)]
pub struct LoopGuard {
    held: AtomicBool,
}

impl LoopGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the latch, or returns `None` if it is already held.
    pub fn try_acquire(&self) -> Option<GuardToken<'_>> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GuardToken { guard: self })
    }

    /// Sets the latch without a token; `false` if it was already set.
    pub fn raise(&self) -> bool {
        !self.held.swap(true, Ordering::AcqRel)
    }

    pub fn lower(&self) {
        self.held.store(false, Ordering::Release);
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// Releases its [`LoopGuard`] on drop.
#[derive(Debug)]
pub struct GuardToken<'a> {
    guard: &'a LoopGuard,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.guard.lower();
    }
}

/// One latch per control loop.
#[derive(Debug, Default)]
pub struct LoopGuards {
    pub downloading: LoopGuard,
    pub processing: LoopGuard,
    pub bundling: LoopGuard,
    pub creating: LoopGuard,
    pub clearing: LoopGuard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_skips() {
        let guard = LoopGuard::new();
        let token = guard.try_acquire();
        assert!(token.is_some());
        assert!(guard.try_acquire().is_none());
        assert!(guard.is_held());

        drop(token);
        assert!(!guard.is_held());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn test_raise_and_lower() {
        let guard = LoopGuard::new();
        assert!(guard.raise());
        assert!(!guard.raise());
        guard.lower();
        assert!(!guard.is_held());
    }
}
