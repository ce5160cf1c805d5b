//! Cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shareable stop signal.
///
/// Clones observe the same flag. Once cancelled, every later poll sees it
/// until the owner calls `reset`.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a flag owned elsewhere, e.g. one tripped by a signal handler.
    pub fn from_shared(flag: Arc<AtomicBool>) -> Self {
        Self(flag)
    }

    pub fn shared(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        assert!(!other.is_cancelled());

        flag.cancel();
        flag.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn reset_clears_every_clone() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        flag.cancel();

        other.reset();
        assert!(!flag.is_cancelled());
    }

    #[test]
    fn observes_external_flag() {
        let raw = Arc::new(AtomicBool::new(false));
        let flag = CancelFlag::from_shared(Arc::clone(&raw));

        raw.store(true, Ordering::SeqCst);
        assert!(flag.is_cancelled());
    }

    #[test]
    fn visible_across_threads() {
        let flag = CancelFlag::new();
        let remote = flag.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(flag.is_cancelled());
    }
}
