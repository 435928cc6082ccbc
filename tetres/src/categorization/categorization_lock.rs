use std::sync::{Arc, Mutex};

/// mutual exclusion around the replace-on-write sequence of one condition
/// class. implementations must run `f` exactly once.
pub trait CategorizationLock: Send + Sync {
    fn run_exclusive<T, F: FnOnce() -> T>(&self, f: F) -> T;
}

/// for single threaded callers
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLock;

impl CategorizationLock for NoopLock {
    fn run_exclusive<T, F: FnOnce() -> T>(&self, f: F) -> T {
        f()
    }
}

/// a lock shared between workers by cloning. a worker that panicked while
/// holding the lock does not block the others.
#[derive(Debug, Clone, Default)]
pub struct SharedLock {
    inner: Arc<Mutex<()>>,
}

impl SharedLock {
    pub fn new() -> SharedLock {
        SharedLock::default()
    }
}

impl CategorizationLock for SharedLock {
    fn run_exclusive<T, F: FnOnce() -> T>(&self, f: F) -> T {
        let _guard = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f()
    }
}
