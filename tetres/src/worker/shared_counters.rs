use super::BatchId;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// outstanding work units per batch, shared between the submitter and the
/// workers.
#[derive(Debug, Default)]
pub struct SharedCounters {
    remaining: Mutex<HashMap<BatchId, usize>>,
}

impl SharedCounters {
    pub fn new() -> SharedCounters {
        SharedCounters::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<BatchId, usize>> {
        self.remaining
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn register(&self, batch: BatchId, n_units: usize) {
        *self.lock().entry(batch).or_default() += n_units;
    }

    /// marks one unit of the batch done. returns true for exactly one caller,
    /// the one completing the last outstanding unit.
    pub fn complete_one(&self, batch: BatchId) -> bool {
        let mut remaining = self.lock();
        match remaining.get_mut(&batch) {
            Some(n) if *n > 1 => {
                *n -= 1;
                false
            }
            Some(_) => {
                remaining.remove(&batch);
                true
            }
            None => {
                log::warn!("completion reported for unknown batch {batch}");
                false
            }
        }
    }

    /// drops units that were registered but will never run. the batch is
    /// forgotten once nothing is outstanding.
    pub fn withdraw(&self, batch: BatchId, n_units: usize) {
        let mut remaining = self.lock();
        if let Some(n) = remaining.get_mut(&batch) {
            *n = n.saturating_sub(n_units);
            if *n == 0 {
                remaining.remove(&batch);
            }
        }
    }

    pub fn remaining(&self, batch: BatchId) -> usize {
        self.lock().get(&batch).copied().unwrap_or_default()
    }

    pub fn is_idle(&self) -> bool {
        self.lock().is_empty()
    }
}
