use crate::condition::ConditionClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// rows inserted per condition class for one (route, period). a failed
/// class is recorded as -1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizationResult {
    pub counts: BTreeMap<ConditionClass, i64>,
    pub has_error: bool,
}

impl CategorizationResult {
    pub fn record(&mut self, class: ConditionClass, count: i64) {
        if count < 0 {
            self.has_error = true;
        }
        self.counts.insert(class, count);
    }

    pub fn count(&self, class: ConditionClass) -> Option<i64> {
        self.counts.get(&class).copied()
    }

    pub fn total_inserted(&self) -> i64 {
        self.counts.values().filter(|c| **c > 0).sum()
    }
}
