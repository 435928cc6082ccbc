use super::{CategorizationRow, CategorizationSession, CategorizationStore, PersistenceError};
use crate::condition::ConditionClass;
use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use tetres_core::model::RouteId;

enum StagedOperation {
    Delete {
        route: RouteId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    Insert(Vec<CategorizationRow>),
}

/// thread safe in-memory categorization tables.
#[derive(Default)]
pub struct InMemoryCategorizationStore {
    tables: Mutex<HashMap<ConditionClass, Vec<CategorizationRow>>>,
    failing_inserts: Mutex<HashSet<ConditionClass>>,
}

impl InMemoryCategorizationStore {
    pub fn new() -> InMemoryCategorizationStore {
        InMemoryCategorizationStore::default()
    }

    /// makes every insert into `class` fail, leaving committed deletes in place
    pub fn fail_inserts_for(&self, class: ConditionClass) {
        lock_recover(&self.failing_inserts).insert(class);
    }

    /// every committed row of a class, in insertion order
    pub fn table(&self, class: ConditionClass) -> Vec<CategorizationRow> {
        lock_recover(&self.tables)
            .get(&class)
            .cloned()
            .unwrap_or_default()
    }

    pub fn total_rows(&self) -> usize {
        lock_recover(&self.tables).values().map(|t| t.len()).sum()
    }
}

fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct InMemorySession<'a> {
    store: &'a InMemoryCategorizationStore,
    class: ConditionClass,
    staged: Vec<StagedOperation>,
}

impl CategorizationSession for InMemorySession<'_> {
    fn delete_range(
        &mut self,
        route: RouteId,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<(), PersistenceError> {
        self.staged.push(StagedOperation::Delete {
            route,
            start: *start,
            end: *end,
        });
        Ok(())
    }

    fn bulk_insert(&mut self, rows: &[CategorizationRow]) -> Result<usize, PersistenceError> {
        if lock_recover(&self.store.failing_inserts).contains(&self.class) {
            return Err(PersistenceError::InsertFailed(
                self.class,
                String::from("table rejected insert"),
            ));
        }
        if let Some(row) = rows.iter().find(|r| r.class != self.class) {
            return Err(PersistenceError::InsertFailed(
                self.class,
                format!("row of class {} in {} session", row.class, self.class),
            ));
        }
        self.staged.push(StagedOperation::Insert(rows.to_vec()));
        Ok(rows.len())
    }

    fn commit(&mut self) -> Result<(), PersistenceError> {
        let mut tables = lock_recover(&self.store.tables);
        let table = tables.entry(self.class).or_default();
        for op in self.staged.drain(..) {
            match op {
                StagedOperation::Delete { route, start, end } => table.retain(|r| {
                    !(r.route_id == route && start <= r.sample_time && r.sample_time <= end)
                }),
                StagedOperation::Insert(rows) => table.extend(rows),
            }
        }
        Ok(())
    }

    fn rollback(&mut self) {
        self.staged.clear();
    }
}

impl CategorizationStore for InMemoryCategorizationStore {
    fn open_session(
        &self,
        class: ConditionClass,
    ) -> Result<Box<dyn CategorizationSession + '_>, PersistenceError> {
        Ok(Box::new(InMemorySession {
            store: self,
            class,
            staged: vec![],
        }))
    }

    fn rows(
        &self,
        route: RouteId,
        class: ConditionClass,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<CategorizationRow>, PersistenceError> {
        let rows = self
            .table(class)
            .into_iter()
            .filter(|r| r.route_id == route && *start <= r.sample_time && r.sample_time <= *end)
            .collect();
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorization::ConditionDetail;
    use tetres_core::model::SampleId;

    fn row(minute: u32) -> CategorizationRow {
        let time = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(7, minute, 0))
            .expect("test invariant failed");
        CategorizationRow {
            route_id: RouteId(1),
            sample_id: SampleId(minute as u64),
            sample_time: time,
            class: ConditionClass::Incident,
            condition_id: 9,
            detail: ConditionDetail::Incident {
                distance: 0.5,
                off_distance: 0.0,
            },
        }
    }

    #[test]
    fn test_staged_until_commit() {
        let store = InMemoryCategorizationStore::new();
        let mut session = store
            .open_session(ConditionClass::Incident)
            .expect("test invariant failed");
        session
            .bulk_insert(&[row(5), row(10)])
            .expect("test invariant failed");
        assert_eq!(store.total_rows(), 0);
        session.commit().expect("test invariant failed");
        assert_eq!(store.table(ConditionClass::Incident).len(), 2);
    }

    #[test]
    fn test_rollback_discards_staged() {
        let store = InMemoryCategorizationStore::new();
        let mut session = store
            .open_session(ConditionClass::Incident)
            .expect("test invariant failed");
        session.bulk_insert(&[row(5)]).expect("test invariant failed");
        session.rollback();
        session.commit().expect("test invariant failed");
        assert_eq!(store.total_rows(), 0);
    }

    #[test]
    fn test_delete_range_is_inclusive() {
        let store = InMemoryCategorizationStore::new();
        let mut session = store
            .open_session(ConditionClass::Incident)
            .expect("test invariant failed");
        session
            .bulk_insert(&[row(5), row(10), row(15)])
            .expect("test invariant failed");
        session.commit().expect("test invariant failed");
        session
            .delete_range(RouteId(1), &row(5).sample_time, &row(10).sample_time)
            .expect("test invariant failed");
        session.commit().expect("test invariant failed");
        let remaining = store.table(ConditionClass::Incident);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].sample_id, SampleId(15));
    }
}
