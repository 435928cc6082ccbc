use super::{CategorizationRow, PersistenceError};
use crate::condition::ConditionClass;
use chrono::NaiveDateTime;
use tetres_core::model::RouteId;

/// a unit of work against the rows of one condition class. staged deletes
/// and inserts take effect only on [`CategorizationSession::commit`]; there
/// is no implicit transaction spanning commits.
pub trait CategorizationSession {
    /// stages removal of the rows of `route` with a sample time in `[start, end]`
    fn delete_range(
        &mut self,
        route: RouteId,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<(), PersistenceError>;

    /// stages rows for insertion, returning the number staged
    fn bulk_insert(&mut self, rows: &[CategorizationRow]) -> Result<usize, PersistenceError>;

    fn commit(&mut self) -> Result<(), PersistenceError>;

    /// discards anything staged since the last commit
    fn rollback(&mut self);
}

/// persistence for categorization rows, one table per condition class.
pub trait CategorizationStore: Send + Sync {
    fn open_session(
        &self,
        class: ConditionClass,
    ) -> Result<Box<dyn CategorizationSession + '_>, PersistenceError>;

    /// committed rows of `route` and `class` with a sample time in `[start, end]`
    fn rows(
        &self,
        route: RouteId,
        class: ConditionClass,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<CategorizationRow>, PersistenceError>;
}
