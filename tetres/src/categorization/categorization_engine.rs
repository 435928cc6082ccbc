use super::categorizer::rows_for_class;
use super::{
    CategorizationContext, CategorizationError, CategorizationLock, CategorizationResult,
    CategorizationRow, CategorizationSession, CategorizationStore, PersistenceError,
};
use crate::condition::ConditionClass;
use tetres_core::model::{Period, RouteId};

/// matches the samples of one (route, period) against every condition class
/// and replaces the stored rows of each class. classes are independent: a
/// failure is logged, recorded as -1 and the remaining classes still run.
pub fn categorize<S, L>(
    ctx: &CategorizationContext,
    store: &S,
    lock: &L,
) -> CategorizationResult
where
    S: CategorizationStore + ?Sized,
    L: CategorizationLock,
{
    let mut result = CategorizationResult::default();
    for class in ConditionClass::ALL {
        let count = match categorize_class(class, ctx, store, lock) {
            Ok(n) => {
                log::debug!(
                    "route '{}': {} {} rows for {} samples",
                    ctx.route.name,
                    n,
                    class,
                    ctx.samples.len()
                );
                n as i64
            }
            Err(e) => {
                log::warn!("route '{}': {} categorization failed: {}", ctx.route.name, class, e);
                -1
            }
        };
        result.record(class, count);
    }
    result
}

fn categorize_class<S, L>(
    class: ConditionClass,
    ctx: &CategorizationContext,
    store: &S,
    lock: &L,
) -> Result<usize, CategorizationError>
where
    S: CategorizationStore + ?Sized,
    L: CategorizationLock,
{
    let rows = rows_for_class(class, ctx)?;
    let inserted = replace_rows(store, lock, class, ctx.route.id, ctx.period, &rows)?;
    Ok(inserted)
}

/// replaces the rows of `class` for the route within the period. the delete
/// and the insert are committed separately, both under `lock`; a failure
/// rolls back whatever is still staged.
pub fn replace_rows<S, L>(
    store: &S,
    lock: &L,
    class: ConditionClass,
    route_id: RouteId,
    period: &Period,
    rows: &[CategorizationRow],
) -> Result<usize, PersistenceError>
where
    S: CategorizationStore + ?Sized,
    L: CategorizationLock,
{
    lock.run_exclusive(|| {
        let mut session = store.open_session(class)?;
        match write_rows(session.as_mut(), route_id, period, rows) {
            Ok(n) => Ok(n),
            Err(e) => {
                session.rollback();
                Err(e)
            }
        }
    })
}

fn write_rows(
    session: &mut dyn CategorizationSession,
    route_id: RouteId,
    period: &Period,
    rows: &[CategorizationRow],
) -> Result<usize, PersistenceError> {
    session.delete_range(route_id, &period.start, &period.end)?;
    session.commit()?;
    let inserted = session.bulk_insert(rows)?;
    session.commit()?;
    Ok(inserted)
}
