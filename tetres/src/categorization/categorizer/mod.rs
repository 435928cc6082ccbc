//! per-class matching of condition records to the samples of one route and
//! period. each categorizer returns rows in sample time order, ties broken by
//! condition id.
mod incident;
mod snow_management;
mod special_event;
mod weather;
mod work_zone;

pub use weather::{nearest_reading, select_weather_readings};

use super::{CategorizationContext, CategorizationError, CategorizationRow, ConditionDetail};
use crate::condition::ConditionClass;
use tetres_core::model::TravelTimeSample;

/// all rows of one condition class for the samples in `ctx`.
pub fn rows_for_class(
    class: ConditionClass,
    ctx: &CategorizationContext,
) -> Result<Vec<CategorizationRow>, CategorizationError> {
    let mut rows = match class {
        ConditionClass::Weather => weather::categorize_weather(ctx)?,
        ConditionClass::Incident => incident::categorize_incidents(ctx)?,
        ConditionClass::WorkZone => work_zone::categorize_work_zones(ctx)?,
        ConditionClass::SpecialEvent => special_event::categorize_special_events(ctx)?,
        ConditionClass::SnowManagement => snow_management::categorize_snow_managements(ctx)?,
    };
    rows.sort_by(|a, b| {
        a.sample_time
            .cmp(&b.sample_time)
            .then(a.condition_id.cmp(&b.condition_id))
    });
    Ok(rows)
}

fn new_row(
    sample: &TravelTimeSample,
    class: ConditionClass,
    condition_id: u64,
    detail: ConditionDetail,
) -> CategorizationRow {
    CategorizationRow {
        route_id: sample.route_id,
        sample_id: sample.id,
        sample_time: sample.time,
        class,
        condition_id,
        detail,
    }
}
