use super::{incident, snow_management, special_event, weather, work_zone};
use crate::categorization::CategorizationParameters;
use crate::filter::{FilterError, FilterGroup};

/// clear weather with no incident, work zone, special event or snow
/// management affecting the route
pub fn explicit_normal_day(params: &CategorizationParameters) -> Result<FilterGroup, FilterError> {
    let mut group = FilterGroup::new("explicit_normal_day");
    group.add(weather::normal_weather())?;
    group.add(incident::no_incident(
        params.incident_upstream_distance_limit,
        params.incident_downstream_distance_limit,
    ))?;
    group.add(work_zone::no_work_zone(
        params.work_zone_upstream_distance_limit,
        params.work_zone_downstream_distance_limit,
    ))?;
    group.add(special_event::no_special_event(
        params.special_event_distance_limit,
    ))?;
    group.add(snow_management::no_snow_management())?;
    Ok(group)
}
