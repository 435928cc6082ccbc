use super::predicate::{self, incident, snow_management, special_event, weather, work_zone};
use super::{And, FilterError, FilterGroup, Or, SampleFilter};
use crate::categorization::CategorizationParameters;
use crate::condition::{PrecipitationIntensity, PrecipitationType};
use serde::{Deserialize, Serialize};
use tetres_core::geometry::LocationType;

/// serializable description of a filter. distance limits left unset fall
/// back to the categorization parameters. `keep_minutes` carries a pass
/// forward in time, see [`super::Filter::with_keep_minutes`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterConfig {
    WeatherType {
        types: Vec<PrecipitationType>,
    },
    WeatherIntensity {
        intensities: Vec<PrecipitationIntensity>,
    },
    NormalWeather,
    HasWeather,
    HasIncident {
        upstream_limit: Option<f64>,
        downstream_limit: Option<f64>,
        #[serde(default)]
        keep_minutes: Option<i64>,
    },
    NoIncident {
        upstream_limit: Option<f64>,
        downstream_limit: Option<f64>,
        #[serde(default)]
        keep_minutes: Option<i64>,
    },
    IncidentType {
        types: Vec<String>,
    },
    IncidentSeverity {
        min: i32,
        max: i32,
    },
    HasWorkZone {
        upstream_limit: Option<f64>,
        downstream_limit: Option<f64>,
        #[serde(default)]
        keep_minutes: Option<i64>,
    },
    NoWorkZone {
        upstream_limit: Option<f64>,
        downstream_limit: Option<f64>,
        #[serde(default)]
        keep_minutes: Option<i64>,
    },
    WorkZoneLocation {
        locations: Vec<LocationType>,
    },
    WorkZoneLaneClosed,
    WorkZoneCrossover,
    WorkZoneLaneConfig {
        origin_lanes: u32,
        open_lanes: u32,
    },
    HasSpecialEvent {
        distance_limit: Option<f64>,
    },
    NoSpecialEvent {
        distance_limit: Option<f64>,
    },
    SpecialEventArrival {
        distance_limit: Option<f64>,
    },
    SpecialEventDeparture {
        distance_limit: Option<f64>,
    },
    SpecialEventAttendance {
        min: u32,
        max: u32,
    },
    HasSnowManagement,
    NoSnowManagement,
    ExplicitNormalDay,
    And {
        left: Box<FilterConfig>,
        right: Box<FilterConfig>,
    },
    Or {
        left: Box<FilterConfig>,
        right: Box<FilterConfig>,
    },
    Group {
        name: String,
        filters: Vec<FilterConfig>,
    },
}

impl FilterConfig {
    pub fn build(
        &self,
        params: &CategorizationParameters,
    ) -> Result<Box<dyn SampleFilter>, FilterError> {
        use FilterConfig as C;
        let p = params;
        let filter: Box<dyn SampleFilter> = match self {
            C::WeatherType { types } => Box::new(weather::weather_types(types)),
            C::WeatherIntensity { intensities } => {
                Box::new(weather::weather_intensities(intensities))
            }
            C::NormalWeather => Box::new(weather::normal_weather()),
            C::HasWeather => Box::new(weather::has_weather()),
            C::HasIncident {
                upstream_limit,
                downstream_limit,
                keep_minutes,
            } => Box::new(
                incident::has_incident(
                    upstream_limit.unwrap_or(p.incident_upstream_distance_limit),
                    downstream_limit.unwrap_or(p.incident_downstream_distance_limit),
                )
                .with_keep_minutes(keep_minutes.unwrap_or_default()),
            ),
            C::NoIncident {
                upstream_limit,
                downstream_limit,
                keep_minutes,
            } => Box::new(
                incident::no_incident(
                    upstream_limit.unwrap_or(p.incident_upstream_distance_limit),
                    downstream_limit.unwrap_or(p.incident_downstream_distance_limit),
                )
                .with_keep_minutes(keep_minutes.unwrap_or_default()),
            ),
            C::IncidentType { types } => {
                let types = types.iter().map(|t| t.as_str()).collect::<Vec<_>>();
                Box::new(incident::incident_types(&types))
            }
            C::IncidentSeverity { min, max } => {
                ensure_range(*min as f64, *max as f64, true)?;
                Box::new(incident::incident_severity(*min, *max))
            }
            C::HasWorkZone {
                upstream_limit,
                downstream_limit,
                keep_minutes,
            } => Box::new(
                work_zone::has_work_zone(
                    upstream_limit.unwrap_or(p.work_zone_upstream_distance_limit),
                    downstream_limit.unwrap_or(p.work_zone_downstream_distance_limit),
                )
                .with_keep_minutes(keep_minutes.unwrap_or_default()),
            ),
            C::NoWorkZone {
                upstream_limit,
                downstream_limit,
                keep_minutes,
            } => Box::new(
                work_zone::no_work_zone(
                    upstream_limit.unwrap_or(p.work_zone_upstream_distance_limit),
                    downstream_limit.unwrap_or(p.work_zone_downstream_distance_limit),
                )
                .with_keep_minutes(keep_minutes.unwrap_or_default()),
            ),
            C::WorkZoneLocation { locations } => {
                Box::new(work_zone::work_zone_locations(locations))
            }
            C::WorkZoneLaneClosed => Box::new(work_zone::work_zone_lane_closed()),
            C::WorkZoneCrossover => Box::new(work_zone::work_zone_crossover()),
            C::WorkZoneLaneConfig {
                origin_lanes,
                open_lanes,
            } => Box::new(work_zone::work_zone_lane_config(*origin_lanes, *open_lanes)),
            C::HasSpecialEvent { distance_limit } => Box::new(special_event::has_special_event(
                distance_limit.unwrap_or(p.special_event_distance_limit),
            )),
            C::NoSpecialEvent { distance_limit } => Box::new(special_event::no_special_event(
                distance_limit.unwrap_or(p.special_event_distance_limit),
            )),
            C::SpecialEventArrival { distance_limit } => Box::new(
                special_event::arrival_traffic(
                    distance_limit.unwrap_or(p.special_event_distance_limit),
                ),
            ),
            C::SpecialEventDeparture { distance_limit } => Box::new(
                special_event::departure_traffic(
                    distance_limit.unwrap_or(p.special_event_distance_limit),
                ),
            ),
            C::SpecialEventAttendance { min, max } => {
                ensure_range(*min as f64, *max as f64, false)?;
                Box::new(special_event::attendance(*min, *max))
            }
            C::HasSnowManagement => Box::new(snow_management::has_snow_management()),
            C::NoSnowManagement => Box::new(snow_management::no_snow_management()),
            C::ExplicitNormalDay => Box::new(predicate::explicit_normal_day(p)?),
            C::And { left, right } => Box::new(And::new(left.build(p)?, right.build(p)?)),
            C::Or { left, right } => Box::new(Or::new(left.build(p)?, right.build(p)?)),
            C::Group { name, filters } => {
                let mut group = FilterGroup::new(name);
                for f in filters.iter() {
                    group.add_boxed(f.build(p)?)?;
                }
                Box::new(group)
            }
        };
        Ok(filter)
    }
}

fn ensure_range(min: f64, max: f64, inclusive: bool) -> Result<(), FilterError> {
    let valid = if inclusive { min <= max } else { min < max };
    if valid {
        Ok(())
    } else {
        Err(FilterError::InvalidRange(format!("[{min}, {max}]")))
    }
}
