use crate::categorization::ConditionDetail;
use crate::condition::{ConditionClass, WorkZone};
use crate::filter::{ConditionMatch, Filter};
use tetres_core::geometry::LocationType;

/// an overlapping work zone, or one whose gap to the route is strictly
/// inside the upstream or downstream limit
fn nearby(m: &ConditionMatch, upstream_limit: f64, downstream_limit: f64) -> bool {
    match m.detail.off_distance() {
        Some(off) if off == 0.0 => true,
        Some(off) if off < 0.0 => upstream_limit > off.abs(),
        Some(off) => downstream_limit > off,
        None => false,
    }
}

/// a work zone beyond the limits, which does not affect the route
fn remote(m: &ConditionMatch, upstream_limit: f64, downstream_limit: f64) -> bool {
    match m.detail.off_distance() {
        Some(off) if off < 0.0 => -upstream_limit > off,
        Some(off) if off > 0.0 => downstream_limit < off,
        _ => false,
    }
}

/// the work zone record and the sub-route the row matched
fn matched(m: &ConditionMatch) -> Option<(&WorkZone, u8)> {
    let wz = m.record.as_work_zone()?;
    match m.detail {
        ConditionDetail::WorkZone { route_num, .. } => Some((wz, route_num)),
        _ => None,
    }
}

pub fn has_work_zone(upstream_limit: f64, downstream_limit: f64) -> Filter {
    Filter::new("has_work_zone", ConditionClass::WorkZone)
        .with_predicate(move |m| nearby(m, upstream_limit, downstream_limit))
}

pub fn no_work_zone(upstream_limit: f64, downstream_limit: f64) -> Filter {
    Filter::absent("no_work_zone", ConditionClass::WorkZone)
        .with_predicate(move |m| remote(m, upstream_limit, downstream_limit))
}

pub fn work_zone_locations(locations: &[LocationType]) -> Filter {
    let locations = locations.to_vec();
    Filter::new("work_zone_location", ConditionClass::WorkZone)
        .with_predicate(move |m| m.detail.location().is_some_and(|l| locations.contains(&l)))
}

/// lanes closed on the matched direction
pub fn work_zone_lane_closed() -> Filter {
    Filter::new("work_zone_lane_closed", ConditionClass::WorkZone).with_predicate(|m| {
        matched(m).is_some_and(|(wz, n)| wz.features_for(n).any(|f| f.has_closed))
    })
}

pub fn work_zone_lane_shift() -> Filter {
    Filter::new("work_zone_lane_shift", ConditionClass::WorkZone).with_predicate(|m| {
        matched(m).is_some_and(|(wz, n)| wz.features_for(n).any(|f| f.has_shift))
    })
}

/// traffic crossed over into the opposing lanes
pub fn work_zone_crossover() -> Filter {
    Filter::new("work_zone_crossover", ConditionClass::WorkZone).with_predicate(|m| {
        matched(m).is_some_and(|(wz, n)| wz.features_for(n).any(|f| f.use_opposing_lane))
    })
}

/// total closed length on the matched direction in `[min, max)` miles
pub fn work_zone_closed_length(min: f64, max: f64) -> Filter {
    Filter::new("work_zone_closed_length", ConditionClass::WorkZone).with_predicate(move |m| {
        matched(m).is_some_and(|(wz, n)| {
            let length: f64 = wz.features_for(n).map(|f| f.closed_length).sum();
            min <= length && length < max
        })
    })
}

pub fn work_zone_lane_config(origin_lanes: u32, open_lanes: u32) -> Filter {
    Filter::new("work_zone_lane_config", ConditionClass::WorkZone).with_predicate(move |m| {
        matched(m).is_some_and(|(wz, n)| {
            wz.lane_configs_for(n)
                .any(|c| c.origin_lanes == origin_lanes && c.open_lanes == open_lanes)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{ConditionRecord, WorkZoneFeature, WorkZoneLaneConfig};
    use crate::filter::{CategorizedSample, SampleFilter};
    use chrono::NaiveDateTime;
    use tetres_core::model::{Route, RouteId, SampleId, TravelTimeSample};

    fn time() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-02-06 07:15", "%Y-%m-%d %H:%M")
            .expect("test invariant failed")
    }

    fn sample_with(location: LocationType, off_distance: f64, route_num: u8) -> CategorizedSample {
        let wz = WorkZone {
            id: 8,
            start: time(),
            end: time(),
            route1: Route::new(RouteId(1), "r1", vec![]),
            route2: Route::new(RouteId(2), "r2", vec![]),
            features: vec![WorkZoneFeature {
                route_num: 2,
                closed_length: 0.4,
                has_closed: true,
                has_shift: false,
                use_opposing_lane: true,
            }],
            lane_configs: vec![WorkZoneLaneConfig {
                route_num: 2,
                origin_lanes: 3,
                open_lanes: 2,
            }],
        };
        let mut s = CategorizedSample::new(TravelTimeSample {
            id: SampleId(1),
            route_id: RouteId(1),
            time: time(),
            travel_time: 5.0,
            moe: None,
        });
        s.push(
            ConditionClass::WorkZone,
            ConditionMatch {
                condition_id: 8,
                detail: ConditionDetail::WorkZone {
                    location,
                    distance: off_distance,
                    off_distance,
                    route_num,
                },
                record: ConditionRecord::WorkZone(wz),
            },
        );
        s
    }

    #[test]
    fn test_distance_window() {
        let inside = sample_with(LocationType::Inside, 0.0, 1);
        let far_down = sample_with(LocationType::Down, 12.0, 1);
        let near_up = sample_with(LocationType::Up, -3.0, 1);
        assert!(has_work_zone(10.0, 10.0).matches(&inside));
        assert!(!no_work_zone(10.0, 10.0).matches(&inside));
        assert!(!has_work_zone(10.0, 10.0).matches(&far_down));
        assert!(no_work_zone(10.0, 10.0).matches(&far_down));
        assert!(has_work_zone(10.0, 10.0).matches(&near_up));
        assert!(!has_work_zone(2.0, 10.0).matches(&near_up));
    }

    #[test]
    fn test_features_follow_matched_direction() {
        let on_route1 = sample_with(LocationType::Inside, 0.0, 1);
        let on_route2 = sample_with(LocationType::Inside, 0.0, 2);
        assert!(!work_zone_lane_closed().matches(&on_route1));
        assert!(work_zone_lane_closed().matches(&on_route2));
        assert!(work_zone_crossover().matches(&on_route2));
        assert!(!work_zone_lane_shift().matches(&on_route2));
        assert!(work_zone_lane_config(3, 2).matches(&on_route2));
        assert!(work_zone_closed_length(0.0, 0.5).matches(&on_route2));
        assert!(work_zone_locations(&[LocationType::Inside]).matches(&on_route1));
    }
}
