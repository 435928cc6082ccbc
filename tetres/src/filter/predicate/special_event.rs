use crate::categorization::{ConditionDetail, EventTrafficType};
use crate::condition::ConditionClass;
use crate::filter::{ConditionMatch, Filter};

fn event_type(m: &ConditionMatch) -> Option<EventTrafficType> {
    match m.detail {
        ConditionDetail::SpecialEvent { event_type, .. } => Some(event_type),
        _ => None,
    }
}

/// an event within `distance_limit` miles of the route
pub fn has_special_event(distance_limit: f64) -> Filter {
    Filter::new("has_special_event", ConditionClass::SpecialEvent)
        .with_predicate(move |m| m.detail.distance().is_some_and(|d| d <= distance_limit))
}

pub fn no_special_event(distance_limit: f64) -> Filter {
    Filter::absent("no_special_event", ConditionClass::SpecialEvent)
        .with_predicate(move |m| m.detail.distance().is_some_and(|d| d > distance_limit))
}

fn traffic(name: &str, kind: EventTrafficType, distance_limit: f64) -> Filter {
    Filter::new(name, ConditionClass::SpecialEvent).with_predicate(move |m| {
        m.detail.distance().is_some_and(|d| d < distance_limit) && event_type(m) == Some(kind)
    })
}

pub fn arrival_traffic(distance_limit: f64) -> Filter {
    traffic("special_event_arrival", EventTrafficType::Arrival, distance_limit)
}

pub fn departure_traffic(distance_limit: f64) -> Filter {
    traffic(
        "special_event_departure",
        EventTrafficType::Departure,
        distance_limit,
    )
}

/// attendance in `[min, max)`
pub fn attendance(min: u32, max: u32) -> Filter {
    Filter::new("special_event_attendance", ConditionClass::SpecialEvent).with_predicate(
        move |m| {
            m.record
                .as_special_event()
                .is_some_and(|e| min <= e.attendance && e.attendance < max)
        },
    )
}

/// distance from the route in `[min, max)` miles
pub fn distance_range(min: f64, max: f64) -> Filter {
    Filter::new("special_event_distance", ConditionClass::SpecialEvent)
        .with_predicate(move |m| m.detail.distance().is_some_and(|d| min <= d && d < max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{ConditionRecord, SpecialEvent};
    use crate::filter::{CategorizedSample, SampleFilter};
    use chrono::NaiveDateTime;
    use tetres_core::model::{RouteId, SampleId, TravelTimeSample};

    fn sample_with(distance: f64, event_type: EventTrafficType) -> CategorizedSample {
        let time = NaiveDateTime::parse_from_str("2024-05-01 18:00", "%Y-%m-%d %H:%M")
            .expect("test invariant failed");
        let mut s = CategorizedSample::new(TravelTimeSample {
            id: SampleId(1),
            route_id: RouteId(1),
            time,
            travel_time: 5.0,
            moe: None,
        });
        s.push(
            ConditionClass::SpecialEvent,
            ConditionMatch {
                condition_id: 4,
                detail: ConditionDetail::SpecialEvent {
                    distance,
                    event_type,
                },
                record: ConditionRecord::SpecialEvent(SpecialEvent {
                    id: 4,
                    name: String::from("game"),
                    start: time,
                    end: time,
                    lat: 44.97,
                    lon: -93.25,
                    attendance: 38000,
                }),
            },
        );
        s
    }

    #[test]
    fn test_distance_limit_is_inclusive_for_presence() {
        let at_limit = sample_with(5.0, EventTrafficType::Arrival);
        assert!(has_special_event(5.0).matches(&at_limit));
        assert!(!no_special_event(5.0).matches(&at_limit));
        assert!(!arrival_traffic(5.0).matches(&at_limit));
        assert!(no_special_event(4.0).matches(&at_limit));
    }

    #[test]
    fn test_traffic_type_and_attendance() {
        let near = sample_with(1.2, EventTrafficType::Departure);
        assert!(departure_traffic(5.0).matches(&near));
        assert!(!arrival_traffic(5.0).matches(&near));
        assert!(attendance(30000, 40000).matches(&near));
        assert!(!attendance(0, 38000).matches(&near));
        assert!(distance_range(1.0, 2.0).matches(&near));
    }
}
