use crate::condition::ConditionClass;
use crate::filter::Filter;

pub fn has_snow_management() -> Filter {
    Filter::new("has_snow_management", ConditionClass::SnowManagement)
}

pub fn no_snow_management() -> Filter {
    Filter::absent("no_snow_management", ConditionClass::SnowManagement).with_predicate(|_| false)
}

/// lane capacity lost for at least `minutes`
pub fn snow_lane_lost_at_least(minutes: i64) -> Filter {
    Filter::new("snow_lane_lost_duration", ConditionClass::SnowManagement).with_predicate(
        move |m| {
            m.record
                .as_snow_management()
                .is_some_and(|s| (s.lane_regain_time - s.lane_lost_time).num_minutes() >= minutes)
        },
    )
}
