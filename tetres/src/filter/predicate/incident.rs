use crate::condition::ConditionClass;
use crate::filter::{ConditionMatch, Filter};

fn within(m: &ConditionMatch, upstream_limit: f64, downstream_limit: f64) -> bool {
    m.detail
        .off_distance()
        .is_some_and(|off| -upstream_limit <= off && off <= downstream_limit)
}

/// an incident within the given miles upstream or downstream of the route
pub fn has_incident(upstream_limit: f64, downstream_limit: f64) -> Filter {
    Filter::new("has_incident", ConditionClass::Incident)
        .with_predicate(move |m| within(m, upstream_limit, downstream_limit))
}

/// no incident within the given miles of the route
pub fn no_incident(upstream_limit: f64, downstream_limit: f64) -> Filter {
    Filter::absent("no_incident", ConditionClass::Incident)
        .with_predicate(move |m| !within(m, upstream_limit, downstream_limit))
}

pub fn incident_types(types: &[&str]) -> Filter {
    let types = types.iter().map(|t| t.to_lowercase()).collect::<Vec<_>>();
    Filter::new("incident_type", ConditionClass::Incident).with_predicate(move |m| {
        m.record
            .as_incident()
            .is_some_and(|i| types.contains(&i.incident_type.to_lowercase()))
    })
}

/// severity in `[min, max]`
pub fn incident_severity(min: i32, max: i32) -> Filter {
    Filter::new("incident_severity", ConditionClass::Incident).with_predicate(move |m| {
        m.record
            .as_incident()
            .and_then(|i| i.severity)
            .is_some_and(|s| min <= s && s <= max)
    })
}

pub fn incident_classifications(classifications: &[&str]) -> Filter {
    let classifications = classifications
        .iter()
        .map(|c| c.to_lowercase())
        .collect::<Vec<_>>();
    Filter::new("incident_classification", ConditionClass::Incident).with_predicate(move |m| {
        m.record
            .as_incident()
            .and_then(|i| i.classification.as_ref())
            .is_some_and(|c| classifications.contains(&c.to_lowercase()))
    })
}
