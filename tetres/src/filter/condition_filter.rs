use super::{CategorizedSample, ConditionMatch, SampleFilter};
use crate::condition::ConditionClass;
use chrono::NaiveDateTime;
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use tetres_core::model::RouteId;

/// a test over one matched condition record
pub type Predicate = Arc<dyn Fn(&ConditionMatch) -> bool + Send + Sync>;

/// outcome for a sample with no record in the filter's slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsencePolicy {
    #[default]
    Fails,
    Passes,
}

/// how many of a sample's records in the slot must satisfy each predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemPolicy {
    #[default]
    AnyItem,
    AllItems,
}

/// an ordered list of predicates bound to one condition class. a sample
/// passes when every predicate is satisfied by its records in the slot,
/// each predicate judged on its own under the [`ItemPolicy`].
///
/// with a keep duration, a sample that fails is still selected when a
/// sample of the same route passed less than that many minutes earlier.
#[derive(Clone)]
pub struct Filter {
    name: String,
    slot: ConditionClass,
    predicates: Vec<Predicate>,
    absence: AbsencePolicy,
    items: ItemPolicy,
    keep_minutes: i64,
}

impl Filter {
    pub fn new(name: &str, slot: ConditionClass) -> Filter {
        Filter {
            name: String::from(name),
            slot,
            predicates: vec![],
            absence: AbsencePolicy::default(),
            items: ItemPolicy::default(),
            keep_minutes: 0,
        }
    }

    pub fn with_predicate<F>(mut self, predicate: F) -> Filter
    where
        F: Fn(&ConditionMatch) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Arc::new(predicate));
        self
    }

    pub fn with_absence(mut self, absence: AbsencePolicy) -> Filter {
        self.absence = absence;
        self
    }

    pub fn with_items(mut self, items: ItemPolicy) -> Filter {
        self.items = items;
        self
    }

    /// carries a pass forward to the samples of the next `minutes`
    pub fn with_keep_minutes(mut self, minutes: i64) -> Filter {
        self.keep_minutes = minutes.max(0);
        self
    }

    /// passes samples without a record in the slot and requires every record
    /// present to satisfy the predicates
    pub fn absent(name: &str, slot: ConditionClass) -> Filter {
        Filter::new(name, slot)
            .with_absence(AbsencePolicy::Passes)
            .with_items(ItemPolicy::AllItems)
    }

    pub fn absence_policy(&self) -> AbsencePolicy {
        self.absence
    }

    pub fn item_policy(&self) -> ItemPolicy {
        self.items
    }

    pub fn keep_minutes(&self) -> i64 {
        self.keep_minutes
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    fn satisfies(&self, predicate: &Predicate, items: &[ConditionMatch]) -> bool {
        match self.items {
            ItemPolicy::AnyItem => items.iter().any(|i| predicate(i)),
            ItemPolicy::AllItems => items.iter().all(|i| predicate(i)),
        }
    }

    /// the predicates alone, without the absence policy
    fn evaluate(&self, items: &[ConditionMatch]) -> bool {
        if items.is_empty() {
            return false;
        }
        self.predicates.iter().all(|p| self.satisfies(p, items))
    }
}

impl SampleFilter for Filter {
    fn name(&self) -> &str {
        &self.name
    }

    /// judges one sample on its own, ignoring the keep duration
    fn matches(&self, sample: &CategorizedSample) -> bool {
        let items = sample.items(self.slot);
        if items.is_empty() {
            return self.absence == AbsencePolicy::Passes;
        }
        self.evaluate(items)
    }

    fn select(&self, samples: &[CategorizedSample]) -> Vec<bool> {
        if self.keep_minutes == 0 {
            return samples.iter().map(|s| self.matches(s)).collect_vec();
        }
        let mut selected = vec![false; samples.len()];
        let mut last_pass: HashMap<RouteId, NaiveDateTime> = HashMap::new();
        let order = (0..samples.len())
            .sorted_by_key(|idx| (samples[*idx].sample.route_id, samples[*idx].sample.time));
        for idx in order {
            let sample = &samples[idx].sample;
            let items = samples[idx].items(self.slot);
            // a pass on absence neither starts nor extends a carried result
            if items.is_empty() && self.absence == AbsencePolicy::Passes {
                selected[idx] = true;
                continue;
            }
            if self.evaluate(items) {
                last_pass.insert(sample.route_id, sample.time);
                selected[idx] = true;
                continue;
            }
            if let Some(prev) = last_pass.get(&sample.route_id).copied() {
                if (sample.time - prev).num_seconds() < self.keep_minutes * 60 {
                    selected[idx] = true;
                } else {
                    last_pass.remove(&sample.route_id);
                }
            }
        }
        selected
    }

    fn slot(&self) -> Option<ConditionClass> {
        Some(self.slot)
    }
}

impl Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter")
            .field("name", &self.name)
            .field("slot", &self.slot)
            .field("predicates", &self.predicates.len())
            .field("absence", &self.absence)
            .field("items", &self.items)
            .field("keep_minutes", &self.keep_minutes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorization::ConditionDetail;
    use crate::condition::{ConditionRecord, Incident};
    use chrono::NaiveDateTime;
    use tetres_core::model::{RouteId, SampleId, TravelTimeSample};

    fn time() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-02-06 07:15", "%Y-%m-%d %H:%M")
            .expect("test invariant failed")
    }

    fn sample() -> CategorizedSample {
        CategorizedSample::new(TravelTimeSample {
            id: SampleId(1),
            route_id: RouteId(1),
            time: time(),
            travel_time: 5.0,
            moe: None,
        })
    }

    fn sample_at(id: u64, minute: i64) -> CategorizedSample {
        CategorizedSample::new(TravelTimeSample {
            id: SampleId(id),
            route_id: RouteId(1),
            time: time() + chrono::Duration::minutes(minute),
            travel_time: 5.0,
            moe: None,
        })
    }

    fn typed_incident(id: u64, off_distance: f64, incident_type: &str) -> ConditionMatch {
        let mut m = incident_match(id, off_distance);
        if let ConditionRecord::Incident(i) = &mut m.record {
            i.incident_type = String::from(incident_type);
        }
        m
    }

    fn incident_match(id: u64, off_distance: f64) -> ConditionMatch {
        ConditionMatch {
            condition_id: id,
            detail: ConditionDetail::Incident {
                distance: off_distance,
                off_distance,
            },
            record: ConditionRecord::Incident(Incident {
                id,
                incident_type: String::from("crash"),
                classification: None,
                severity: None,
                lat: 45.0,
                lon: -93.0,
                cdts: time(),
                udts: None,
                xdts: None,
            }),
        }
    }

    fn near(m: &ConditionMatch) -> bool {
        m.detail.off_distance().is_some_and(|d| d.abs() <= 1.0)
    }

    #[test]
    fn test_absence_policy() {
        let s = sample();
        let fails = Filter::new("f", ConditionClass::Incident).with_predicate(near);
        let passes = Filter::absent("p", ConditionClass::Incident).with_predicate(near);
        assert!(!fails.matches(&s));
        assert!(passes.matches(&s));
    }

    #[test]
    fn test_item_policy() {
        let mut s = sample();
        s.push(ConditionClass::Incident, incident_match(1, 0.5));
        s.push(ConditionClass::Incident, incident_match(2, 4.0));
        let any = Filter::new("any", ConditionClass::Incident).with_predicate(near);
        let all = any.clone().with_items(ItemPolicy::AllItems);
        assert!(any.matches(&s));
        assert!(!all.matches(&s));
    }

    #[test]
    fn test_every_predicate_must_pass() {
        let mut s = sample();
        s.push(ConditionClass::Incident, incident_match(1, 0.5));
        let filter = Filter::new("f", ConditionClass::Incident)
            .with_predicate(near)
            .with_predicate(|m| m.condition_id == 2);
        assert_eq!(filter.len(), 2);
        assert!(!filter.matches(&s));
        // a record in another slot does not count
        let weather = Filter::new("w", ConditionClass::Weather);
        assert!(!weather.matches(&s));
    }

    #[test]
    fn test_predicates_may_be_satisfied_by_different_records() {
        let mut s = sample();
        s.push(ConditionClass::Incident, typed_incident(1, 0.5, "crash"));
        s.push(ConditionClass::Incident, typed_incident(2, 4.0, "stall"));
        let stall = |m: &ConditionMatch| {
            m.record
                .as_incident()
                .is_some_and(|i| i.incident_type == "stall")
        };
        let any = Filter::new("near stall", ConditionClass::Incident)
            .with_predicate(near)
            .with_predicate(stall);
        assert!(any.matches(&s));
        // every record has to satisfy each predicate
        let all = any.clone().with_items(ItemPolicy::AllItems);
        assert!(!all.matches(&s));
    }

    #[test]
    fn test_keep_minutes_carries_a_pass_forward() {
        let mut samples = (0..8).map(|i| sample_at(i as u64, 15 * i)).collect_vec();
        // incidents at 0 and 15 minutes, nothing afterwards
        samples[0].push(ConditionClass::Incident, incident_match(1, 0.0));
        samples[1].push(ConditionClass::Incident, incident_match(1, 0.0));
        let plain = Filter::new("incident", ConditionClass::Incident).with_predicate(near);
        let kept = plain.clone().with_keep_minutes(60);
        assert_eq!(
            plain.select(&samples),
            vec![true, true, false, false, false, false, false, false]
        );
        // 30, 45 and 60 minutes after the last pass at 15 are within 60
        assert_eq!(
            kept.select(&samples),
            vec![true, true, true, true, true, false, false, false]
        );
        // evaluation follows time order, not input order
        let reversed = samples.iter().rev().cloned().collect_vec();
        let mut expected = kept.select(&samples);
        expected.reverse();
        assert_eq!(kept.select(&reversed), expected);
    }

    #[test]
    fn test_pass_on_absence_does_not_start_a_kept_result() {
        let mut samples = (0..3).map(|i| sample_at(i as u64, 15 * i)).collect_vec();
        samples[1].push(ConditionClass::Incident, incident_match(1, 0.2));
        let filter = Filter::absent("no_incident", ConditionClass::Incident)
            .with_predicate(|m| !near(m))
            .with_keep_minutes(120);
        assert_eq!(filter.select(&samples), vec![true, false, true]);
    }
}
