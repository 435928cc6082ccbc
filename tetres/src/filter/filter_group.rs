use super::{CategorizedSample, FilterError, SampleFilter};
use crate::condition::ConditionClass;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandLevel {
    Low,
    Moderate,
    High,
}

/// samples partitioned by route VMT. `low` holds samples below mean − 2σ,
/// `high` those at or above mean + 2σ. when every VMT is the same all
/// samples are moderate.
#[derive(Debug, Default)]
pub struct DemandSplit<'a> {
    pub low: Vec<&'a CategorizedSample>,
    pub moderate: Vec<&'a CategorizedSample>,
    pub high: Vec<&'a CategorizedSample>,
}

impl<'a> DemandSplit<'a> {
    pub fn level(&self, level: DemandLevel) -> &[&'a CategorizedSample] {
        match level {
            DemandLevel::Low => &self.low,
            DemandLevel::Moderate => &self.moderate,
            DemandLevel::High => &self.high,
        }
    }
}

/// a conjunction of filters with at most one single-slot filter per
/// condition class.
pub struct FilterGroup {
    name: String,
    filters: Vec<Box<dyn SampleFilter>>,
}

impl FilterGroup {
    pub fn new(name: &str) -> FilterGroup {
        FilterGroup {
            name: String::from(name),
            filters: vec![],
        }
    }

    pub fn add<F: SampleFilter + 'static>(&mut self, filter: F) -> Result<(), FilterError> {
        self.add_boxed(Box::new(filter))
    }

    pub fn add_boxed(&mut self, filter: Box<dyn SampleFilter>) -> Result<(), FilterError> {
        if let Some(slot) = filter.slot() {
            if self.slots().contains(&slot) {
                return Err(FilterError::DuplicateSlot {
                    group: self.name.clone(),
                    slot,
                });
            }
        }
        self.filters.push(filter);
        Ok(())
    }

    pub fn slots(&self) -> Vec<ConditionClass> {
        self.filters.iter().filter_map(|f| f.slot()).collect_vec()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// samples passing every filter of the group, in input order
    pub fn apply<'a>(&self, samples: &'a [CategorizedSample]) -> Vec<&'a CategorizedSample> {
        samples
            .iter()
            .zip(self.select(samples))
            .filter_map(|(s, selected)| selected.then_some(s))
            .collect_vec()
    }

    /// splits the samples passing the group into low, moderate and high
    /// demand by VMT. samples without congestion measures are left out.
    pub fn split_by_demand<'a>(&self, samples: &'a [CategorizedSample]) -> DemandSplit<'a> {
        let passed = self
            .apply(samples)
            .into_iter()
            .filter_map(|s| s.vmt().map(|vmt| (vmt, s)))
            .collect_vec();
        let mut split = DemandSplit::default();
        if passed.is_empty() {
            return split;
        }
        let n = passed.len() as f64;
        let mean = passed.iter().map(|(v, _)| v).sum::<f64>() / n;
        let variance = passed.iter().map(|(v, _)| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        if std_dev <= f64::EPSILON * mean.abs().max(1.0) {
            split.moderate = passed.into_iter().map(|(_, s)| s).collect_vec();
            return split;
        }
        let cut_low = mean - 2.0 * std_dev;
        let cut_high = mean + 2.0 * std_dev;
        log::debug!(
            "filter group '{}': vmt mean {:.2}, low cut {:.2}, high cut {:.2}",
            self.name,
            mean,
            cut_low,
            cut_high
        );
        for (vmt, sample) in passed {
            if vmt < cut_low {
                split.low.push(sample);
            } else if vmt < cut_high {
                split.moderate.push(sample);
            } else {
                split.high.push(sample);
            }
        }
        split
    }
}

impl SampleFilter for FilterGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, sample: &CategorizedSample) -> bool {
        self.filters.iter().all(|f| f.matches(sample))
    }

    fn select(&self, samples: &[CategorizedSample]) -> Vec<bool> {
        let mut selected = vec![true; samples.len()];
        for filter in self.filters.iter() {
            for (acc, flag) in selected.iter_mut().zip(filter.select(samples)) {
                *acc &= flag;
            }
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorization::ConditionDetail;
    use crate::condition::{ConditionRecord, Incident};
    use crate::filter::{And, ConditionMatch, Filter, Or};
    use chrono::{Duration, NaiveDateTime};
    use tetres_core::model::{RouteId, SampleId, TravelTimeSample};
    use tetres_core::MoeSummary;

    fn sample(minute: i64, vmt: f64) -> CategorizedSample {
        let time = NaiveDateTime::parse_from_str("2024-02-06 07:00", "%Y-%m-%d %H:%M")
            .expect("test invariant failed")
            + Duration::minutes(minute);
        CategorizedSample::new(TravelTimeSample {
            id: SampleId(minute as u64),
            route_id: RouteId(1),
            time,
            travel_time: 5.0,
            moe: Some(MoeSummary {
                vmt,
                ..Default::default()
            }),
        })
    }

    #[test]
    fn test_duplicate_slot_rejected() {
        let mut group = FilterGroup::new("g");
        group
            .add(Filter::new("a", ConditionClass::Weather))
            .expect("test invariant failed");
        let result = group.add(Filter::new("b", ConditionClass::Weather));
        assert!(matches!(
            result,
            Err(FilterError::DuplicateSlot {
                slot: ConditionClass::Weather,
                ..
            })
        ));
        // cross-class combinators carry no slot
        let either = Or::new(
            Filter::new("c", ConditionClass::Weather),
            Filter::new("d", ConditionClass::Incident),
        );
        assert_eq!(either.slot(), None);
        group.add(either).expect("test invariant failed");
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn test_combinators() {
        let s = sample(0, 10.0);
        let absent = Filter::absent("no_incident", ConditionClass::Incident);
        let present = Filter::new("incident", ConditionClass::Incident);
        assert!(Or::new(absent.clone(), present.clone()).matches(&s));
        assert!(!And::new(absent.clone(), present.clone()).matches(&s));
        assert_eq!(
            And::new(absent, present).slot(),
            Some(ConditionClass::Incident)
        );
    }

    #[test]
    fn test_split_by_demand() {
        let mut samples = (0..100).map(|i| sample(i, 100.0)).collect_vec();
        samples.push(sample(200, 400.0));
        samples.push(sample(205, 0.0));
        let group = FilterGroup::new("all");
        let split = group.split_by_demand(&samples);
        assert_eq!(split.level(DemandLevel::High).len(), 1);
        assert_eq!(split.level(DemandLevel::Low).len(), 1);
        assert_eq!(split.level(DemandLevel::Moderate).len(), 100);
        assert_eq!(split.high[0].sample.id, SampleId(200));
    }

    #[test]
    fn test_uniform_demand_is_moderate() {
        let samples = (0..10).map(|i| sample(i, 250.0)).collect_vec();
        let split = FilterGroup::new("all").split_by_demand(&samples);
        assert_eq!(split.moderate.len(), 10);
        assert!(split.low.is_empty() && split.high.is_empty());
    }

    #[test]
    fn test_apply_honours_kept_results() {
        let mut samples = (0..4).map(|i| sample(15 * i, 100.0)).collect_vec();
        let cdts = samples[0].sample.time;
        let incident = ConditionMatch {
            condition_id: 1,
            detail: ConditionDetail::Incident {
                distance: 0.0,
                off_distance: 0.0,
            },
            record: ConditionRecord::Incident(Incident {
                id: 1,
                incident_type: String::from("crash"),
                classification: None,
                severity: None,
                lat: 45.0,
                lon: -93.0,
                cdts,
                udts: None,
                xdts: None,
            }),
        };
        samples[0].push(ConditionClass::Incident, incident);
        let mut group = FilterGroup::new("incident");
        group
            .add(Filter::new("incident", ConditionClass::Incident).with_keep_minutes(30))
            .expect("test invariant failed");
        let ids = group
            .apply(&samples)
            .iter()
            .map(|s| s.sample.id)
            .collect_vec();
        // 30 minutes after the pass is no longer kept
        assert_eq!(ids, vec![SampleId(0), SampleId(15)]);
    }
}
