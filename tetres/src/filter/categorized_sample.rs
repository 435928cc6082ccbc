use crate::categorization::{CategorizationRow, ConditionDetail};
use crate::condition::{ConditionClass, ConditionRecord, ConditionSource};
use std::collections::{BTreeMap, HashMap};
use tetres_core::model::{SampleId, TravelTimeSample};

/// one condition record matched to a sample, with the relation computed
/// during categorization.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionMatch {
    pub condition_id: u64,
    pub detail: ConditionDetail,
    pub record: ConditionRecord,
}

/// a travel time sample and its matched conditions, grouped by class.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedSample {
    pub sample: TravelTimeSample,
    pub matches: BTreeMap<ConditionClass, Vec<ConditionMatch>>,
}

impl CategorizedSample {
    pub fn new(sample: TravelTimeSample) -> CategorizedSample {
        CategorizedSample {
            sample,
            matches: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, class: ConditionClass, item: ConditionMatch) {
        self.matches.entry(class).or_default().push(item);
    }

    /// matched conditions of one class, empty when there are none
    pub fn items(&self, class: ConditionClass) -> &[ConditionMatch] {
        self.matches.get(&class).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn has(&self, class: ConditionClass) -> bool {
        !self.items(class).is_empty()
    }

    pub fn vmt(&self) -> Option<f64> {
        self.sample.moe.map(|m| m.vmt)
    }
}

/// joins categorization rows to their samples and condition records. rows
/// for unknown samples or records that can no longer be found are dropped.
pub fn assemble_samples(
    samples: &[TravelTimeSample],
    rows: &[CategorizationRow],
    source: &dyn ConditionSource,
) -> Vec<CategorizedSample> {
    let mut result = samples
        .iter()
        .cloned()
        .map(CategorizedSample::new)
        .collect::<Vec<_>>();
    let index: HashMap<SampleId, usize> = samples
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.id, idx))
        .collect();
    let mut records: HashMap<(ConditionClass, u64), Option<ConditionRecord>> = HashMap::new();

    for row in rows.iter() {
        let Some(idx) = index.get(&row.sample_id) else {
            continue;
        };
        let record = records
            .entry((row.class, row.condition_id))
            .or_insert_with(|| source.record(row.class, row.condition_id));
        match record {
            Some(record) => result[*idx].push(
                row.class,
                ConditionMatch {
                    condition_id: row.condition_id,
                    detail: row.detail.clone(),
                    record: record.clone(),
                },
            ),
            None => log::warn!(
                "{} record {} of sample {} not found",
                row.class,
                row.condition_id,
                row.sample_id
            ),
        }
    }
    result
}
