use super::CategorizedSample;
use crate::condition::ConditionClass;

/// a boolean query over one categorized sample.
pub trait SampleFilter: Send + Sync {
    fn name(&self) -> &str;

    fn matches(&self, sample: &CategorizedSample) -> bool;

    /// one flag per sample, in input order. filters whose result depends on
    /// neighbouring samples override this.
    fn select(&self, samples: &[CategorizedSample]) -> Vec<bool> {
        samples.iter().map(|s| self.matches(s)).collect()
    }

    /// the condition class this filter reads, when it reads exactly one
    fn slot(&self) -> Option<ConditionClass> {
        None
    }
}

impl SampleFilter for Box<dyn SampleFilter> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn matches(&self, sample: &CategorizedSample) -> bool {
        (**self).matches(sample)
    }

    fn select(&self, samples: &[CategorizedSample]) -> Vec<bool> {
        (**self).select(samples)
    }

    fn slot(&self) -> Option<ConditionClass> {
        (**self).slot()
    }
}
