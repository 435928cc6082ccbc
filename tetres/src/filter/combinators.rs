use super::{CategorizedSample, SampleFilter};
use crate::condition::ConditionClass;

fn shared_slot(left: &dyn SampleFilter, right: &dyn SampleFilter) -> Option<ConditionClass> {
    match (left.slot(), right.slot()) {
        (Some(a), Some(b)) if a == b => Some(a),
        _ => None,
    }
}

/// passes when both filters pass
pub struct And {
    name: String,
    left: Box<dyn SampleFilter>,
    right: Box<dyn SampleFilter>,
}

impl And {
    pub fn new<A, B>(left: A, right: B) -> And
    where
        A: SampleFilter + 'static,
        B: SampleFilter + 'static,
    {
        And {
            name: format!("({} and {})", left.name(), right.name()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl SampleFilter for And {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, sample: &CategorizedSample) -> bool {
        self.left.matches(sample) && self.right.matches(sample)
    }

    fn select(&self, samples: &[CategorizedSample]) -> Vec<bool> {
        let right = self.right.select(samples);
        self.left
            .select(samples)
            .into_iter()
            .zip(right)
            .map(|(l, r)| l && r)
            .collect()
    }

    fn slot(&self) -> Option<ConditionClass> {
        shared_slot(self.left.as_ref(), self.right.as_ref())
    }
}

/// passes when either filter passes
pub struct Or {
    name: String,
    left: Box<dyn SampleFilter>,
    right: Box<dyn SampleFilter>,
}

impl Or {
    pub fn new<A, B>(left: A, right: B) -> Or
    where
        A: SampleFilter + 'static,
        B: SampleFilter + 'static,
    {
        Or {
            name: format!("({} or {})", left.name(), right.name()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl SampleFilter for Or {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, sample: &CategorizedSample) -> bool {
        self.left.matches(sample) || self.right.matches(sample)
    }

    fn select(&self, samples: &[CategorizedSample]) -> Vec<bool> {
        let right = self.right.select(samples);
        self.left
            .select(samples)
            .into_iter()
            .zip(right)
            .map(|(l, r)| l || r)
            .collect()
    }

    fn slot(&self) -> Option<ConditionClass> {
        shared_slot(self.left.as_ref(), self.right.as_ref())
    }
}
