mod categorized_sample;
mod combinators;
mod condition_filter;
mod filter_config;
mod filter_error;
mod filter_group;
pub mod predicate;
mod sample_filter;

pub use categorized_sample::{assemble_samples, CategorizedSample, ConditionMatch};
pub use combinators::{And, Or};
pub use condition_filter::{AbsencePolicy, Filter, ItemPolicy, Predicate};
pub use filter_config::FilterConfig;
pub use filter_error::FilterError;
pub use filter_group::{DemandLevel, DemandSplit, FilterGroup};
pub use sample_filter::SampleFilter;
