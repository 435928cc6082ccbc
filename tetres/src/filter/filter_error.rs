use crate::condition::ConditionClass;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("filter group '{group}' already has a {slot} filter")]
    DuplicateSlot {
        group: String,
        slot: ConditionClass,
    },
    #[error("invalid filter range: {0}")]
    InvalidRange(String),
}
