use crate::condition::ConditionClass;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failure deleting {0} rows: {1}")]
    DeleteFailed(ConditionClass, String),
    #[error("failure inserting {0} rows: {1}")]
    InsertFailed(ConditionClass, String),
    #[error("failure committing {0} rows: {1}")]
    CommitFailed(ConditionClass, String),
    #[error("failure opening session for {0} rows: {1}")]
    SessionUnavailable(ConditionClass, String),
}
