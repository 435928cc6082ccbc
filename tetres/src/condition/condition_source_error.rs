use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConditionSourceError {
    #[error("failure reading condition file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("failure decoding condition file {0}: {1}")]
    DecodeError(String, serde_json::Error),
    #[error("condition source unavailable: {0}")]
    Unavailable(String),
}
