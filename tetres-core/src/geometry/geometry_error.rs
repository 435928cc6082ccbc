use thiserror::Error;

use crate::model::CorridorId;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("corridor '{0}' not found in corridor network")]
    CorridorNotFound(CorridorId),
    #[error("corridor '{0}' has no nodes")]
    EmptyCorridor(CorridorId),
    #[error("node '{0}' appears more than once in the corridor network")]
    DuplicateNode(String),
    #[error("node '{0}' cannot be resolved to a mile point")]
    UnresolvedNode(String),
    #[error("route has no nodes")]
    EmptyRoute,
}
