mod categorization_context;
mod categorization_engine;
mod categorization_error;
mod categorization_lock;
mod categorization_parameters;
mod categorization_result;
mod categorization_row;
mod categorization_store;
pub mod categorizer;
mod in_memory_store;
mod persistence_error;

pub use categorization_context::{CategorizationContext, SuppliedConditions};
pub use categorization_engine::{categorize, replace_rows};
pub use categorization_error::CategorizationError;
pub use categorization_lock::{CategorizationLock, NoopLock, SharedLock};
pub use categorization_parameters::CategorizationParameters;
pub use categorization_result::CategorizationResult;
pub use categorization_row::{CategorizationRow, ConditionDetail, EventTrafficType};
pub use categorization_store::{CategorizationSession, CategorizationStore};
pub use in_memory_store::InMemoryCategorizationStore;
pub use persistence_error::PersistenceError;
