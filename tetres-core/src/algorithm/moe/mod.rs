mod moe_engine;
mod moe_kind;
pub mod moe_ops;
mod moe_parameters;
mod moe_summary;

pub use moe_engine::{compute_moe, compute_moe_summaries, MoeInputs};
pub use moe_kind::MoeKind;
pub use moe_parameters::MoeParameters;
pub use moe_summary::MoeSummary;
