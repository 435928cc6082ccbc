mod tetres_configuration;
mod worker_configuration;

pub use tetres_configuration::TetresConfiguration;
pub use worker_configuration::WorkerConfiguration;
