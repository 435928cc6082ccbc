pub mod app;
pub mod categorization;
pub mod condition;
pub mod config;
pub mod filter;
pub mod reliability;
pub mod worker;
