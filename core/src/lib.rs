//! FinFlow core: banking analytics over customer, transaction and loan records.

pub mod analytics_engine;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod quality;
pub mod report;
pub mod types;
pub mod writer;
