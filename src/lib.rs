// src/lib.rs
pub mod types;
pub mod config;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod publishing;
pub mod sources;
pub mod deviation;
pub mod aggregator;
pub mod monitor;
