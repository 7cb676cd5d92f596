pub mod allocation;
pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
