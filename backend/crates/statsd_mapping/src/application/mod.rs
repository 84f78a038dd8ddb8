//! Application Layer - Use Cases
//!
//! Orchestrates the domain services into complete generator runs.

pub mod build_statsd_config;
pub mod config;
pub mod generate_mappings;
