//! Domain Layer - Mapping generation logic
//!
//! This layer contains:
//! - Descriptor definitions and their match actions
//! - The mapping rule output model
//! - Domain services (stat path encoding, pattern compiler, label merge)
//! - The default mapping catalog

pub mod action;
pub mod defaults;
pub mod descriptor;
pub mod mapping;
pub mod services;
