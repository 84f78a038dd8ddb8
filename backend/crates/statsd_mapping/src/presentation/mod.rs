//! Presentation Layer
//!
//! Document formats the generator reads and writes.

pub mod dto;
pub mod render;
