//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" shared by the generator crates:
//! - Common error types and result aliases
//! - Conversion from the I/O errors met while reading input and writing output
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all crates.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
