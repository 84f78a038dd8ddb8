//! Statsd Mapping Generator
//!
//! Builds the statsd exporter mapping configuration for a rate-limit
//! service from its descriptor definitions.
//!
//! Clean Architecture structure:
//! - `domain/` - Descriptor actions, mapping rules, compiler services, default catalog
//! - `application/` - Use cases (generate mappings, build the config artifact) and config
//! - `presentation/` - Descriptor input and exporter output documents
//!
//! ## Mapping Model
//! - Every descriptor with an identifier yields one rule per event kind
//!   (`near_limit`, `over_limit`, `over_limit_with_local_cache`,
//!   `total_hits`, `within_limit`, `shadow_mode`)
//! - Detailed-metric descriptors match by regex and expose each descriptor
//!   segment as a `$N` capture label
//! - Service-level defaults are always appended last
//! - Generation is pure and deterministic; it performs no I/O

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::build_statsd_config::{
    RateLimitService, StatsdConfigArtifact, StatsdConfigBuilder,
};
pub use application::config::{GeneratorConfig, OutputFormat};
pub use application::generate_mappings::{GenerateMappingsUseCase, generate_mappings};
pub use domain::action::{Action, encode_matcher};
pub use domain::descriptor::DescriptorDefinition;
pub use domain::mapping::{
    EventKind, Labels, MappingConfiguration, MappingRule, MatchType, MetricKind,
};
pub use domain::services::{compile_match, merge_labels};
pub use error::{MappingError, MappingResult};
pub use presentation::render::{DocumentFormat, parse_descriptors, render_artifact, render_mappings};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};
