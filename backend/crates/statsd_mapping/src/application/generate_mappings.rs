//! Generate Mappings Use Case

use crate::domain::defaults::default_mappings;
use crate::domain::descriptor::DescriptorDefinition;
use crate::domain::mapping::MappingConfiguration;
use crate::domain::services::compile_descriptor;
use crate::error::MappingResult;

/// Builds the full mapping configuration for one rate-limit service
#[derive(Debug, Clone)]
pub struct GenerateMappingsUseCase {
    service_name: String,
    domain: String,
}

impl GenerateMappingsUseCase {
    pub fn new(service_name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            domain: domain.into(),
        }
    }

    /// Compile every addressable descriptor, then append the default catalog
    ///
    /// Descriptors without an identifier are skipped. The first descriptor
    /// that fails to compile aborts the whole run.
    pub fn execute(&self, descriptors: &[DescriptorDefinition]) -> MappingResult<MappingConfiguration> {
        let mut config = MappingConfiguration::new();
        let mut skipped = 0usize;

        for descriptor in descriptors {
            if !descriptor.is_addressable() {
                tracing::debug!(
                    descriptor = %descriptor.name,
                    "Skipping descriptor without identifier"
                );
                skipped += 1;
                continue;
            }

            config.extend(compile_descriptor(&self.service_name, &self.domain, descriptor)?);
        }

        config.extend(default_mappings());

        tracing::info!(
            service = %self.service_name,
            domain = %self.domain,
            descriptors = descriptors.len(),
            skipped,
            mappings = config.len(),
            "Generated statsd mappings"
        );

        Ok(config)
    }
}

/// Shorthand for a one-off [`GenerateMappingsUseCase`] run
pub fn generate_mappings(
    service_name: &str,
    domain: &str,
    descriptors: &[DescriptorDefinition],
) -> MappingResult<MappingConfiguration> {
    GenerateMappingsUseCase::new(service_name, domain).execute(descriptors)
}
