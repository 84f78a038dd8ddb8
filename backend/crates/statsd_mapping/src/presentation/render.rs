//! Document parsing and rendering

use std::path::Path;

use crate::application::build_statsd_config::StatsdConfigArtifact;
use crate::domain::descriptor::DescriptorDefinition;
use crate::domain::mapping::MappingConfiguration;
use crate::error::{MappingError, MappingResult};

use super::dto::{ConfigMapDocument, DescriptorDocument, MetricMapperDocument};

/// Serialization format of a descriptor file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

impl DocumentFormat {
    /// `.json` files are JSON, everything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Parse a descriptor file into domain descriptors, preserving order
pub fn parse_descriptors(
    raw: &str,
    format: DocumentFormat,
) -> MappingResult<Vec<DescriptorDefinition>> {
    let document: DescriptorDocument = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(raw).map_err(MappingError::InvalidYaml)?,
        DocumentFormat::Json => serde_json::from_str(raw)?,
    };

    document
        .into_descriptors()
        .into_iter()
        .map(DescriptorDefinition::try_from)
        .collect()
}

/// Render the exporter mapping file
pub fn render_mappings(config: &MappingConfiguration) -> MappingResult<String> {
    serde_yaml::to_string(&MetricMapperDocument::from(config)).map_err(MappingError::Render)
}

/// Render the artifact envelope
pub fn render_artifact(artifact: &StatsdConfigArtifact) -> MappingResult<String> {
    serde_yaml::to_string(&ConfigMapDocument::from(artifact)).map_err(MappingError::Render)
}
