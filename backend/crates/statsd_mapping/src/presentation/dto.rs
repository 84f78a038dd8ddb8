//! Document DTOs (Data Transfer Objects)
//!
//! Input: the persisted rate-limit resource shape, camelCase keys, one
//! optional field per action kind.
//! Output: the statsd exporter mapping file and the artifact envelope.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::application::build_statsd_config::StatsdConfigArtifact;
use crate::domain::action::Action;
use crate::domain::descriptor::DescriptorDefinition;
use crate::domain::mapping::{Labels, MappingConfiguration, MappingRule, MetricKind};
use crate::domain::services::ESCAPED_DOT;
use crate::error::{MappingError, MappingResult};

// ============================================================================
// Input
// ============================================================================

/// A descriptor definition as stored in the rate-limit resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalRateLimitDto {
    pub name: String,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub detailed_metric: bool,
    #[serde(default)]
    pub selector: SelectorDto,
    #[serde(default)]
    pub matcher: Vec<ActionDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorDto {
    #[serde(default)]
    pub route: Option<String>,
}

/// One matcher entry; exactly one field is expected to be set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_headers: Option<RequestHeadersDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_address: Option<RemoteAddressDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_key: Option<GenericKeyDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_value_match: Option<HeaderValueMatchDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestHeadersDto {
    pub descriptor_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAddressDto {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericKeyDto {
    #[serde(default)]
    pub descriptor_key: Option<String>,
    pub descriptor_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderValueMatchDto {
    pub descriptor_value: String,
}

/// Accepted top-level layouts of a descriptor file
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DescriptorDocument {
    List(Vec<GlobalRateLimitDto>),
    Wrapped { descriptors: Vec<GlobalRateLimitDto> },
}

impl DescriptorDocument {
    pub fn into_descriptors(self) -> Vec<GlobalRateLimitDto> {
        match self {
            DescriptorDocument::List(descriptors) => descriptors,
            DescriptorDocument::Wrapped { descriptors } => descriptors,
        }
    }
}

impl ActionDto {
    fn populated(&self) -> usize {
        [
            self.request_headers.is_some(),
            self.remote_address.is_some(),
            self.generic_key.is_some(),
            self.header_value_match.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// Convert into the domain action of descriptor `descriptor`, entry `index`
    pub fn into_action(self, descriptor: &str, index: usize) -> MappingResult<Action> {
        let populated = self.populated();
        let malformed = || MappingError::MalformedAction {
            descriptor: descriptor.to_string(),
            index,
            populated,
        };
        if populated != 1 {
            return Err(malformed());
        }

        match self {
            ActionDto {
                request_headers: Some(headers),
                ..
            } => Ok(Action::RequestHeaders {
                descriptor_key: headers.descriptor_key,
            }),
            ActionDto {
                remote_address: Some(_),
                ..
            } => Ok(Action::RemoteAddress),
            ActionDto {
                generic_key: Some(generic),
                ..
            } => Ok(Action::GenericKey {
                descriptor_key: generic.descriptor_key,
                descriptor_value: generic.descriptor_value,
            }),
            ActionDto {
                header_value_match: Some(header_match),
                ..
            } => Ok(Action::HeaderValueMatch {
                descriptor_value: header_match.descriptor_value,
            }),
            _ => Err(malformed()),
        }
    }
}

impl TryFrom<GlobalRateLimitDto> for DescriptorDefinition {
    type Error = MappingError;

    fn try_from(dto: GlobalRateLimitDto) -> Result<Self, Self::Error> {
        let actions = dto
            .matcher
            .into_iter()
            .enumerate()
            .map(|(index, action)| action.into_action(&dto.name, index))
            .collect::<MappingResult<Vec<_>>>()?;

        Ok(DescriptorDefinition {
            name: dto.name,
            identifier: dto.identifier,
            actions,
            route: dto.selector.route,
            detailed_metric: dto.detailed_metric,
        })
    }
}

// ============================================================================
// Output
// ============================================================================

/// The exporter's mapping file
#[derive(Debug, Clone, Serialize)]
pub struct MetricMapperDocument {
    pub mappings: Vec<MetricMappingDto>,
}

/// One entry of the exporter's mapping file
#[derive(Debug, Clone, Serialize)]
pub struct MetricMappingDto {
    #[serde(rename = "match")]
    pub pattern: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_metric_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,
}

/// Pattern as the exporter should read it
///
/// Regex patterns are kept as pre-quoted YAML scalars (`"a\\.b"`). Only the
/// compiler's own escaping is undone here: the outer quotes are dropped and
/// each [`ESCAPED_DOT`] becomes `\.`. Descriptor text is left untouched so a
/// backslash in a key or value reaches the exporter as written.
fn exporter_pattern(rule: &MappingRule) -> String {
    if rule.match_type.is_plain() {
        return rule.pattern.clone();
    }
    rule.pattern
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(&rule.pattern)
        .replace(ESCAPED_DOT, r"\.")
}

impl From<&MappingRule> for MetricMappingDto {
    fn from(rule: &MappingRule) -> Self {
        let (match_metric_type, timer_type) = match rule.metric_kind {
            MetricKind::Counter => (Some(MetricKind::Counter.as_str()), None),
            MetricKind::Histogram => (None, Some(MetricKind::Histogram.as_str())),
        };

        Self {
            pattern: exporter_pattern(rule),
            name: rule.name.clone(),
            match_type: (!rule.match_type.is_plain()).then_some("regex"),
            match_metric_type,
            timer_type,
            labels: rule.labels.clone(),
        }
    }
}

impl From<&MappingConfiguration> for MetricMapperDocument {
    fn from(config: &MappingConfiguration) -> Self {
        Self {
            mappings: config.iter().map(MetricMappingDto::from).collect(),
        }
    }
}

/// Artifact envelope in config map form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapDocument {
    pub api_version: &'static str,
    pub kind: &'static str,
    pub metadata: ObjectMetaDto,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectMetaDto {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
}

impl From<&StatsdConfigArtifact> for ConfigMapDocument {
    fn from(artifact: &StatsdConfigArtifact) -> Self {
        Self {
            api_version: "v1",
            kind: "ConfigMap",
            metadata: ObjectMetaDto {
                name: artifact.name.clone(),
                namespace: artifact.namespace.clone(),
                labels: artifact.labels.clone(),
            },
            data: artifact.data.clone(),
        }
    }
}
