//! Build Statsd Config Use Case
//!
//! Wraps a rendered mapping document into the data object the deployment
//! layer ships next to the exporter.

use std::collections::BTreeMap;

use crate::error::{MappingError, MappingResult};

/// Data key the exporter's mapping file is stored under
pub const MAPPING_CONF_KEY: &str = "statsd.mappingConf";

/// Suffix appended to the service name to name the artifact
pub const ARTIFACT_NAME_SUFFIX: &str = "-statsd-config";

/// Default value of the `app.kubernetes.io/managed-by` label
pub const DEFAULT_MANAGED_BY: &str = "istio-ratelimit-operator";

/// The rate-limit service the mappings are generated for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitService {
    pub name: String,
    pub namespace: String,
}

impl RateLimitService {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

/// Named, labelled data object holding the mapping document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsdConfigArtifact {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub data: BTreeMap<String, String>,
}

impl StatsdConfigArtifact {
    /// The embedded mapping document
    pub fn mapping_conf(&self) -> Option<&str> {
        self.data.get(MAPPING_CONF_KEY).map(String::as_str)
    }
}

/// Builder for [`StatsdConfigArtifact`]
#[derive(Debug, Clone)]
pub struct StatsdConfigBuilder {
    service: RateLimitService,
    mapping_conf: String,
    managed_by: String,
}

impl StatsdConfigBuilder {
    pub fn new(service: RateLimitService) -> Self {
        Self {
            service,
            mapping_conf: String::new(),
            managed_by: DEFAULT_MANAGED_BY.to_string(),
        }
    }

    pub fn mapping_conf(mut self, mapping_conf: impl Into<String>) -> Self {
        self.mapping_conf = mapping_conf.into();
        self
    }

    pub fn managed_by(mut self, managed_by: impl Into<String>) -> Self {
        self.managed_by = managed_by.into();
        self
    }

    pub fn artifact_name(&self) -> String {
        format!("{}{ARTIFACT_NAME_SUFFIX}", self.service.name)
    }

    fn labels(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("app.kubernetes.io/name".to_string(), self.artifact_name()),
            (
                "app.kubernetes.io/managed-by".to_string(),
                self.managed_by.clone(),
            ),
            (
                "app.kubernetes.io/created-by".to_string(),
                self.service.name.clone(),
            ),
        ])
    }

    pub fn build(self) -> MappingResult<StatsdConfigArtifact> {
        if self.service.name.trim().is_empty() {
            return Err(MappingError::InvalidServiceName);
        }

        let name = self.artifact_name();
        let labels = self.labels();
        Ok(StatsdConfigArtifact {
            name,
            namespace: self.service.namespace,
            labels,
            data: BTreeMap::from([(MAPPING_CONF_KEY.to_string(), self.mapping_conf)]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_names_and_labels() {
        let artifact = StatsdConfigBuilder::new(RateLimitService::new("public-ratelimit", "istio-system"))
            .mapping_conf("mappings: []\n")
            .build()
            .unwrap();

        assert_eq!(artifact.name, "public-ratelimit-statsd-config");
        assert_eq!(artifact.namespace, "istio-system");
        assert_eq!(
            artifact.labels.get("app.kubernetes.io/name").map(String::as_str),
            Some("public-ratelimit-statsd-config")
        );
        assert_eq!(
            artifact.labels.get("app.kubernetes.io/managed-by").map(String::as_str),
            Some(DEFAULT_MANAGED_BY)
        );
        assert_eq!(
            artifact.labels.get("app.kubernetes.io/created-by").map(String::as_str),
            Some("public-ratelimit")
        );
        assert_eq!(artifact.mapping_conf(), Some("mappings: []\n"));
    }

    #[test]
    fn test_build_custom_manager() {
        let artifact = StatsdConfigBuilder::new(RateLimitService::new("rl", "default"))
            .managed_by("platform-team")
            .build()
            .unwrap();
        assert_eq!(
            artifact.labels.get("app.kubernetes.io/managed-by").map(String::as_str),
            Some("platform-team")
        );
    }

    #[test]
    fn test_build_rejects_empty_service_name() {
        let result = StatsdConfigBuilder::new(RateLimitService::new(" ", "default")).build();
        assert!(matches!(result, Err(MappingError::InvalidServiceName)));
    }
}
