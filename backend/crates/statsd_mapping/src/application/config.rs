//! Application Configuration
//!
//! Configuration for a generator run, read from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use kernel::error::app_error::{AppError, AppResult, OptionExt};

use super::build_statsd_config::{DEFAULT_MANAGED_BY, RateLimitService};

pub const ENV_SERVICE_NAME: &str = "RATELIMIT_SERVICE_NAME";
pub const ENV_SERVICE_NAMESPACE: &str = "RATELIMIT_SERVICE_NAMESPACE";
pub const ENV_DOMAIN: &str = "RATELIMIT_DOMAIN";
pub const ENV_DESCRIPTORS_PATH: &str = "RATELIMIT_DESCRIPTORS_PATH";
pub const ENV_OUTPUT: &str = "STATSD_OUTPUT";
pub const ENV_MANAGED_BY: &str = "STATSD_MANAGED_BY";

/// What the generator writes to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The full data object, mapping document embedded
    #[default]
    Artifact,
    /// The bare exporter mapping document
    Mappings,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "artifact" => Ok(OutputFormat::Artifact),
            "mappings" => Ok(OutputFormat::Mappings),
            other => Err(
                AppError::invalid_configuration(format!("unknown output format `{other}`"))
                    .with_action(format!("set {ENV_OUTPUT} to `artifact` or `mappings`")),
            ),
        }
    }
}

/// Generator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub service: RateLimitService,
    /// Rate-limit domain shared by every descriptor of the service
    pub domain: String,
    pub descriptors_path: PathBuf,
    pub output: OutputFormat,
    /// Value of the `app.kubernetes.io/managed-by` label
    pub managed_by: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            service: RateLimitService::new("ratelimit", "default"),
            domain: "ratelimit".to_string(),
            descriptors_path: PathBuf::from("descriptors.yaml"),
            output: OutputFormat::default(),
            managed_by: DEFAULT_MANAGED_BY.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| {
            get(key)
                .ok_or_config_err(format!("{key} is not set"))
                .map_err(|e| e.with_action(format!("export {key} or add it to .env")))
        };
        let defaults = Self::default();

        let service = RateLimitService::new(
            required(ENV_SERVICE_NAME)?,
            get(ENV_SERVICE_NAMESPACE).unwrap_or(defaults.service.namespace),
        );
        let output = match get(ENV_OUTPUT) {
            Some(raw) => raw.parse()?,
            None => defaults.output,
        };

        Ok(Self {
            service,
            domain: required(ENV_DOMAIN)?,
            descriptors_path: PathBuf::from(required(ENV_DESCRIPTORS_PATH)?),
            output,
            managed_by: get(ENV_MANAGED_BY).unwrap_or(defaults.managed_by),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::kind::ErrorKind;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = GeneratorConfig::from_lookup(lookup(&[
            (ENV_SERVICE_NAME, "public-ratelimit"),
            (ENV_DOMAIN, "public"),
            (ENV_DESCRIPTORS_PATH, "/etc/ratelimit/descriptors.yaml"),
        ]))
        .unwrap();

        assert_eq!(config.service.name, "public-ratelimit");
        assert_eq!(config.service.namespace, "default");
        assert_eq!(config.domain, "public");
        assert_eq!(
            config.descriptors_path,
            PathBuf::from("/etc/ratelimit/descriptors.yaml")
        );
        assert_eq!(config.output, OutputFormat::Artifact);
        assert_eq!(config.managed_by, DEFAULT_MANAGED_BY);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = GeneratorConfig::from_lookup(lookup(&[
            (ENV_SERVICE_NAME, "rl"),
            (ENV_SERVICE_NAMESPACE, "istio-system"),
            (ENV_DOMAIN, "public"),
            (ENV_DESCRIPTORS_PATH, "d.json"),
            (ENV_OUTPUT, "Mappings"),
            (ENV_MANAGED_BY, "platform-team"),
        ]))
        .unwrap();

        assert_eq!(config.service.namespace, "istio-system");
        assert_eq!(config.output, OutputFormat::Mappings);
        assert_eq!(config.managed_by, "platform-team");
    }

    #[test]
    fn test_from_lookup_missing_required() {
        let err = GeneratorConfig::from_lookup(lookup(&[
            (ENV_SERVICE_NAME, "rl"),
            (ENV_DOMAIN, "  "),
            (ENV_DESCRIPTORS_PATH, "d.yaml"),
        ]))
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        assert!(err.message().contains(ENV_DOMAIN));
        assert!(err.action().is_some());
    }

    #[test]
    fn test_output_format_rejects_unknown() {
        let err = "json".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }
}
