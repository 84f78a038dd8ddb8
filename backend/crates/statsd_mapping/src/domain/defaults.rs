//! Default Mapping Catalog
//!
//! Service-level counters and timers the rate-limit service always emits,
//! independent of any descriptor.

use super::mapping::{Labels, MappingRule, MatchType, MetricKind};

/// Static form of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultMapping {
    pub name: &'static str,
    pub pattern: &'static str,
    pub metric_kind: MetricKind,
    pub labels: &'static [(&'static str, &'static str)],
}

impl DefaultMapping {
    pub fn to_rule(&self) -> MappingRule {
        MappingRule {
            name: self.name.to_string(),
            pattern: self.pattern.to_string(),
            match_type: MatchType::Plain,
            metric_kind: self.metric_kind,
            labels: self
                .labels
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect::<Labels>(),
        }
    }
}

/// Catalog entries in output order
pub const DEFAULT_MAPPINGS: [DefaultMapping; 6] = [
    DefaultMapping {
        name: "ratelimit_service_should_rate_limit_error",
        pattern: "ratelimit.service.call.should_rate_limit.*",
        metric_kind: MetricKind::Counter,
        labels: &[("err_type", "$1")],
    },
    DefaultMapping {
        name: "ratelimit_service_total_requests",
        pattern: "ratelimit_server.*.total_requests",
        metric_kind: MetricKind::Counter,
        labels: &[("grpc_method", "$1")],
    },
    DefaultMapping {
        name: "ratelimit_service_response_time_seconds",
        pattern: "ratelimit_server.*.response_time",
        metric_kind: MetricKind::Histogram,
        labels: &[("grpc_method", "$1")],
    },
    DefaultMapping {
        name: "ratelimit_service_config_load_success",
        pattern: "ratelimit.service.config_load_success",
        metric_kind: MetricKind::Counter,
        labels: &[],
    },
    DefaultMapping {
        name: "ratelimit_service_config_load_error",
        pattern: "ratelimit.service.config_load_error",
        metric_kind: MetricKind::Counter,
        labels: &[],
    },
    DefaultMapping {
        name: "ratelimit_service_global_shadow_mode",
        pattern: "ratelimit.service.global_shadow_mode",
        metric_kind: MetricKind::Counter,
        labels: &[],
    },
];

/// Owned rules for the whole catalog
pub fn default_mappings() -> impl Iterator<Item = MappingRule> {
    DEFAULT_MAPPINGS.iter().map(DefaultMapping::to_rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let names: Vec<_> = default_mappings().map(|rule| rule.name).collect();
        assert_eq!(
            names,
            [
                "ratelimit_service_should_rate_limit_error",
                "ratelimit_service_total_requests",
                "ratelimit_service_response_time_seconds",
                "ratelimit_service_config_load_success",
                "ratelimit_service_config_load_error",
                "ratelimit_service_global_shadow_mode",
            ]
        );
    }

    #[test]
    fn test_catalog_entries_are_plain() {
        assert!(default_mappings().all(|rule| rule.match_type.is_plain()));
    }

    #[test]
    fn test_capturing_entries_have_one_placeholder() {
        let rules: Vec<_> = default_mappings().collect();
        assert_eq!(rules[0].labels.get("err_type").map(String::as_str), Some("$1"));
        assert_eq!(rules[1].labels.get("grpc_method").map(String::as_str), Some("$1"));
        assert_eq!(rules[2].metric_kind, MetricKind::Histogram);
        assert!(rules[3..].iter().all(|rule| rule.labels.is_empty()));
    }
}
