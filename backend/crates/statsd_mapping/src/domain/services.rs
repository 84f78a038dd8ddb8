//! Domain Services
//!
//! Pure mapping compilation logic: stat path construction, the detailed
//! metric pattern compiler and label merging.

use super::action::encode_matcher;
use super::descriptor::DescriptorDefinition;
use super::mapping::{EventKind, Labels, MappingRule, MatchType, MetricKind};
use crate::error::{MappingError, MappingResult};

/// Separator placed between segments of a compiled regex pattern
///
/// Two backslashes: the pattern is kept as a quoted YAML scalar. Rendering
/// turns each separator back into `\.` for the exporter.
pub const ESCAPED_DOT: &str = r"\\.";

/// Leading path segments that are always matched literally
/// (`ratelimit`, `service`, `rate_limit`, `<domain>`)
pub const LITERAL_SEGMENTS: usize = 4;

/// Prefix of every per-descriptor stat emitted by the rate-limit service
pub const STAT_PREFIX: &str = "ratelimit.service.rate_limit";

/// Result of compiling one stat path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMatch {
    pub pattern: String,
    pub match_type: MatchType,
    /// Capture placeholders; empty for plain matches
    pub labels: Labels,
}

/// Build `ratelimit.service.rate_limit.<domain>.<token>.<event>`
pub fn stat_path(domain: &str, token: &str, event: EventKind) -> String {
    format!("{STAT_PREFIX}.{domain}.{token}.{event}")
}

/// Replace characters that are not valid in label names
pub fn normalize_segment(segment: &str) -> String {
    segment.replace('-', "_")
}

/// Compile a stat path into a match pattern and its capture labels
///
/// Plain mode returns the path untouched. Detailed mode keeps the first
/// [`LITERAL_SEGMENTS`] segments literal, turns every following segment
/// except the last into a `_?(.*)` capture group, and appends the last one
/// (the event kind) literally. Capture group `N` is labelled both by its
/// normalized segment name and by `keyN`, each valued `$N`.
pub fn compile_match(path: &str, detailed_metric: bool) -> CompiledMatch {
    if !detailed_metric {
        return CompiledMatch {
            pattern: path.to_string(),
            match_type: MatchType::Plain,
            labels: Labels::new(),
        };
    }

    let segments: Vec<&str> = path.split('.').collect();
    let (literal, rest) = segments.split_at(segments.len().min(LITERAL_SEGMENTS));

    let mut pattern = String::from("\"");
    pattern.push_str(&literal.join(ESCAPED_DOT));

    let mut labels = Labels::new();
    if let Some((last, captured)) = rest.split_last() {
        for (index, segment) in captured.iter().enumerate() {
            let group = index + 1;
            if segment.is_empty() {
                tracing::warn!(
                    path,
                    group,
                    "Detailed pattern captures an empty segment; its label name is empty"
                );
            }
            let segment = normalize_segment(segment);
            let placeholder = format!("${group}");

            pattern.push_str(ESCAPED_DOT);
            pattern.push_str(&segment);
            pattern.push_str("_?(.*)");

            labels.insert(segment, placeholder.clone());
            labels.insert(format!("key{group}"), placeholder);
        }

        pattern.push_str(ESCAPED_DOT);
        pattern.push_str(&normalize_segment(last));
    }
    pattern.push('"');

    CompiledMatch {
        pattern,
        match_type: MatchType::Regex,
        labels,
    }
}

/// Merge two label sets; `overrides` wins on key collision
pub fn merge_labels(base: &Labels, overrides: &Labels) -> Labels {
    let mut merged = base.clone();
    merged.extend(
        overrides
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );
    merged
}

/// Compile the six event-kind rules of one descriptor
///
/// The descriptor must carry both an identifier and a route; a missing one
/// is reported as [`MappingError::MissingField`].
pub fn compile_descriptor(
    service_name: &str,
    domain: &str,
    descriptor: &DescriptorDefinition,
) -> MappingResult<Vec<MappingRule>> {
    let missing = |field| MappingError::MissingField {
        descriptor: descriptor.name.clone(),
        field,
    };
    let identifier = descriptor
        .identifier
        .as_deref()
        .ok_or_else(|| missing("identifier"))?;
    let route = descriptor.route.as_deref().ok_or_else(|| missing("route"))?;

    let token = encode_matcher(&descriptor.actions, descriptor.detailed_metric);

    let static_labels = Labels::from([
        ("identifier".to_string(), identifier.to_string()),
        ("rate_limit_service_name".to_string(), service_name.to_string()),
        ("global_rate_limit_name".to_string(), descriptor.name.clone()),
        ("route".to_string(), route.to_string()),
    ]);

    let rules = EventKind::ALL
        .iter()
        .map(|&event| {
            let compiled = compile_match(
                &stat_path(domain, &token, event),
                descriptor.detailed_metric,
            );
            MappingRule {
                name: event.metric_name(),
                pattern: compiled.pattern,
                match_type: compiled.match_type,
                metric_kind: MetricKind::Histogram,
                labels: merge_labels(&static_labels, &compiled.labels),
            }
        })
        .collect();

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::action::Action;
    use tracing_test::traced_test;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_stat_path() {
        assert_eq!(
            stat_path("foo", "generic_key_v1", EventKind::NearLimit),
            "ratelimit.service.rate_limit.foo.generic_key_v1.near_limit"
        );
    }

    #[test]
    fn test_compile_plain_is_verbatim() {
        let path = "ratelimit.service.rate_limit.foo.x-user-id.over_limit";
        let compiled = compile_match(path, false);
        assert_eq!(compiled.pattern, path);
        assert_eq!(compiled.match_type, MatchType::Plain);
        assert!(compiled.labels.is_empty());
    }

    #[test]
    fn test_compile_detailed_single_segment() {
        let compiled = compile_match(
            "ratelimit.service.rate_limit.foo.generic_key_v1.near_limit",
            true,
        );
        assert_eq!(
            compiled.pattern,
            r#""ratelimit\\.service\\.rate_limit\\.foo\\.generic_key_v1_?(.*)\\.near_limit""#
        );
        assert_eq!(compiled.match_type, MatchType::Regex);
        assert_eq!(
            compiled.labels,
            labels(&[("generic_key_v1", "$1"), ("key1", "$1")])
        );
    }

    #[test]
    fn test_compile_detailed_indexes_left_to_right() {
        let compiled = compile_match(
            "ratelimit.service.rate_limit.foo.x-user-id.remote_address.header_match_get.total_hits",
            true,
        );
        assert_eq!(
            compiled.pattern,
            concat!(
                r#""ratelimit\\.service\\.rate_limit\\.foo"#,
                r"\\.x_user_id_?(.*)",
                r"\\.remote_address_?(.*)",
                r"\\.header_match_get_?(.*)",
                r#"\\.total_hits""#,
            )
        );
        assert_eq!(
            compiled.labels,
            labels(&[
                ("x_user_id", "$1"),
                ("key1", "$1"),
                ("remote_address", "$2"),
                ("key2", "$2"),
                ("header_match_get", "$3"),
                ("key3", "$3"),
            ])
        );
    }

    #[test]
    fn test_compile_detailed_label_count() {
        let compiled = compile_match("ratelimit.service.rate_limit.d.a.b.c.d.e.within_limit", true);
        assert_eq!(compiled.labels.len(), 2 * 5);
        assert!(compiled.labels.keys().all(|key| !key.contains('-')));
    }

    #[test]
    fn test_compile_detailed_without_captures() {
        // Only the event kind follows the domain: nothing to capture.
        let compiled = compile_match("ratelimit.service.rate_limit.foo.shadow_mode", true);
        assert_eq!(
            compiled.pattern,
            r#""ratelimit\\.service\\.rate_limit\\.foo\\.shadow_mode""#
        );
        assert!(compiled.labels.is_empty());
    }

    #[test]
    #[traced_test]
    fn test_compile_detailed_empty_segment_is_reported() {
        // An empty action chain leaves an empty token between domain and event.
        let compiled = compile_match("ratelimit.service.rate_limit.foo..near_limit", true);
        assert_eq!(
            compiled.pattern,
            r#""ratelimit\\.service\\.rate_limit\\.foo\\._?(.*)\\.near_limit""#
        );
        assert_eq!(compiled.labels, labels(&[("", "$1"), ("key1", "$1")]));
        assert!(logs_contain("captures an empty segment"));
    }

    #[test]
    #[traced_test]
    fn test_compile_detailed_named_segments_are_not_reported() {
        compile_match("ratelimit.service.rate_limit.foo.remote_address.near_limit", true);
        assert!(!logs_contain("captures an empty segment"));
    }

    #[test]
    fn test_merge_labels_overrides_win() {
        let base = labels(&[("identifier", "foo"), ("route", "bar")]);
        let overrides = labels(&[("route", "$1"), ("key1", "$1")]);
        let merged = merge_labels(&base, &overrides);
        assert_eq!(
            merged,
            labels(&[("identifier", "foo"), ("route", "$1"), ("key1", "$1")])
        );
    }

    #[test]
    fn test_merge_labels_idempotent() {
        let base = labels(&[("a", "1"), ("b", "2")]);
        let overrides = labels(&[("b", "3")]);
        let once = merge_labels(&base, &overrides);
        assert_eq!(merge_labels(&once, &overrides), once);
        assert_eq!(merge_labels(&base, &Labels::new()), base);
    }

    #[test]
    fn test_compile_descriptor_requires_route() {
        let descriptor = DescriptorDefinition::new("checkout")
            .with_identifier("checkout")
            .with_action(Action::RemoteAddress);
        let err = compile_descriptor("svc", "foo", &descriptor).unwrap_err();
        assert!(matches!(
            err,
            MappingError::MissingField { field: "route", .. }
        ));
    }

    #[test]
    fn test_compile_descriptor_dynamic_label_overrides_static() {
        // A header literally named `route` captures into the `route` label.
        let descriptor = DescriptorDefinition::new("by-route")
            .with_identifier("by-route")
            .with_route("api")
            .with_detailed_metric(true)
            .with_action(Action::RequestHeaders {
                descriptor_key: "route".to_string(),
            });
        let rules = compile_descriptor("svc", "foo", &descriptor).unwrap();
        assert_eq!(rules.len(), 6);
        for rule in &rules {
            assert_eq!(rule.labels.get("route").map(String::as_str), Some("$1"));
            assert_eq!(rule.labels.get("identifier").map(String::as_str), Some("by-route"));
        }
    }
}
