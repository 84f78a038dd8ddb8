//! Mapping Rules
//!
//! The output model: one [`MappingRule`] per exporter mapping entry,
//! collected into a [`MappingConfiguration`].

use std::collections::BTreeMap;
use std::fmt;

/// Label name to value (or `$N` capture placeholder)
///
/// Ordered so that rendered output is identical between runs.
pub type Labels = BTreeMap<String, String>;

/// How the exporter interprets a rule's match pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchType {
    /// Literal dot-path, `*` acting as a single-segment glob
    #[default]
    Plain,
    /// Quoted regular expression
    Regex,
}

impl MatchType {
    #[inline]
    pub const fn is_plain(&self) -> bool {
        matches!(self, MatchType::Plain)
    }
}

/// Kind of metric a rule produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Histogram,
}

impl MetricKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Histogram => "histogram",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rate-limit outcome tracked per descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    NearLimit,
    OverLimit,
    OverLimitWithLocalCache,
    TotalHits,
    WithinLimit,
    ShadowMode,
}

impl EventKind {
    /// Every event kind, in output order
    pub const ALL: [EventKind; 6] = [
        EventKind::NearLimit,
        EventKind::OverLimit,
        EventKind::OverLimitWithLocalCache,
        EventKind::TotalHits,
        EventKind::WithinLimit,
        EventKind::ShadowMode,
    ];

    /// Stat name suffix used by the rate-limit service
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventKind::NearLimit => "near_limit",
            EventKind::OverLimit => "over_limit",
            EventKind::OverLimitWithLocalCache => "over_limit_with_local_cache",
            EventKind::TotalHits => "total_hits",
            EventKind::WithinLimit => "within_limit",
            EventKind::ShadowMode => "shadow_mode",
        }
    }

    /// Exported metric name for this event kind
    pub fn metric_name(&self) -> String {
        format!("ratelimit_service_rate_limit_{}", self.as_str())
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exporter mapping entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRule {
    pub name: String,
    pub pattern: String,
    pub match_type: MatchType,
    pub metric_kind: MetricKind,
    pub labels: Labels,
}

/// Ordered set of mapping rules handed to the exporter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingConfiguration {
    pub mappings: Vec<MappingRule>,
}

impl MappingConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappingRule> {
        self.mappings.iter()
    }
}

impl Extend<MappingRule> for MappingConfiguration {
    fn extend<I: IntoIterator<Item = MappingRule>>(&mut self, iter: I) {
        self.mappings.extend(iter);
    }
}

impl<'a> IntoIterator for &'a MappingConfiguration {
    type Item = &'a MappingRule;
    type IntoIter = std::slice::Iter<'a, MappingRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.mappings.iter()
    }
}
