//! Descriptor Definition
//!
//! One rate-limit rule as supplied by the caller.

use super::action::Action;

/// A named rate-limit rule with an ordered chain of match actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorDefinition {
    /// Resource name, reported as `global_rate_limit_name`
    pub name: String,
    /// Descriptors without an identifier are not addressable in the metric space
    pub identifier: Option<String>,
    pub actions: Vec<Action>,
    /// Required once `identifier` is set
    pub route: Option<String>,
    pub detailed_metric: bool,
}

impl DescriptorDefinition {
    /// Create a descriptor with no identifier, route or actions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: None,
            actions: Vec::new(),
            route: None,
            detailed_metric: false,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_detailed_metric(mut self, detailed_metric: bool) -> Self {
        self.detailed_metric = detailed_metric;
        self
    }

    /// Whether this descriptor takes part in mapping generation
    pub fn is_addressable(&self) -> bool {
        self.identifier.is_some()
    }
}
