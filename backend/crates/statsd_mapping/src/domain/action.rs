//! Descriptor Actions
//!
//! The match conditions a rate-limit descriptor is built from, and the
//! encoder that turns an action chain into the token the rate-limit service
//! uses in its stat names.

use std::fmt;

/// Token emitted for a remote address action
pub const REMOTE_ADDRESS_TOKEN: &str = "remote_address";

/// Key used by a generic key action without an explicit descriptor key
pub const DEFAULT_GENERIC_KEY: &str = "generic_key";

/// Prefix used by header value match actions
pub const HEADER_MATCH_PREFIX: &str = "header_match";

/// One atomic match condition of a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Match on a request header, reported under the descriptor key
    RequestHeaders { descriptor_key: String },
    /// Match on the client address
    RemoteAddress,
    /// Constant key/value entry
    GenericKey {
        descriptor_key: Option<String>,
        descriptor_value: String,
    },
    /// Match when a set of headers matches, reported by value
    HeaderValueMatch { descriptor_value: String },
}

impl Action {
    /// Token this action contributes to the descriptor's stat name
    pub fn token(&self) -> String {
        match self {
            Action::RequestHeaders { descriptor_key } => descriptor_key.clone(),
            Action::RemoteAddress => REMOTE_ADDRESS_TOKEN.to_string(),
            Action::GenericKey {
                descriptor_key,
                descriptor_value,
            } => {
                let key = descriptor_key.as_deref().unwrap_or(DEFAULT_GENERIC_KEY);
                format!("{key}_{descriptor_value}")
            }
            Action::HeaderValueMatch { descriptor_value } => {
                format!("{HEADER_MATCH_PREFIX}_{descriptor_value}")
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// Encode an ordered action chain as one dot-joined token
///
/// `detailed_metric` does not change the token; detailed descriptors only
/// differ in how the token is matched later on.
pub fn encode_matcher(actions: &[Action], _detailed_metric: bool) -> String {
    actions
        .iter()
        .map(Action::token)
        .collect::<Vec<_>>()
        .join(".")
}
