//! Routing types and error definitions.

use thiserror::Error;

/// Match quality of a template against a candidate. Zero means no match.
pub type Rank = u32;

/// Opaque per-template configuration: string keys to arbitrary values.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// Errors returned by route lookup.
///
/// All three mean "no usable template was found"; they only differ in
/// how far the lookup got before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RouterError {
    /// No template shares the candidate's segment count.
    #[error("host not registered")]
    HostNotRegistered,

    /// Templates with the right segment count exist, but none scored above zero.
    #[error("no match found")]
    NoMatchFound,

    /// The table holds no templates at all.
    #[error("no url registered")]
    NoUrlRegistered,
}

impl RouterError {
    /// Stable label used for metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RouterError::HostNotRegistered => "host_not_registered",
            RouterError::NoMatchFound => "no_match_found",
            RouterError::NoUrlRegistered => "no_url_registered",
        }
    }
}

/// Result type for routing operations.
pub type RouterResult<T> = Result<T, RouterError>;
