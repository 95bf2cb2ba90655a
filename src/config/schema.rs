//! Route manifest schema.
//!
//! All types derive Serde traits for deserialization from TOML manifests.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::routing::types::ConfigMap;

/// Base used to resolve manifest entries written as bare paths.
pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Root configuration: the templates to register plus process settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Template definitions, registered in file order.
    pub routes: Vec<RouteEntry>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A single template registration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteEntry {
    /// Label for logs; not used for matching.
    #[serde(default)]
    pub name: Option<String>,

    /// Template URL, absolute or a bare path (`/api/:id`).
    pub url: String,

    /// Opaque configuration returned on match.
    #[serde(default)]
    pub config: ConfigMap,
}

impl RouteEntry {
    /// Parse `url`, resolving bare paths against [`DEFAULT_BASE_URL`].
    pub fn parse_url(&self) -> Result<Url, url::ParseError> {
        parse_url(&self.url)
    }

    /// Name for log output, falling back to the URL.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.url)
    }
}

/// Parse an absolute URL or a bare path.
pub fn parse_url(input: &str) -> Result<Url, url::ParseError> {
    match Url::parse(input) {
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(DEFAULT_BASE_URL)?.join(input),
        other => other,
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
