//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every template URL parses
//! - Detect entries the table would silently drop as duplicates
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::route::content_hash;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no routes defined")]
    NoRoutes,

    #[error("route #{index} has an empty url")]
    EmptyUrl { index: usize },

    #[error("route #{index} has an invalid url '{url}': {reason}")]
    InvalidUrl {
        index: usize,
        url: String,
        reason: String,
    },

    #[error("route #{index} duplicates route #{first} ('{url}')")]
    DuplicateRoute {
        index: usize,
        first: usize,
        url: String,
    },

    #[error("unknown log level '{0}'")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    for (index, entry) in config.routes.iter().enumerate() {
        if entry.url.trim().is_empty() {
            errors.push(ValidationError::EmptyUrl { index });
            continue;
        }
        match entry.parse_url() {
            Ok(url) => match seen.entry(content_hash(&url)) {
                Entry::Occupied(e) => errors.push(ValidationError::DuplicateRoute {
                    index,
                    first: *e.get(),
                    url: entry.url.clone(),
                }),
                Entry::Vacant(e) => {
                    e.insert(index);
                }
            },
            Err(e) => errors.push(ValidationError::InvalidUrl {
                index,
                url: entry.url.clone(),
                reason: e.to_string(),
            }),
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
