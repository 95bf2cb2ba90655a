//! Template registry and lookup.
//!
//! # Responsibilities
//! - Store template routes bucketed by segment count
//! - Store opaque per-template configuration keyed by content hash
//! - Find the best-ranked template for an incoming URL
//!
//! # Design Decisions
//! - One `RwLock` guards both maps so a template is never visible without its config
//! - First registration of a hash wins; duplicates are dropped
//! - Ties go to the earliest registered template
//! - No removal: templates live as long as the table

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use url::Url;

use crate::observability::metrics;
use crate::routing::matcher::score;
use crate::routing::route::Route;
use crate::routing::types::{ConfigMap, Rank, RouterError, RouterResult};

struct TableState<C> {
    routes: HashMap<usize, Vec<Route>>,
    configs: HashMap<String, Arc<C>>,
}

impl<C> TableState<C> {
    fn find(&self, url: &Url) -> RouterResult<&Route> {
        if self.routes.is_empty() {
            return Err(RouterError::NoUrlRegistered);
        }

        let candidate = Route::from_url(url);
        let bucket = self
            .routes
            .get(&candidate.segment_count())
            .ok_or(RouterError::HostNotRegistered)?;

        let mut best: Option<(Rank, &Route)> = None;
        for template in bucket {
            let rank = score(template, &candidate);
            if rank > best.map_or(0, |(r, _)| r) {
                best = Some((rank, template));
            }
        }

        let (rank, template) = best.ok_or(RouterError::NoMatchFound)?;
        tracing::trace!(hash = %template.hash(), rank, "Template matched");
        Ok(template)
    }
}

/// Registry mapping URL templates to configuration.
///
/// Safe to share across threads; wrap in `Arc` or use
/// [`default_route_table`] for a process-wide instance.
pub struct RouteTable<C> {
    state: RwLock<TableState<C>>,
}

impl<C> RouteTable<C> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(TableState {
                routes: HashMap::new(),
                configs: HashMap::new(),
            }),
        }
    }

    /// Register a template URL with its configuration.
    ///
    /// Returns `false` if a URL with the same content hash was already
    /// registered; the earlier configuration is kept.
    pub fn register(&self, url: &Url, config: C) -> bool {
        let route = Route::from_url(url);
        let mut state = self.state.write();

        if state.configs.contains_key(route.hash()) {
            tracing::debug!(hash = %route.hash(), "Duplicate template ignored");
            metrics::record_registration(false);
            return false;
        }

        let segment_count = route.segment_count();
        tracing::debug!(hash = %route.hash(), segment_count, "Template registered");

        state.configs.insert(route.hash().to_string(), Arc::new(config));
        state.routes.entry(segment_count).or_default().push(route);

        metrics::record_registration(true);
        metrics::record_template_count(state.configs.len());
        true
    }

    /// Find the hash of the best-matching template for `url`.
    pub fn find(&self, url: &Url) -> RouterResult<String> {
        let result = self.state.read().find(url).map(|r| r.hash().to_string());
        metrics::record_lookup(result.as_ref().err());
        result
    }

    /// Configuration registered under `hash`, if any.
    pub fn get_config(&self, hash: &str) -> Option<Arc<C>> {
        self.state.read().configs.get(hash).cloned()
    }

    /// Find the best-matching template and return its hash and configuration.
    pub fn resolve(&self, url: &Url) -> RouterResult<(String, Arc<C>)> {
        let state = self.state.read();
        let result = state.find(url).and_then(|template| {
            state
                .configs
                .get(template.hash())
                .map(|config| (template.hash().to_string(), Arc::clone(config)))
                .ok_or(RouterError::NoMatchFound)
        });
        metrics::record_lookup(result.as_ref().err());
        result
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.state.read().configs.len()
    }

    /// Returns true if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C> Default for RouteTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for RouteTable<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        let mut buckets: Vec<_> = state.routes.iter().map(|(k, v)| (*k, v.len())).collect();
        buckets.sort_unstable();
        f.debug_struct("RouteTable")
            .field("templates", &state.configs.len())
            .field("buckets", &buckets)
            .finish()
    }
}

static DEFAULT_TABLE: Lazy<RouteTable<ConfigMap>> = Lazy::new(RouteTable::new);

/// Process-wide table, created on first use.
pub fn default_route_table() -> &'static RouteTable<ConfigMap> {
    &DEFAULT_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse(&format!("http://www.abcdefg.com{}", path)).unwrap()
    }

    #[test]
    fn test_empty_table() {
        let table: RouteTable<u32> = RouteTable::new();
        assert!(table.is_empty());
        assert_eq!(table.find(&url("/anything")), Err(RouterError::NoUrlRegistered));
        assert_eq!(table.find(&url("/")), Err(RouterError::NoUrlRegistered));
    }

    #[test]
    fn test_register_and_find() {
        let table = RouteTable::new();
        let template = url("/api/v1/users/:username/details?type=cached");
        assert!(table.register(&template, 60u32));

        let hash = table
            .find(&url("/api/v1/users/ken/details?type=cached&format=JSON"))
            .unwrap();
        assert_eq!(hash, Route::from_url(&template).hash());
        assert_eq!(table.get_config(&hash).as_deref(), Some(&60));
    }

    #[test]
    fn test_lookup_errors() {
        let table = RouteTable::new();
        table.register(&url("/api/v1/users/:username/details?type=cached"), ());

        assert_eq!(
            table.find(&url("/api/v1/users/ken/details?format=JSON")),
            Err(RouterError::NoMatchFound)
        );
        assert_eq!(
            table.find(&url("/api/v1/users/ken/details/extra")),
            Err(RouterError::HostNotRegistered)
        );
    }

    #[test]
    fn test_duplicate_registration_keeps_first_config() {
        let table = RouteTable::new();
        let template = url("/users/:id");
        assert!(table.register(&template, "first"));
        assert!(!table.register(&template, "second"));
        assert_eq!(table.len(), 1);

        let hash = table.find(&url("/users/7")).unwrap();
        assert_eq!(table.get_config(&hash).as_deref(), Some(&"first"));
    }

    #[test]
    fn test_most_specific_template_wins() {
        let table = RouteTable::new();
        table.register(&url("/api/v1/users/:username/details"), "generic");
        table.register(&url("/api/v1/users/ken/details"), "ken");

        let (_, config) = table.resolve(&url("/api/v1/users/ken/details")).unwrap();
        assert_eq!(*config, "ken");
        let (_, config) = table.resolve(&url("/api/v1/users/dennis/details")).unwrap();
        assert_eq!(*config, "generic");
    }

    #[test]
    fn test_ties_go_to_first_registered() {
        let table = RouteTable::new();
        table.register(&url("/users/:id"), "first");
        table.register(&url("/users/:name"), "second");
        table.register(&url("/:kind/:id"), "third");

        let (_, config) = table.resolve(&url("/users/42")).unwrap();
        assert_eq!(*config, "first");
    }

    #[test]
    fn test_get_config_unknown_hash() {
        let table: RouteTable<u8> = RouteTable::new();
        assert!(table.get_config("deadbeef").is_none());
    }

    #[test]
    fn test_default_table_is_shared() {
        assert!(std::ptr::eq(default_route_table(), default_route_table()));
    }
}
