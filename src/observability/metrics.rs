//! Metrics collection.
//!
//! # Metrics
//! - `route_table_registrations_total` (counter): registrations by outcome
//! - `route_table_lookups_total` (counter): lookups by outcome
//! - `route_table_templates` (gauge): registered template count
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the embedding process picks the exporter
//! - Without an installed recorder every call is a no-op

use crate::routing::types::RouterError;

/// Record a registration attempt.
pub fn record_registration(stored: bool) {
    let outcome = if stored { "stored" } else { "duplicate" };
    metrics::counter!("route_table_registrations_total", "outcome" => outcome).increment(1);
}

/// Record a lookup and its outcome.
pub fn record_lookup(error: Option<&RouterError>) {
    let outcome = error.map_or("hit", RouterError::as_label);
    metrics::counter!("route_table_lookups_total", "outcome" => outcome).increment(1);
}

/// Record the number of registered templates.
pub fn record_template_count(count: usize) {
    metrics::gauge!("route_table_templates").set(count as f64);
}
