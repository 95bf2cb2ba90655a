//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing::router
//!     → tracing events (registrations, lookups)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → logging.rs subscriber (binary only, stderr)
//!     → whatever metrics recorder the embedding process installs
//! ```

pub mod logging;
pub mod metrics;
