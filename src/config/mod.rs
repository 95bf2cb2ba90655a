//! Route manifest subsystem.
//!
//! # Data Flow
//! ```text
//! manifest file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → build_table() → RouteTable<ConfigMap>
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new manifest
//!     → validation.rs validates
//!     → build_table() → fresh RouteTable sent to the owner, who swaps it in
//! ```
//!
//! # Design Decisions
//! - A table is never edited in place; reload builds a new one
//! - All fields except `url` have defaults
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{ObservabilityConfig, RouteEntry, RouterConfig};
pub use validation::ValidationError;
pub use watcher::ManifestWatcher;
