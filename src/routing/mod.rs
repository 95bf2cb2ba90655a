//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     template URL + config
//!     → route.rs (decompose into segments, query, hash)
//!     → router.rs (bucket by segment count, store config by hash)
//!
//! Lookup:
//!     incoming URL
//!     → route.rs (decompose)
//!     → router.rs (pick bucket with same segment count)
//!     → matcher.rs (rank every template in the bucket)
//!     → Return: hash of best template, or RouterError
//! ```
//!
//! # Design Decisions
//! - Deterministic: same table and URL always yield the same template
//! - Literal segments outrank parameters
//! - Host is never part of matching

pub mod matcher;
pub mod route;
pub mod router;
pub mod types;

pub use matcher::score;
pub use route::{content_hash, Route, Segment};
pub use router::{default_route_table, RouteTable};
pub use types::{ConfigMap, Rank, RouterError, RouterResult};
