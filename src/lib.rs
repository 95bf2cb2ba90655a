//! URL template router.
//!
//! Finds which registered URL template an incoming URL structurally
//! matches, so callers can key caches or settings on the template rather
//! than on the concrete URL.
//!
//! ```
//! use template_router::{RouteTable, RouterError};
//! use url::Url;
//!
//! let table = RouteTable::new();
//! let template = Url::parse("http://www.abcdefg.com/api/v1/users/:username/details?type=cached").unwrap();
//! table.register(&template, "users");
//!
//! let hit = Url::parse("http://www.abcdefg.com/api/v1/users/ken/details?type=cached&format=JSON").unwrap();
//! let hash = table.find(&hit).unwrap();
//! assert_eq!(table.get_config(&hash).as_deref(), Some(&"users"));
//!
//! let miss = Url::parse("http://www.abcdefg.com/api/v1/users/ken/details?format=JSON").unwrap();
//! assert_eq!(table.find(&miss), Err(RouterError::NoMatchFound));
//! ```

pub mod config;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use routing::{default_route_table, ConfigMap, Route, RouteTable, RouterError, RouterResult};
