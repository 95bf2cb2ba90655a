//! Shared utilities for integration tests.

use template_router::config::schema::parse_url;
use template_router::Route;
use url::Url;

pub const TEMPLATE: &str = "http://www.abcdefg.com/api/v1/users/:username/details?type=cached";

/// Parse an absolute URL or a bare path.
pub fn url(input: &str) -> Url {
    parse_url(input).unwrap()
}

/// Content hash a URL would be registered under.
#[allow(dead_code)]
pub fn hash_of(input: &str) -> String {
    Route::from_url(&url(input)).hash().to_string()
}
