//! URL decomposition.
//!
//! # Responsibilities
//! - Split the decoded URL path into positioned segments (literal or parameter)
//! - Normalize query parameters into a single value per key
//! - Fingerprint decoded path + raw query with SHA-256
//!
//! # Design Decisions
//! - Positions are indices into the raw `/` split; empty segments are
//!   skipped without shifting later positions
//! - The path is percent-decoded before splitting, so `%6Ben` matches `ken`
//!   and an encoded `%2F` separates segments
//! - A segment starting with `:` is a parameter, whatever follows the colon
//! - Repeated query values are sorted descending and joined with `,`, so
//!   value order in the URL does not matter

use std::borrow::Cow;
use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use sha2::{Digest, Sha256};
use url::Url;

/// One path segment of a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A fixed path component that must match exactly.
    Literal(String),
    /// A named parameter (`:name`) that accepts any value.
    Param,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw.starts_with(':') {
            Segment::Param
        } else {
            Segment::Literal(raw.to_string())
        }
    }
}

/// Structural breakdown of a URL used for template matching.
///
/// A `Route` is immutable once built; templates and candidates are both
/// represented this way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    host: String,
    segments: BTreeMap<usize, Segment>,
    query_params: BTreeMap<String, String>,
    hash: String,
}

impl Route {
    /// Decompose a parsed URL.
    pub fn from_url(url: &Url) -> Self {
        let path = decoded_path(url);
        let segments = path
            .split('/')
            .enumerate()
            .filter(|(_, raw)| !raw.is_empty())
            .map(|(position, raw)| (position, Segment::parse(raw)))
            .collect();

        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in url.query_pairs() {
            grouped
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
        let query_params = grouped
            .into_iter()
            .map(|(key, mut values)| {
                values.sort_unstable_by(|a, b| b.cmp(a));
                (key, values.join(","))
            })
            .collect();

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };

        Self {
            host,
            segments,
            query_params,
            hash: hash_path_and_query(&path, url.query()),
        }
    }

    /// The URL authority. Stored only; never used for matching.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Positioned path segments.
    pub fn segments(&self) -> &BTreeMap<usize, Segment> {
        &self.segments
    }

    /// Number of non-empty path segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Normalized query parameters.
    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query_params
    }

    /// Hex-encoded content fingerprint of path and raw query.
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

fn decoded_path(url: &Url) -> Cow<'_, str> {
    percent_decode_str(url.path()).decode_utf8_lossy()
}

/// Hex-encoded SHA-256 of the decoded URL path, followed by `?` and the raw
/// query when the query is non-empty.
pub fn content_hash(url: &Url) -> String {
    hash_path_and_query(&decoded_path(url), url.query())
}

fn hash_path_and_query(path: &str, query: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        hasher.update(b"?");
        hasher.update(query.as_bytes());
    }
    hex::encode(hasher.finalize())
}
