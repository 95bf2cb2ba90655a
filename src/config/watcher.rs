//! Manifest hot reload.
//!
//! # Responsibilities
//! - Watch the manifest's directory, so editors that replace the file are seen
//! - Reload, validate and build a fresh route table on every relevant event
//! - Hand complete tables to the owner over a channel
//!
//! # Design Decisions
//! - Only built tables are sent; a manifest that fails to load is logged and dropped
//! - Events for other files in the same directory are ignored

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::routing::router::RouteTable;
use crate::routing::types::ConfigMap;

/// Watches a route manifest and emits rebuilt tables.
pub struct ManifestWatcher {
    path: PathBuf,
    tables_tx: mpsc::UnboundedSender<RouteTable<ConfigMap>>,
}

impl ManifestWatcher {
    /// Create a watcher for `path` and the receiver for rebuilt tables.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RouteTable<ConfigMap>>) {
        let (tables_tx, tables_rx) = mpsc::unbounded_channel();
        (
            Self {
                path: path.to_path_buf(),
                tables_tx,
            },
            tables_rx,
        )
    }

    /// Start watching. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, tables_tx } = self;
        if !path.is_file() {
            return Err(notify::Error::path_not_found().add_path(path));
        }

        let file_name = path.file_name().map(OsString::from);
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let manifest = path.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches(&event, file_name.as_deref()) => {
                    let Some(table) = rebuild(&manifest) else { return };
                    if tables_tx.send(table).is_err() {
                        tracing::debug!(path = %manifest.display(), "Table receiver gone; reload discarded");
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Manifest watch error"),
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %path.display(), "Manifest watcher started");
        Ok(watcher)
    }
}

fn touches(event: &Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event.paths.iter().any(|p| p.file_name() == file_name)
}

fn rebuild(path: &Path) -> Option<RouteTable<ConfigMap>> {
    match load_config(path).and_then(|config| config.build_table()) {
        Ok(table) => {
            tracing::info!(path = %path.display(), templates = table.len(), "Manifest reloaded");
            Some(table)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Manifest rejected; keeping current routes");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use url::Url;

    const ONE_ROUTE: &str = "[[routes]]\nurl = \"/a/:id\"\n";
    const TWO_ROUTES: &str = "[[routes]]\nurl = \"/a/:id\"\n\n[[routes]]\nurl = \"/b/:id\"\n";

    #[test]
    fn test_missing_manifest_fails_to_watch() {
        let (watcher, _rx) = ManifestWatcher::new(Path::new("/nonexistent/template-router/routes.toml"));
        assert!(watcher.run().is_err());
    }

    #[tokio::test]
    async fn test_rewrite_sends_rebuilt_table() {
        let dir = std::env::temp_dir().join(format!("template-router-watch-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("routes.toml");
        fs::write(&path, ONE_ROUTE).unwrap();

        let (watcher, mut tables) = ManifestWatcher::new(&path);
        let _handle = watcher.run().unwrap();

        // A sibling file and an unparsable edit both produce nothing.
        fs::write(dir.join("other.toml"), TWO_ROUTES).unwrap();
        fs::write(&path, "[[routes]]\nurl = \n").unwrap();
        let quiet = tokio::time::timeout(Duration::from_millis(500), tables.recv()).await;
        assert!(quiet.is_err());

        fs::write(&path, TWO_ROUTES).unwrap();
        let table = tokio::time::timeout(Duration::from_secs(10), async {
            loop {
                match tables.recv().await {
                    Some(table) if table.len() == 2 => return table,
                    Some(_) => continue,
                    None => panic!("watcher channel closed"),
                }
            }
        })
        .await
        .expect("no reload within timeout");

        let url = Url::parse("http://localhost/b/7").unwrap();
        assert!(table.find(&url).is_ok());

        fs::remove_dir_all(dir).unwrap_or_default();
    }
}
