//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::router::RouteTable;
use crate::routing::types::ConfigMap;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    Url { url: String, source: url::ParseError },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::Url { url, source } => write!(f, "Invalid url '{}': {}", url, source),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: RouterConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

impl RouterConfig {
    /// Register every route entry, in file order, into a fresh table.
    pub fn build_table(&self) -> Result<RouteTable<ConfigMap>, ConfigError> {
        let table = RouteTable::new();
        for entry in &self.routes {
            let url = entry.parse_url().map_err(|source| ConfigError::Url {
                url: entry.url.clone(),
                source,
            })?;
            if !table.register(&url, entry.config.clone()) {
                tracing::warn!(route = %entry.display_name(), "Duplicate route skipped");
            }
        }
        tracing::info!(templates = table.len(), "Route table built");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_manifest(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.toml", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_and_build() {
        let path = write_manifest(
            "template-router-load",
            r#"
            [[routes]]
            url = "/api/v1/users/:username/details?type=cached"
            [routes.config]
            ttl_secs = 30
            "#,
        );

        let config = load_config(&path).unwrap();
        let table = config.build_table().unwrap();
        assert_eq!(table.len(), 1);

        let url = url::Url::parse("http://localhost/api/v1/users/ken/details?type=cached").unwrap();
        let (_, conf) = table.resolve(&url).unwrap();
        assert_eq!(conf["ttl_secs"], serde_json::json!(30));

        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/routes.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let path = write_manifest("template-router-parse", "[[routes]\nurl = ");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn test_validation_error() {
        let path = write_manifest("template-router-invalid", "[observability]\nlog_level = \"info\"\n");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("no routes defined"));
        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn test_build_skips_duplicates() {
        let mut config = RouterConfig::default();
        for url in ["/a/:id", "/a/:id"] {
            config.routes.push(crate::config::schema::RouteEntry {
                name: None,
                url: url.to_string(),
                config: Default::default(),
            });
        }
        assert_eq!(config.build_table().unwrap().len(), 1);
    }
}
