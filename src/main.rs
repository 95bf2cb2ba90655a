//! Command line front end for the template router.
//!
//! ```text
//! template-router hash <URL>
//! template-router check <MANIFEST>
//! template-router match <MANIFEST> <URL>...
//! template-router watch <MANIFEST>        (URLs on stdin, hot reload)
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use template_router::config::schema::parse_url;
use template_router::config::{load_config, ManifestWatcher, RouterConfig};
use template_router::observability::logging;
use template_router::routing::{content_hash, ConfigMap, RouteTable};

#[derive(Parser)]
#[command(name = "template-router")]
#[command(about = "Match URLs against registered URL templates", long_about = None)]
struct Cli {
    /// Log level override (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the content hash of a URL
    Hash { url: String },
    /// Validate a route manifest
    Check { manifest: PathBuf },
    /// Match URLs against a route manifest
    Match {
        manifest: PathBuf,
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Match URLs read from stdin, reloading the manifest on change
    Watch { manifest: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hash { url } => {
            init_logging(cli.log_level.as_deref(), None)?;
            println!("{}", content_hash(&parse_url(&url)?));
        }
        Commands::Check { manifest } => {
            let config = load(&manifest, cli.log_level.as_deref())?;
            let table = config.build_table()?;
            println!("{}: ok ({} templates)", manifest.display(), table.len());
        }
        Commands::Match { manifest, urls } => {
            let config = load(&manifest, cli.log_level.as_deref())?;
            let table = config.build_table()?;
            for url in &urls {
                print_match(&table, url);
            }
        }
        Commands::Watch { manifest } => {
            let config = load(&manifest, cli.log_level.as_deref())?;
            watch(&manifest, config).await?;
        }
    }

    Ok(())
}

fn init_logging(
    cli_level: Option<&str>,
    config: Option<&RouterConfig>,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = cli_level
        .or(config.map(|c| c.observability.log_level.as_str()))
        .unwrap_or("info")
        .to_ascii_lowercase();
    logging::init(&level)?;
    Ok(())
}

fn load(manifest: &Path, cli_level: Option<&str>) -> Result<RouterConfig, Box<dyn std::error::Error>> {
    let config = load_config(manifest)?;
    init_logging(cli_level, Some(&config))?;
    tracing::info!(
        manifest = %manifest.display(),
        routes = config.routes.len(),
        "Manifest loaded"
    );
    Ok(config)
}

fn print_match(table: &RouteTable<ConfigMap>, input: &str) {
    let url = match parse_url(input) {
        Ok(url) => url,
        Err(e) => {
            println!("{}\tinvalid url: {}", input, e);
            return;
        }
    };
    match table.resolve(&url) {
        Ok((hash, config)) => {
            let config = serde_json::to_string(&*config).unwrap_or_else(|_| "{}".to_string());
            println!("{}\t{}\t{}", input, hash, config);
        }
        Err(e) => println!("{}\t{}", input, e),
    }
}

async fn watch(manifest: &Path, config: RouterConfig) -> Result<(), Box<dyn std::error::Error>> {
    let table = Arc::new(ArcSwap::from_pointee(config.build_table()?));

    let (watcher, mut reloads) = ManifestWatcher::new(manifest);
    let _handle = watcher.run()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) if line.trim().is_empty() => continue,
                    Some(line) => print_match(&table.load(), line.trim()),
                    None => break,
                }
            }
            Some(new_table) = reloads.recv() => {
                table.store(Arc::new(new_table));
                tracing::info!("Route table swapped");
            }
        }
    }

    tracing::info!("Input closed, exiting");
    Ok(())
}
