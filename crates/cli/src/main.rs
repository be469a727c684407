//! docsync CLI
//!
//! Extracts documentation pages from a package's TypeDoc JSON output and
//! publishes them to the document store.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docsync::{publish, rollback};
use docsync_core::config::Config;
use docsync_extractor::extract;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "docsync")]
#[command(about = "Publish TypeDoc documentation as self-contained pages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (defaults to ./docsync.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the pages and publish them to storage
    Publish,
    /// Remove the current package version from storage
    Rollback,
    /// Extract the pages and print them as JSON without touching storage
    Extract {
        /// Write the JSON to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let (config, base_dir) = Config::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Publish => publish_docs(&config, &base_dir).await,
        Commands::Rollback => rollback_docs(&config, &base_dir).await,
        Commands::Extract { output } => extract_docs(&config, &base_dir, output.as_deref()),
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "docsync_core={level},docsync_extractor={level},docsync_storage={level},{}={level}",
            env!("CARGO_PKG_NAME")
        ))
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

async fn publish_docs(config: &Config, base_dir: &Path) -> Result<()> {
    let extraction = extract(&config.docs, base_dir).context("Failed to extract documentation")?;

    let store = docsync_storage::create_and_initialize_store(&config.storage)
        .await
        .context("Failed to open document store")?;

    let report = publish(store.as_ref(), config, &extraction)
        .await
        .context("Failed to publish documentation")?;

    info!(
        "Published {} {} ({} pages)",
        config.docs.package_name,
        extraction.version.version,
        report.page_ids.len()
    );
    Ok(())
}

async fn rollback_docs(config: &Config, base_dir: &Path) -> Result<()> {
    let package_dir = config.docs.resolve(base_dir, &config.docs.package);
    let version = docsync_extractor::read_package_version(&package_dir)
        .context("Failed to read package version")?;

    let store = docsync_storage::create_and_initialize_store(&config.storage)
        .await
        .context("Failed to open document store")?;

    rollback(store.as_ref(), &config.docs.package_name, &version.version)
        .await
        .context("Failed to roll back version")?;
    Ok(())
}

fn extract_docs(config: &Config, base_dir: &Path, output: Option<&Path>) -> Result<()> {
    let extraction = extract(&config.docs, base_dir).context("Failed to extract documentation")?;
    let json = serde_json::to_string_pretty(&extraction).context("Failed to serialize pages")?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} pages to {}", extraction.pages.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
