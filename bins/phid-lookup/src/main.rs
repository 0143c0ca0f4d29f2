//! phid-lookup - resolve PHIDs from the command line
//!
//! # Usage
//!
//! ```bash
//! # Resolve against a fixture
//! phid-lookup --fixtures fixtures.json PHID-TASK-abc PHID-USER-def
//!
//! # Route unknown types to external loaders and resolve as a viewer
//! RUST_LOG=phid_handles=debug phid-lookup --fixtures fixtures.json \
//!     --config handles.toml --viewer PHID-USER-def PHID-XYZ!-1
//! ```

mod config;
mod fixtures;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::FixedOffset;
use clap::Parser;
use config::Config;
use fixtures::Fixtures;
use phid_handles::handler::StaticLoaderFactory;
use phid_handles::{registry, HandleConfig, HandleResolver, Phid, Viewer};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let fixtures = match &config.fixtures {
        Some(path) => Fixtures::load(path)?,
        None => Fixtures::default(),
    };
    let handle_config = match &config.config {
        Some(path) => HandleConfig::new(path)?,
        None => HandleConfig::default(),
    };

    let registry = registry::from_config(
        &handle_config,
        fixtures.into_handlers(),
        vec![Arc::new(StaticLoaderFactory)],
    )
    .await?;
    let resolver = HandleResolver::with_config(Arc::new(registry), handle_config.resolver);

    let mut query = resolver.query(config.phids.iter().map(String::as_str));
    if let Some(viewer) = &config.viewer {
        let offset = FixedOffset::east_opt(config.utc_offset_minutes * 60)
            .context("UTC offset out of range")?;
        query = query.with_viewer(Viewer::new(viewer.as_str()).with_timezone(offset));
    }

    tracing::info!(phids = query.phids().len(), "resolving handles");
    let mut handles = query.load_handles().await?;

    // Print in request order.
    let ordered: Vec<_> = query
        .phids()
        .iter()
        .filter_map(|phid: &Phid| handles.remove(phid))
        .collect();

    let output = if config.compact {
        serde_json::to_string(&ordered)?
    } else {
        serde_json::to_string_pretty(&ordered)?
    };
    println!("{output}");
    Ok(())
}
