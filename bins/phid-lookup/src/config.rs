//! Command line for the lookup tool.

use std::path::PathBuf;

use clap::Parser;

/// Resolve PHIDs into handles
///
/// Objects are served from a JSON fixture file; PHID types without a built-in
/// handler can be routed to external loaders declared in a TOML config.
#[derive(Parser, Debug)]
#[command(name = "phid-lookup")]
#[command(about = "Resolve PHIDs into display handles", long_about = None)]
pub struct Config {
    /// JSON fixture with the objects to serve, one array per record type
    #[arg(long, env = "PHID_FIXTURES")]
    pub fixtures: Option<PathBuf>,

    /// Handle configuration file (resolver tuning and external loaders)
    #[arg(long, env = "PHID_CONFIG")]
    pub config: Option<String>,

    /// Resolve on behalf of this user PHID
    #[arg(long)]
    pub viewer: Option<String>,

    /// Viewer UTC offset in minutes, used to date status titles
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub utc_offset_minutes: i32,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// PHIDs to resolve
    #[arg(required = true)]
    pub phids: Vec<String>,
}
