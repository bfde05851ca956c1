//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tabtidy: sort browser tabs by domain and cluster them into colored groups
#[derive(Parser, Debug)]
#[command(name = "tabtidy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clear the arrangement snapshot and sort the current window's tabs
    Sort(SortArgs),

    /// Watch for tabs finishing loading and keep the window sorted and grouped
    Watch(WatchArgs),

    /// Validate configuration and show bridge/storage status
    Doctor(DoctorArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Keep the stored arrangement instead of clearing it first
    ///
    /// With the snapshot intact an already-sorted window is a no-op.
    #[arg(long)]
    pub keep_history: bool,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Fire a single sort-and-group pass and exit
    #[arg(long)]
    pub once: bool,

    /// Override the poll interval in seconds
    #[arg(long)]
    pub poll_interval_secs: Option<u64>,
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}
