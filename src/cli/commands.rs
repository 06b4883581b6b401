use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "msel", about = concat!("msel v", env!("CARGO_PKG_VERSION"), " - type to filter, pick many"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Picker config file (default: built-in chart demo)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Write the final selection back to the config file
    #[arg(long)]
    pub save: bool,

    /// Don't reload when the config file changes
    #[arg(long)]
    pub no_watch: bool,

    /// Append logs to this file (filter with MSEL_LOG, default "info")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show what the dropdown would offer for a query
    Filter(FilterArgs),
    /// List the option catalog
    Options,
    /// Write a starter config file
    Init(InitArgs),
}

#[derive(Args)]
pub struct FilterArgs {
    /// Text typed into the input
    #[arg(default_value = "")]
    pub query: String,
    /// Selected values, comma-separated (default: the config's `selected`)
    #[arg(short = 's', long, value_delimiter = ',')]
    pub selected: Option<Vec<String>>,
}

#[derive(Args)]
pub struct InitArgs {
    /// Where to write the config
    #[arg(default_value = "picker.toml")]
    pub path: PathBuf,
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
