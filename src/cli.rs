use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "airtime")]
#[command(author, version, about = "Best-effort media duration resolution")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the duration of a media file through the strategy chain
    Resolve {
        /// File to resolve; may use a virtual scheme (nfs://, smb://)
        #[arg(required = true)]
        path: String,

        /// Output the tagged resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read the duration byte-level only, no external tools
    Container {
        /// File to parse
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Check that the external probing tools are available
    CheckTools,

    /// Validate a configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },
}
