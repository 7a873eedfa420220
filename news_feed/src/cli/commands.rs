use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the config file (news_feed.toml). Defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the live feed. Type `r` to refresh, `l` to list, `q` to quit.
    Run {
        /// Sector to show, or "All"
        #[arg(long, default_value = "All")]
        sector: String,
    },

    /// Run a single refresh cycle and print the feed
    Refresh {
        /// Comma-separated sectors to fetch instead of a random sample
        #[arg(long)]
        sectors: Option<String>,
    },

    /// Generate a trading insight for one story of the feed
    Insight {
        /// Id of the story (e.g. "s1")
        #[arg(long)]
        id: String,
    },

    /// List the sector catalog with feed counts
    Sectors,
}
