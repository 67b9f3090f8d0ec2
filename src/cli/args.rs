//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Per-language category tree datasets: fetch, trim, compress, checksum
#[derive(Parser, Debug)]
#[command(name = "cattree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d: info, -dd: debug, -ddd: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Output directory (default: XDG data dir or config file)
    #[arg(short = 'C', long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the dataset for one language
    Update {
        /// Language code, e.g. "en"
        language: String,

        /// Percentile of the page-count distribution below which nodes are
        /// dropped (0-100)
        #[arg(long)]
        pages_percentile: Option<u8>,

        /// Maximum depth kept after trimming
        #[arg(long)]
        max_depth: Option<u32>,
    },

    /// Rebuild the dataset for every configured language
    UpdateAll,

    /// List configured languages
    Languages,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
