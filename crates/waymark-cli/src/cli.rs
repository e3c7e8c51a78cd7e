use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "waymark")]
#[command(about = "Track the cities you have visited from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the remote city store
    #[arg(long, global = true, value_name = "URL")]
    pub store_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List visited cities
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one city in detail
    Show {
        /// City id
        id: String,
    },
    /// Mark a city as visited
    #[command(alias = "new")]
    Add {
        /// City name
        #[arg(long)]
        name: String,
        /// Country the city belongs to
        #[arg(long)]
        country: String,
        /// Flag emoji or two-letter country code
        #[arg(long)]
        emoji: String,
        /// Latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Visit date (RFC 3339 or YYYY-MM-DD); defaults to now
        #[arg(long)]
        date: Option<String>,
        /// Trip notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Delete a visited city
    Delete {
        /// City id
        id: String,
    },
    /// List the countries you have visited
    Countries {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
