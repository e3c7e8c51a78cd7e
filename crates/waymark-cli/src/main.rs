//! Waymark CLI - your travel log from the command line
//!
//! Browses and updates the visited-city collection on a remote store.

use std::env;

use clap::Parser;

mod cli;
mod commands;
mod error;

use crate::cli::{Cli, Commands};
use crate::commands::add::{run_add, AddArgs};
use crate::commands::common::resolve_store_url;
use crate::commands::completions::run_completions;
use crate::commands::countries::run_countries;
use crate::commands::delete::run_delete;
use crate::commands::list::run_list;
use crate::commands::show::run_show;
use crate::error::CliError;

const STORE_URL_ENV: &str = "WAYMARK_STORE_URL";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("waymark=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { json } => {
            let base_url = resolve_store_url(cli.store_url, env::var(STORE_URL_ENV).ok())?;
            run_list(json, &base_url).await?;
        }
        Commands::Show { id } => {
            let base_url = resolve_store_url(cli.store_url, env::var(STORE_URL_ENV).ok())?;
            run_show(&id, &base_url).await?;
        }
        Commands::Add {
            name,
            country,
            emoji,
            lat,
            lng,
            date,
            notes,
        } => {
            let base_url = resolve_store_url(cli.store_url, env::var(STORE_URL_ENV).ok())?;
            let args = AddArgs {
                name: &name,
                country: &country,
                emoji: &emoji,
                lat,
                lng,
                date: date.as_deref(),
                notes: &notes,
            };
            run_add(args, &base_url).await?;
        }
        Commands::Delete { id } => {
            let base_url = resolve_store_url(cli.store_url, env::var(STORE_URL_ENV).ok())?;
            run_delete(&id, &base_url).await?;
        }
        Commands::Countries { json } => {
            let base_url = resolve_store_url(cli.store_url, env::var(STORE_URL_ENV).ok())?;
            run_countries(json, &base_url).await?;
        }
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
