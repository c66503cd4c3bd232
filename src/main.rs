#![warn(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod config;
mod error;
mod fetch;
mod index;
mod parse;
mod store;
mod sync;

use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::{config::Config, store::Store, sync::Crawler};

pub use error::{Error, Result};

/// Keeps the Crous Montpellier restaurant, menu and school tables up to date.
#[derive(Debug, Parser)]
#[command(version, about)]
struct App {
    /// Work against an in-memory store, nothing is written to the database
    #[arg(long, global = true)]
    dry_run: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the tables
    Up,
    /// Rebuild the restaurant list with positions and opening hours
    Restaurants,
    /// Rebuild today's meals and the search keywords
    Meals,
    /// Read the opening hours of the known restaurants again
    Hours,
    /// Rebuild the school list from the open data catalog
    School,
    /// up, restaurants then meals
    Bootstrap,
    /// Check that a site answers, the restaurant listing by default
    Ping { url: Option<String> },
}

impl Command {
    const fn needs_database(&self) -> bool {
        !matches!(self, Self::Ping { .. })
    }
}

async fn run(app: &App, config: &Config) -> Result<()> {
    let store = if app.dry_run || !app.command.needs_database() {
        Store::memory()
    } else {
        Store::postgres(config.database_url()?).await?
    };
    let crawler = Crawler::new(config, store)?;

    let result = match &app.command {
        Command::Up => crawler.up().await,
        Command::Restaurants => crawler.refresh_roster().await.map(drop),
        Command::Meals => crawler.refresh_meals().await.map(drop),
        Command::Hours => crawler.refresh_hours().await.map(drop),
        Command::School => crawler.refresh_schools().await.map(drop),
        Command::Bootstrap => crawler.bootstrap().await.map(drop),
        Command::Ping { url } => crawler.ping(url.as_deref()).await,
    };

    match crawler.store() {
        Store::Memory(mem) if app.dry_run => log::info!("dry run kept {}", mem.summary().await),
        store => store.close().await,
    }
    result
}

fn init_logger() {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // a missing .env is fine, the environment may already be set
    let _ = dotenvy::dotenv();
    init_logger();
    let app = App::parse();

    let start = Utc::now();
    let result = match Config::from_env() {
        Ok(config) => run(&app, &config).await,
        Err(e) => Err(e),
    };
    let took = Utc::now().signed_duration_since(start);

    match result {
        Ok(()) => {
            log::info!("{:?} done in {}ms", app.command, took.num_milliseconds());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!(
                "{:?} failed after {}ms: {e}",
                app.command,
                took.num_milliseconds()
            );
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        App::command().debug_assert();
    }

    #[test]
    fn test_parse_commands() {
        let app = App::try_parse_from(["crous_crawler", "ping"]).unwrap();
        assert!(matches!(app.command, Command::Ping { url: None }));
        assert!(!app.command.needs_database());

        let app =
            App::try_parse_from(["crous_crawler", "ping", "https://example.org/"]).unwrap();
        assert!(matches!(app.command, Command::Ping { url: Some(ref u) } if u == "https://example.org/"));

        let app = App::try_parse_from(["crous_crawler", "meals", "--dry-run"]).unwrap();
        assert!(app.dry_run);
        assert!(app.command.needs_database());

        assert!(App::try_parse_from(["crous_crawler", "lunch"]).is_err());
    }
}
