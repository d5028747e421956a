use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use catsays::application::SearchCoordinator;
use catsays::presentation::cli::{Cli, Commands, TuiCommand, search, words};
use catsays::presentation::tui;
use clap::Parser;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    let mut cli = Cli::parse();
    let command = cli
        .command
        .take()
        .unwrap_or_else(|| Commands::Tui(TuiCommand::default()));

    match command {
        Commands::Tui(cmd) => {
            init_tracing(Some(&cmd.log_path()))?;
            let client = Arc::new(cli.client()?);
            let search = SearchCoordinator::new(client.clone(), client, cli.debounce());
            tui::run(search, cmd.initial_query()).await
        }
        Commands::Search(cmd) => {
            init_tracing(None)?;
            let client = cli.client()?;
            search::run(&client, cmd).await
        }
        Commands::Suggest(cmd) => {
            init_tracing(None)?;
            let client = cli.client()?;
            words::suggest(&client, cmd).await
        }
        Commands::Parse(cmd) => words::parse(&cmd),
    }
}

/// Log to stderr, or to `log_file` when the terminal belongs to the UI.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_ansi(log_file.is_none())
                    .with_writer(writer),
            )
            .init();
    }

    Ok(())
}
