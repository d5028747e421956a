pub mod search;
pub mod words;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::infrastructure::client::CatsayClient;
use search::SearchCommand;
use words::{ParseCommand, SuggestCommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Search for cats as you type", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "CATSAYS_CAT_URL",
        default_value = "https://cataas.com"
    )]
    pub cat_url: String,

    #[arg(
        long,
        global = true,
        env = "CATSAYS_WORDS_URL",
        default_value = "https://api.datamuse.com"
    )]
    pub words_url: String,

    /// Quiet period after the last keystroke before a search fires
    #[arg(long, global = true, env = "CATSAYS_DEBOUNCE_MS", default_value_t = 600)]
    pub debounce_ms: u64,

    #[arg(long, global = true, env = "CATSAYS_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn client(&self) -> Result<CatsayClient> {
        CatsayClient::from_base_urls(
            &self.cat_url,
            &self.words_url,
            Duration::from_secs(self.timeout_secs),
        )
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive search-as-you-type screen (the default)
    Tui(TuiCommand),

    /// Fetch one cat for a query and report what came back
    Search(SearchCommand),

    /// Look up word completions for a prefix
    Suggest(SuggestCommand),

    /// Show how a query is split into subject and caption
    Parse(ParseCommand),
}

#[derive(Debug, Default, Args)]
pub struct TuiCommand {
    /// Log file for the interactive screen (defaults to catsays.log in the temp dir)
    #[arg(long, env = "CATSAYS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Start with this query already typed
    pub query: Vec<String>,
}

impl TuiCommand {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("catsays.log"))
    }

    pub fn initial_query(&self) -> Option<String> {
        (!self.query.is_empty()).then(|| self.query.join(" "))
    }
}

pub(crate) fn print_json<T>(value: &T) -> Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
