use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::print_json;
use crate::domain::query::{CatQuery, SaysQuery};
use crate::domain::suggestion::{WordMatch, best_match, wants_suggestion};
use crate::infrastructure::client::CatsayClient;

#[derive(Debug, Args)]
pub struct SuggestCommand {
    #[arg(required = true, num_args = 1..)]
    pub prefix: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SuggestOutput {
    prefix: String,
    suggestion: Option<String>,
    words: Vec<WordMatch>,
}

pub async fn suggest(client: &CatsayClient, command: SuggestCommand) -> Result<()> {
    let prefix = command.prefix.join(" ");

    let words = if wants_suggestion(&prefix) {
        client.words().complete(&prefix).await?
    } else {
        tracing::info!(prefix = %prefix, "prefix too short for a suggestion");
        Vec::new()
    };
    let suggestion = best_match(&words).map(|m| m.word.clone());

    print_json(&SuggestOutput {
        prefix,
        suggestion,
        words,
    })
}

#[derive(Debug, Args)]
pub struct ParseCommand {
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ParseOutput<'a> {
    query: &'a str,
    says: Option<&'a SaysQuery>,
    path: Vec<&'a str>,
    suggestion_target: &'a str,
}

pub fn parse(command: &ParseCommand) -> Result<()> {
    let query = command.query.join(" ");
    let parsed = CatQuery::from_query(&query);

    print_json(&ParseOutput {
        query: &query,
        says: parsed.says(),
        path: parsed.path_segments(),
        suggestion_target: parsed.suggestion_target(),
    })
}
