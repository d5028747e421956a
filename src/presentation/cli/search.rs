use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Serialize;

use super::print_json;
use crate::application::lookup::{LookupReport, lookup_once};
use crate::domain::LookupError;
use crate::domain::search::NOT_FOUND_MESSAGE;
use crate::infrastructure::client::CatsayClient;

#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Write the image to this path
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Open the image in the system viewer
    #[arg(long)]
    pub open: bool,

    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

impl SearchCommand {
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

#[derive(Debug, Serialize)]
struct SearchSummary<'a> {
    #[serde(flatten)]
    report: &'a LookupReport,
    found: bool,
    content_type: Option<&'a str>,
    len: Option<usize>,
    width: Option<u32>,
    height: Option<u32>,
    source: Option<&'a str>,
    saved_to: Option<PathBuf>,
}

pub async fn run(client: &CatsayClient, command: SearchCommand) -> Result<()> {
    let query = command.query_text();
    let report = lookup_once(client, client, &query).await;

    let image = match &report.image {
        Ok(image) => image,
        Err(LookupError::NotFound) => {
            eprintln!("{NOT_FOUND_MESSAGE}");
            return print_json(&SearchSummary {
                report: &report,
                found: false,
                content_type: None,
                len: None,
                width: None,
                height: None,
                source: None,
                saved_to: None,
            });
        }
        Err(err) => bail!("cat lookup failed: {err}"),
    };

    let saved_to = match (&command.output, command.open) {
        (Some(path), _) => {
            image
                .save_to(path)
                .with_context(|| format!("failed to write image to {}", path.display()))?;
            Some(path.clone())
        }
        (None, true) => Some(
            image
                .persist(&std::env::temp_dir())
                .context("failed to write image to the temp dir")?,
        ),
        (None, false) => None,
    };

    if command.open
        && let Some(path) = &saved_to
    {
        open::that(path).with_context(|| format!("failed to open {}", path.display()))?;
    }

    let dimensions = image.dimensions();
    print_json(&SearchSummary {
        report: &report,
        found: true,
        content_type: Some(image.content_type()),
        len: Some(image.len()),
        width: dimensions.map(|(w, _)| w),
        height: dimensions.map(|(_, h)| h),
        source: Some(image.source().as_str()),
        saved_to,
    })
}
