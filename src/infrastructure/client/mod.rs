pub mod images;
pub mod words;

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::domain::images::ImageHandle;
use crate::domain::lookups::{ImageLookup, WordLookup};
use crate::domain::query::CatQuery;
use crate::domain::suggestion::WordMatch;
use crate::domain::LookupError;

const USER_AGENT: &str = "catsays/1.0";

/// HTTP access to the image service and the word service.
pub struct CatsayClient {
    cat_url: Url,
    words_url: Url,
    http: Client,
}

impl CatsayClient {
    pub fn new(cat_url: Url, words_url: Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("failed to configure HTTP client")?;

        Ok(Self {
            cat_url: normalize(cat_url)?,
            words_url: normalize(words_url)?,
            http,
        })
    }

    pub fn from_base_urls(cat_url: &str, words_url: &str, timeout: Duration) -> Result<Self> {
        let cat = Url::parse(cat_url).with_context(|| format!("invalid image API url: {cat_url}"))?;
        let words =
            Url::parse(words_url).with_context(|| format!("invalid word API url: {words_url}"))?;
        Self::new(cat, words, timeout)
    }

    pub fn images(&self) -> images::ImagesClient<'_> {
        images::ImagesClient::new(self)
    }

    pub fn words(&self) -> words::WordsClient<'_> {
        words::WordsClient::new(self)
    }

    /// Append already-unescaped path segments to `base`, percent-encoding each one.
    ///
    /// URL parsing resolves `.` and `..` even when escaped, so those segments
    /// cannot be sent literally and are rejected.
    pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, LookupError> {
        if let Some(dots) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(LookupError::request(format!(
                "\"{dots}\" cannot be used as a search term"
            )));
        }

        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| LookupError::request(format!("invalid API base url: {base}")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn response_error(response: reqwest::Response) -> LookupError {
        let status = response.status();
        let bytes = response.bytes().await.unwrap_or_default();
        let message = String::from_utf8_lossy(&bytes);
        let message = message.trim();

        if message.is_empty() {
            LookupError::request(format!("request failed ({status})"))
        } else {
            LookupError::request(format!("request failed ({status}): {message}"))
        }
    }
}

fn normalize(mut url: Url) -> Result<Url> {
    if url.cannot_be_a_base() {
        anyhow::bail!("API url cannot be used as a base: {url}");
    }
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path().trim_end_matches('/')));
    }
    Ok(url)
}

#[async_trait]
impl ImageLookup for CatsayClient {
    async fn fetch(&self, query: &CatQuery) -> Result<ImageHandle, LookupError> {
        self.images().fetch(query).await
    }
}

#[async_trait]
impl WordLookup for CatsayClient {
    async fn complete(&self, prefix: &str) -> Result<Vec<WordMatch>, LookupError> {
        self.words().complete(prefix).await
    }
}
