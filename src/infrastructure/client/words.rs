use tracing::debug;

use super::CatsayClient;
use crate::domain::LookupError;
use crate::domain::suggestion::WordMatch;

pub struct WordsClient<'a> {
    client: &'a CatsayClient,
}

impl<'a> WordsClient<'a> {
    pub fn new(client: &'a CatsayClient) -> Self {
        Self { client }
    }

    /// `GET /words?sp={prefix}*`
    pub async fn complete(&self, prefix: &str) -> Result<Vec<WordMatch>, LookupError> {
        let url = CatsayClient::endpoint(&self.client.words_url, &["words"])?;
        let response = self
            .client
            .http
            .get(url)
            .query(&[("sp", format!("{prefix}*"))])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatsayClient::response_error(response).await);
        }

        let words: Vec<WordMatch> = response
            .json()
            .await
            .map_err(|err| LookupError::request(format!("failed to decode word list: {err}")))?;
        debug!(prefix, count = words.len(), "fetched word matches");
        Ok(words)
    }
}
