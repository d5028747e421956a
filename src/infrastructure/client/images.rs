use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::CatsayClient;
use crate::domain::LookupError;
use crate::domain::images::ImageHandle;
use crate::domain::query::CatQuery;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

pub struct ImagesClient<'a> {
    client: &'a CatsayClient,
}

impl<'a> ImagesClient<'a> {
    pub fn new(client: &'a CatsayClient) -> Self {
        Self { client }
    }

    /// `GET /cat/{term}` or `GET /cat/{subject}/says/{caption}`.
    ///
    /// Only a 404 maps to [`LookupError::NotFound`]; every other non-success
    /// status is a request error.
    pub async fn fetch(&self, query: &CatQuery) -> Result<ImageHandle, LookupError> {
        let url = CatsayClient::endpoint(&self.client.cat_url, &query.path_segments())?;
        let response = self.client.http.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%url, "image service has no match");
            return Err(LookupError::NotFound);
        }
        if !status.is_success() {
            return Err(CatsayClient::response_error(response).await);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        let bytes = response.bytes().await?;

        debug!(%url, content_type = %content_type, len = bytes.len(), "fetched image");
        Ok(ImageHandle::new(bytes.to_vec(), content_type, url))
    }
}
