use async_trait::async_trait;

use super::LookupError;
use crate::domain::images::ImageHandle;
use crate::domain::query::CatQuery;
use crate::domain::suggestion::WordMatch;

#[async_trait]
pub trait ImageLookup: Send + Sync {
    async fn fetch(&self, query: &CatQuery) -> Result<ImageHandle, LookupError>;
}

#[async_trait]
pub trait WordLookup: Send + Sync {
    /// Words starting with `prefix`, in the service's order.
    async fn complete(&self, prefix: &str) -> Result<Vec<WordMatch>, LookupError>;
}
