use futures::future;
use serde::Serialize;

use crate::domain::images::ImageHandle;
use crate::domain::lookups::{ImageLookup, WordLookup};
use crate::domain::query::{CatQuery, SaysQuery};
use crate::domain::suggestion::{best_match, prediction, still_valid, wants_suggestion};
use crate::domain::LookupError;

/// Best completion for `target`, or `None` when the target is too short or
/// the service has nothing to offer.
pub async fn suggest(
    words: &dyn WordLookup,
    target: &str,
) -> Result<Option<String>, LookupError> {
    if !wants_suggestion(target) {
        return Ok(None);
    }

    let matches = words.complete(target).await?;
    Ok(best_match(&matches).map(|m| m.word.clone()))
}

/// Result of running the search pipeline once, without debounce.
#[derive(Debug, Serialize)]
pub struct LookupReport {
    pub query: String,
    pub says: Option<SaysQuery>,
    pub suggestion: Option<String>,
    pub prediction: Option<String>,
    #[serde(skip)]
    pub image: Result<ImageHandle, LookupError>,
}

/// Run the image and word lookups for `query` side by side.
///
/// Word lookup failures only leave the suggestion empty.
pub async fn lookup_once(
    images: &dyn ImageLookup,
    words: &dyn WordLookup,
    query: &str,
) -> LookupReport {
    let cat_query = CatQuery::from_query(query);

    let (image, suggestion) = future::join(
        images.fetch(&cat_query),
        suggest(words, cat_query.suggestion_target()),
    )
    .await;

    let suggestion = suggestion
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "word suggestion lookup failed");
            None
        })
        .filter(|s| still_valid(s, query));
    let prediction = suggestion
        .as_deref()
        .map(|s| prediction(s, cat_query.says()));

    LookupReport {
        query: query.to_string(),
        says: cat_query.says().cloned(),
        suggestion,
        prediction,
        image,
    }
}
