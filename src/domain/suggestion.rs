use serde::{Deserialize, Serialize};

use super::query::{SAYS_SEPARATOR, SaysQuery, parse_says};

/// Targets this short are not worth a word lookup.
const MAX_SKIPPED_TARGET_CHARS: usize = 2;

/// One entry of the word service's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordMatch {
    pub word: String,
    #[serde(default)]
    pub score: Option<f64>,
}

pub fn wants_suggestion(target: &str) -> bool {
    target.chars().count() > MAX_SKIPPED_TARGET_CHARS
}

/// Pick the completion to offer: scored entries first, otherwise service order.
pub fn best_match(matches: &[WordMatch]) -> Option<&WordMatch> {
    let mut ordered: Vec<&WordMatch> = matches.iter().collect();
    ordered.sort_by_key(|m| m.score.is_none());
    ordered.into_iter().next()
}

/// Whether `suggestion` still extends what the user has typed.
///
/// In "X says Y" mode only the caption has to match.
pub fn still_valid(suggestion: &str, query: &str) -> bool {
    match parse_says(query) {
        Some(says) => suggestion.starts_with(&says.caption),
        None => suggestion.starts_with(query),
    }
}

/// The ghost text shown ahead of the cursor.
pub fn prediction(suggestion: &str, says: Option<&SaysQuery>) -> String {
    match says {
        Some(says) => format!("{}{SAYS_SEPARATOR}{suggestion}", says.subject),
        None => suggestion.to_string(),
    }
}
