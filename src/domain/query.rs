use serde::Serialize;

const SAYS: &str = "says";

/// Separator used when a subject and caption are joined back into a query.
pub const SAYS_SEPARATOR: &str = " says ";

/// The two halves of an "X says Y" query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaysQuery {
    pub subject: String,
    pub caption: String,
}

/// Split a raw query on the first standalone `says` (any ASCII case).
///
/// Returns `None` when there is no `says` word or nothing directly follows it,
/// in which case the whole input is a plain search term. Subject and caption
/// keep the user's casing.
pub fn parse_says(raw: &str) -> Option<SaysQuery> {
    let words: Vec<&str> = raw.split(' ').collect();
    let index = words.iter().position(|w| w.eq_ignore_ascii_case(SAYS))?;

    let rest = &words[index + 1..];
    if rest.first().is_none_or(|w| w.is_empty()) {
        return None;
    }

    Some(SaysQuery {
        subject: words[..index].join(" "),
        caption: rest.join(" "),
    })
}

/// What to ask the image service for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatQuery {
    Term(String),
    Says(SaysQuery),
}

impl CatQuery {
    pub fn from_query(query: &str) -> Self {
        match parse_says(query) {
            Some(says) => CatQuery::Says(says),
            None => CatQuery::Term(query.to_string()),
        }
    }

    /// Path segments below the service root, unescaped.
    pub fn path_segments(&self) -> Vec<&str> {
        match self {
            CatQuery::Term(term) => vec!["cat", term.as_str()],
            CatQuery::Says(says) => vec!["cat", says.subject.as_str(), SAYS, says.caption.as_str()],
        }
    }

    /// The text a word suggestion has to complete: the caption, or the whole term.
    pub fn suggestion_target(&self) -> &str {
        match self {
            CatQuery::Term(term) => term,
            CatQuery::Says(says) => &says.caption,
        }
    }

    pub fn says(&self) -> Option<&SaysQuery> {
        match self {
            CatQuery::Term(_) => None,
            CatQuery::Says(says) => Some(says),
        }
    }
}
