pub mod errors;
pub mod images;
pub mod lookups;
pub mod query;
pub mod search;
pub mod suggestion;

// Re-exports
pub use errors::LookupError;
pub use images::ImageHandle;
pub use lookups::{ImageLookup, WordLookup};
pub use query::{CatQuery, SaysQuery, parse_says};
pub use search::{ResultView, SearchState};
pub use suggestion::WordMatch;
