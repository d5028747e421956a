pub mod coordinator;
pub mod lookup;

pub use coordinator::{DEFAULT_DEBOUNCE, KeyDisposition, SearchCoordinator};
pub use lookup::{LookupReport, lookup_once, suggest};
