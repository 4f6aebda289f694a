pub mod sqlite;

use crate::app::Result;

pub use sqlite::SqliteStore;

/// Key under which the last search term is kept.
pub const SEARCH_TERM_KEY: &str = "search";

/// String key-value preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
