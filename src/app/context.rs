use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{Result, StoriesError};
use crate::app::session::SearchSession;
use crate::config::Config;
use crate::domain::TriggerPolicy;
use crate::search::{HttpSearchClient, SearchClient};
use crate::store::SqliteStore;

pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub client: Arc<dyn SearchClient + Send + Sync>,
    pub config: Arc<Config>,
}

impl AppContext {
    pub fn new(db_path: Option<PathBuf>, config: Config) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::data_dir()?.join("hackstories.db"),
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let client = HttpSearchClient::new(&config.search.endpoint, config.search.timeout())?;

        Ok(Self::with_parts(store, Arc::new(client), config))
    }

    pub fn with_parts(
        store: Arc<SqliteStore>,
        client: Arc<dyn SearchClient + Send + Sync>,
        config: Config,
    ) -> Self {
        Self {
            store,
            client,
            config: Arc::new(config),
        }
    }

    pub fn policy(&self) -> TriggerPolicy {
        self.config.search.trigger
    }

    /// Start a session seeded from the stored term.
    pub fn session(&self) -> SearchSession {
        SearchSession::new(
            self.store.clone(),
            self.policy(),
            &self.config.search.default_term,
        )
    }

    /// `<data_dir>/hackstories`, created if missing.
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| StoriesError::Config("Could not find data directory".into()))?;
        let dir = data_dir.join("hackstories");
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
