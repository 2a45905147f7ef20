//! Application state and composition.

use std::sync::Arc;

use crate::api::{CommandRouter, EventDispatcher};
use crate::config::AppConfig;
use crate::entities::{Messenger, Persistence, Quests, Users};
use crate::infrastructure::catalog::{CatalogError, MessageCatalog};
use crate::infrastructure::pool::PoolError;
use crate::infrastructure::ports::NotifierPort;
use crate::infrastructure::sqlite::{
    ensure_schema, SqliteConnector, SqliteQuestRepo, SqliteUserRepo, StorePool,
};
use crate::use_cases::quest_authoring::SessionTable;
use crate::use_cases::{EnsureProfile, QuestAuthoring};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Invalid store configuration: {0}")]
    Pool(#[from] PoolError),

    #[error("No store connection could be opened for {url}")]
    NoConnections { url: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Main application state.
///
/// Holds the store pool, façades and use cases, composed once at startup.
pub struct App {
    pub config: AppConfig,
    pub pool: Arc<StorePool>,
    pub persistence: Persistence,
    pub messenger: Arc<Messenger>,
    pub authoring: Arc<QuestAuthoring>,
    pub dispatcher: Arc<EventDispatcher>,
}

impl App {
    /// Open the pool, bootstrap the schema and wire everything together.
    ///
    /// Fails only when the configuration is unusable or not a single
    /// connection could be opened. An incomplete schema bootstrap is logged
    /// and startup continues; affected operations then fail per call.
    pub async fn startup(
        config: AppConfig,
        notifier: Arc<dyn NotifierPort>,
    ) -> Result<Self, StartupError> {
        let mut catalog = MessageCatalog::new(config.default_locale.clone());
        if let Some(dir) = &config.locale_dir {
            let loaded = catalog.load_dir(dir)?;
            tracing::info!(dir = %dir.display(), loaded, "Locale catalogs loaded");
        }

        tracing::info!(
            database = %config.database_name,
            capacity = config.pool_capacity,
            "Opening store connection pool"
        );
        if config.credentials.is_some() {
            tracing::debug!("Store credentials configured; the SQLite driver does not use them");
        }

        let connector = SqliteConnector::from_url(&config.database_url)?;
        let pool = StorePool::initialize(connector, config.pool_capacity).await;
        if !pool.has_connections() {
            return Err(StartupError::NoConnections {
                url: config.database_url.clone(),
            });
        }
        let pool = Arc::new(pool);

        if !ensure_schema(&pool).await {
            tracing::warn!("Schema bootstrap incomplete; continuing");
        }

        let quests = Arc::new(Quests::new(Arc::new(SqliteQuestRepo::new(pool.clone()))));
        let users = Arc::new(Users::new(Arc::new(SqliteUserRepo::new(pool.clone()))));
        let messenger = Arc::new(Messenger::new(notifier, Arc::new(catalog), users.clone()));

        let authoring = Arc::new(QuestAuthoring::new(
            Arc::new(SessionTable::new(config.session_ttl)),
            quests.clone(),
            messenger.clone(),
        ));
        let commands = Arc::new(CommandRouter::new(
            authoring.clone(),
            quests.clone(),
            messenger.clone(),
        ));
        let profiles = Arc::new(EnsureProfile::new(users.clone(), config.default_locale.clone()));
        let dispatcher = Arc::new(EventDispatcher::new(profiles, authoring.clone(), commands));

        tracing::info!(live = pool.live_count(), "Questline engine ready");

        Ok(Self {
            config,
            pool,
            persistence: Persistence { quests, users },
            messenger,
            authoring,
            dispatcher,
        })
    }

    /// Drain the pool. Returns the number of connections closed cleanly.
    pub async fn shutdown(&self) -> usize {
        tracing::info!("Shutting down Questline engine");
        self.pool.drain().await
    }
}
