//! Store selection and wiring.

use std::sync::Arc;

use tracing::info;

use eventhub_core::config::{DatabaseConfig, DatabaseProvider};
use eventhub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration;
use crate::repositories::{EventRepository, RoleRepository, UserRepository};
use crate::store::{EventStore, RoleStore, UserStore};

/// The three stores the services depend on, backed by one provider.
#[derive(Clone)]
pub struct Stores {
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Role table.
    pub roles: Arc<dyn RoleStore>,
    /// Events.
    pub events: Arc<dyn EventStore>,
    pool: Option<DatabasePool>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("postgres", &self.pool.is_some())
            .finish()
    }
}

impl Stores {
    /// Back every store with one shared [`MemoryStore`].
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            roles: store.clone(),
            events: store,
            pool: None,
        }
    }

    /// Back every store with PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            roles: Arc::new(RoleRepository::new(pg.clone())),
            events: Arc::new(EventRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Build the configured stores. When `run_migrations` is set (always
    /// true for the memory provider), the schema is migrated and the
    /// bootstrap roles are seeded.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let stores = match config.provider {
            DatabaseProvider::Memory => {
                info!("Using in-memory store; data will not survive a restart");
                Self::memory()
            }
            DatabaseProvider::Postgres => Self::postgres(DatabasePool::connect(config).await?),
        };
        if config.run_migrations || config.provider == DatabaseProvider::Memory {
            stores.migrate().await?;
        }
        Ok(stores)
    }

    /// Apply schema migrations (PostgreSQL only) and seed the bootstrap roles.
    pub async fn migrate(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            migration::run_migrations(pool.pool()).await?;
        }
        migration::seed_roles(self.roles.as_ref()).await
    }

    /// Check that the backing store is reachable.
    pub async fn ping(&self) -> AppResult<()> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(()),
        }
    }

    /// Close pooled connections, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
