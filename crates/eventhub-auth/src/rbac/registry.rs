//! Role table lookups with an in-process cache.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, info};

use eventhub_core::config::AuthConfig;
use eventhub_core::error::{AppError, ErrorKind};
use eventhub_core::result::AppResult;
use eventhub_core::types::RoleId;
use eventhub_database::store::RoleStore;
use eventhub_entity::permission::PermissionSet;
use eventhub_entity::role::Role;

/// Upper bound on cached roles; the role table is small.
const MAX_CACHED_ROLES: u64 = 1_024;

/// Resolves roles and their permission sets.
///
/// Lookups by id go through a short-TTL moka cache. Role rows change only
/// through rare administrative operations, and the ones routed through
/// this registry invalidate the cache immediately.
#[derive(Clone)]
pub struct RoleRegistry {
    store: Arc<dyn RoleStore>,
    cache: Cache<RoleId, Arc<Role>>,
    default_role: String,
}

impl std::fmt::Debug for RoleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleRegistry")
            .field("default_role", &self.default_role)
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}

impl RoleRegistry {
    /// Create a registry over `store`.
    pub fn new(store: Arc<dyn RoleStore>, config: &AuthConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_CACHED_ROLES)
            .time_to_live(Duration::from_secs(config.role_cache_ttl_seconds))
            .build();
        Self {
            store,
            cache,
            default_role: config.default_role.clone(),
        }
    }

    /// Look up a role by id, `None` if it does not exist.
    pub async fn find(&self, id: RoleId) -> AppResult<Option<Arc<Role>>> {
        if let Some(role) = self.cache.get(&id).await {
            return Ok(Some(role));
        }
        let Some(role) = self.store.find_role(id).await? else {
            return Ok(None);
        };
        debug!(role_id = %id, role = %role.name, "Caching role");
        let role = Arc::new(role);
        self.cache.insert(id, role.clone()).await;
        Ok(Some(role))
    }

    /// Look up a role that a user already references.
    ///
    /// A missing row here means the role table and user table disagree,
    /// which is an internal failure rather than bad input.
    pub async fn resolve_role(&self, id: RoleId) -> AppResult<Arc<Role>> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Role {id} referenced by a user is missing")))
    }

    /// Permission set granted by role `id`.
    pub async fn resolve_permissions(&self, id: RoleId) -> AppResult<PermissionSet> {
        Ok(self.resolve_role(id).await?.permissions.clone())
    }

    /// Look up a role by its unique name.
    pub async fn resolve_role_by_name(&self, name: &str) -> AppResult<Arc<Role>> {
        let role = self
            .store
            .find_role_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Role '{name}' not found")))?;
        let role = Arc::new(role);
        self.cache.insert(role.id, role.clone()).await;
        Ok(role)
    }

    /// Validate a role id that a caller wants to assign to a user.
    pub async fn ensure_assignable(&self, id: RoleId) -> AppResult<Arc<Role>> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::validation("role_id", format!("Invalid role: {id}")))
    }

    /// The role given to new accounts and to users of a deleted role.
    pub async fn default_role(&self) -> AppResult<Arc<Role>> {
        self.resolve_role_by_name(&self.default_role)
            .await
            .map_err(|e| match e.kind {
                ErrorKind::NotFound => AppError::configuration(format!(
                    "Default role '{}' does not exist",
                    self.default_role
                )),
                _ => e,
            })
    }

    /// Every role, straight from the store.
    pub async fn list(&self) -> AppResult<Vec<Role>> {
        self.store.list_roles().await
    }

    /// Delete a role, moving its users to the default role first.
    ///
    /// Returns the number of reassigned users.
    pub async fn delete_role(&self, id: RoleId) -> AppResult<u64> {
        let fallback = self.default_role().await?;
        if fallback.id == id {
            return Err(AppError::validation(
                "role_id",
                "The default role cannot be deleted",
            ));
        }
        let reassigned = self
            .store
            .delete_role(id, fallback.id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Role {id} not found")))?;
        self.invalidate(id).await;
        info!(role_id = %id, fallback = %fallback.name, reassigned, "Role deleted");
        Ok(reassigned)
    }

    /// Drop a cached role so the next lookup reads the store.
    pub async fn invalidate(&self, id: RoleId) {
        self.cache.invalidate(&id).await;
    }
}
