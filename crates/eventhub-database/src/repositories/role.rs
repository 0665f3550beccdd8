//! Role repository implementation.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use eventhub_core::error::{AppError, ErrorKind};
use eventhub_core::result::AppResult;
use eventhub_core::types::RoleId;
use eventhub_entity::permission::PermissionSet;
use eventhub_entity::role::Role;

use crate::store::RoleStore;

/// Raw `roles` row; permissions are stored as a `TEXT[]` of tokens.
#[derive(Debug, FromRow)]
struct RoleRow {
    id: RoleId,
    name: String,
    description: Option<String>,
    permissions: Vec<String>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
            description: row.description,
            permissions: PermissionSet::from(row.permissions.as_slice()),
        }
    }
}

/// PostgreSQL-backed [`RoleStore`].
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>("SELECT * FROM roles ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roles", e))?;
        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn find_role(&self, id: RoleId) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role", e))?;
        Ok(row.map(Role::from))
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>("SELECT * FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find role by name", e)
            })?;
        Ok(row.map(Role::from))
    }

    async fn seed_role(&self, role: &Role) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO roles (id, name, description, permissions) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.description)
        .bind(role.permissions.to_tokens())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed role", e))?;
        Ok(())
    }

    async fn delete_role(&self, id: RoleId, fallback: RoleId) -> AppResult<Option<u64>> {
        let db_err =
            |e: sqlx::Error| AppError::with_source(ErrorKind::Database, "Failed to delete role", e);

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let exists: Option<i32> =
            sqlx::query_scalar("SELECT id FROM roles WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_err)?;
        if exists.is_none() {
            return Ok(None);
        }

        let reassigned =
            sqlx::query("UPDATE users SET role_id = $2, updated_at = NOW() WHERE role_id = $1")
                .bind(id)
                .bind(fallback)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?
                .rows_affected();

        sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(Some(reassigned))
    }
}
