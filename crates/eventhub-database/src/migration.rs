//! Database migration runner and role seeding.

use sqlx::PgPool;
use tracing::info;

use eventhub_core::error::{AppError, ErrorKind};
use eventhub_entity::role::SEEDED_ROLES;

use crate::store::RoleStore;

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// Insert the bootstrap roles (`admin`, `user`, `moderator`) if missing.
///
/// Existing rows are not overwritten, so administrative edits to a seeded
/// role survive restarts.
pub async fn seed_roles(roles: &dyn RoleStore) -> Result<(), AppError> {
    for seed in SEEDED_ROLES.iter() {
        roles.seed_role(&seed.to_role()).await?;
    }
    info!(count = SEEDED_ROLES.len(), "Seeded roles");
    Ok(())
}
