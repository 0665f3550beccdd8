//! EventHub Server
//!
//! Entry point: loads configuration, initializes logging, connects the
//! record store and dispatches the selected subcommand.

use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use eventhub_auth::rbac::RoleRegistry;
use eventhub_auth::{PasswordHasher, PasswordValidator};
use eventhub_core::config::{AppConfig, LogFormat};
use eventhub_core::types::RoleId;
use eventhub_database::Stores;
use eventhub_service::{CreateUserInput, UserService};

/// EventHub: event listings with moderated publication
#[derive(Debug, Parser)]
#[command(name = "eventhub-server", version, about, long_about = None)]
struct Cli {
    /// Configuration environment; selects `config/{env}.toml`
    #[arg(long, env = "EVENTHUB_ENV", default_value = "development")]
    env: String,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply migrations and seed the bootstrap roles, then exit
    Migrate,
    /// Create a user with the admin role
    CreateAdmin(CreateAdminArgs),
}

#[derive(Debug, Args)]
struct CreateAdminArgs {
    /// Username
    #[arg(long)]
    username: String,
    /// Email address
    #[arg(long)]
    email: String,
    /// Password
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.env).context("Failed to load configuration")?;
    init_logging(&config);

    tracing::info!(env = %cli.env, "Starting EventHub v{}", env!("CARGO_PKG_VERSION"));

    let stores = Stores::connect(&config.database)
        .await
        .context("Failed to connect to the record store")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => eventhub_api::run_server(config, stores)
            .await
            .context("Server error")?,
        Commands::Migrate => {
            stores.migrate().await.context("Migration failed")?;
            tracing::info!("Migrations complete");
            stores.close().await;
        }
        Commands::CreateAdmin(args) => {
            create_admin(&config, &stores, args).await?;
            stores.close().await;
        }
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn create_admin(
    config: &AppConfig,
    stores: &Stores,
    args: CreateAdminArgs,
) -> anyhow::Result<()> {
    let auth = &config.auth;
    let users = UserService::new(
        stores.users.clone(),
        RoleRegistry::new(stores.roles.clone(), auth),
        Arc::new(PasswordHasher::new(auth)?),
        Arc::new(PasswordValidator::new(auth)),
    );

    let user = users
        .create(CreateUserInput {
            username: args.username,
            email: args.email,
            password: args.password,
            role_id: Some(RoleId::ADMIN),
        })
        .await
        .context("Failed to create admin user")?;

    tracing::info!(user_id = %user.id, username = %user.username, "Admin user created");
    Ok(())
}
