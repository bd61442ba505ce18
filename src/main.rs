//! Contacts API server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use contacts_api::AppState;
use contacts_core::config::AppConfig;
use contacts_core::error::AppError;
use contacts_database::migration::run_migrations;
use contacts_database::{DatabasePool, PgContactStore, PgUserStore};
use contacts_storage::LocalAvatarStorage;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `CONTACTS_CONFIG`, or from `config/default` plus the `CONTACTS_ENV` overlay.
fn load_configuration() -> Result<AppConfig, AppError> {
    if let Ok(path) = std::env::var("CONTACTS_CONFIG") {
        return AppConfig::load_file(&path);
    }

    let env = std::env::var("CONTACTS_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting contacts API");

    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    let users = Arc::new(PgUserStore::new(db.pool().clone()));
    let contacts = Arc::new(PgContactStore::new(db.pool().clone()));

    let mailer = contacts_mail::build_sender(&config.mail)?;
    tracing::info!(transport = mailer.transport(), "Mail sender ready");

    let avatars = Arc::new(LocalAvatarStorage::new(&config.storage).await?);
    tracing::info!(dir = %avatars.directory().display(), "Avatar storage ready");

    let state = AppState::new(config, users, contacts, mailer, avatars).with_database(db.clone());

    let result = contacts_api::serve(state).await;
    db.close().await;
    result
}
