//! User management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use contacts_core::config::AppConfig;
use contacts_core::error::AppError;
use contacts_core::types::PageRequest;
use contacts_database::{DatabasePool, PgUserStore};
use contacts_entity::user::User;
use contacts_service::UserService;
use contacts_storage::{AvatarProcessor, LocalAvatarStorage};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List users, oldest first
    List {
        /// Users to skip
        #[arg(long, default_value_t = 0)]
        skip: u64,
        /// Maximum users to show (1..=100)
        #[arg(long, default_value_t = 50)]
        limit: u64,
    },
    /// Mark an account's email as confirmed
    Confirm {
        /// Email address of the account
        email: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    confirmed: bool,
    created_at: String,
}

impl From<User> for UserRow {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username,
            email: u.email,
            confirmed: u.confirmed,
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    db: &DatabasePool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let users = Arc::new(PgUserStore::new(db.pool().clone()));
    let avatars = Arc::new(LocalAvatarStorage::new(&config.storage).await?);
    let service = UserService::new(
        users,
        avatars,
        AvatarProcessor::new(config.storage.avatar_size),
    );

    match &args.command {
        UserCommand::List { skip, limit } => {
            let rows: Vec<UserRow> = service
                .list_users(PageRequest::new(*skip, *limit))
                .await?
                .into_iter()
                .map(UserRow::from)
                .collect();

            output::print_list(&rows, format);
        }
        UserCommand::Confirm { email } => {
            let user = service.confirm_user(email).await?;
            output::print_item(&UserRow::from(user), format);
            if format == OutputFormat::Table {
                output::print_success(&format!("User '{email}' confirmed"));
            }
        }
    }

    Ok(())
}
