//! CLI command definitions and dispatch.

pub mod migrate;
pub mod user;

use clap::{Parser, Subcommand};

use contacts_core::config::AppConfig;
use contacts_core::error::AppError;
use contacts_database::DatabasePool;

use crate::output::OutputFormat;

/// Contacts API administration
#[derive(Debug, Parser)]
#[command(name = "contacts-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_file(&self.config)?;
        let db = DatabasePool::connect(&config.database).await?;

        let result = match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &db, self.format).await,
            Commands::User(args) => user::execute(args, &config, &db, self.format).await,
        };

        db.close().await;
        result
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_user_list_paging() {
        let cli = Cli::try_parse_from([
            "contacts-cli",
            "--format",
            "json",
            "user",
            "list",
            "--skip",
            "10",
            "--limit",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::User(user::UserArgs {
                command: user::UserCommand::List { skip, limit },
            }) => {
                assert_eq!(skip, 10);
                assert_eq!(limit, 5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parses_confirm() {
        let cli = Cli::try_parse_from(["contacts-cli", "-c", "config/prod", "user", "confirm", "a@b.c"])
            .unwrap();
        assert_eq!(cli.config, "config/prod");
        assert!(matches!(
            cli.command,
            Commands::User(user::UserArgs {
                command: user::UserCommand::Confirm { ref email },
            }) if email == "a@b.c"
        ));
    }
}
