//! Application state shared across all handlers and middleware.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use contacts_auth::jwt::{JwtDecoder, JwtEncoder};
use contacts_auth::password::{PasswordHasher, PasswordValidator};
use contacts_core::config::AppConfig;
use contacts_core::traits::{AvatarStorage, EmailSender};
use contacts_database::DatabasePool;
use contacts_database::store::{ContactStore, UserStore};
use contacts_service::{AuthService, ContactService, UserService};
use contacts_storage::avatar::AvatarProcessor;
use contacts_storage::providers::local::AVATAR_DIR;

use crate::middleware::rate_limit::RateLimiter;

/// Shared application state, cloned into every handler.
///
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Database pool, when running against Postgres. Used for health checks.
    pub db: Option<DatabasePool>,
    /// Signup, login, token rotation, and email confirmation.
    pub auth_service: Arc<AuthService>,
    /// Contact CRUD and birthdays.
    pub contact_service: Arc<ContactService>,
    /// Profile and avatar.
    pub user_service: Arc<UserService>,
    /// Per-client request budget for the contact routes.
    pub rate_limiter: RateLimiter,
    /// When the state was built; reported as uptime.
    pub started_at: Instant,
}

impl AppState {
    /// Wire services over the given stores and outbound adapters.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        contacts: Arc<dyn ContactStore>,
        mailer: Arc<dyn EmailSender>,
        avatars: Arc<dyn AvatarStorage>,
    ) -> Self {
        let auth_service = AuthService::new(
            Arc::clone(&users),
            Arc::new(JwtEncoder::new(&config.auth)),
            Arc::new(JwtDecoder::new(&config.auth)),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
            mailer,
        );
        let user_service = UserService::new(
            users,
            avatars,
            AvatarProcessor::new(config.storage.avatar_size),
        );
        let rate_limiter = RateLimiter::new(config.rate_limit.times, config.rate_limit.refill_rate());

        Self {
            config: Arc::new(config),
            db: None,
            auth_service: Arc::new(auth_service),
            contact_service: Arc::new(ContactService::new(contacts)),
            user_service: Arc::new(user_service),
            rate_limiter,
            started_at: Instant::now(),
        }
    }

    /// Attach the database pool so `/health` can probe it.
    pub fn with_database(mut self, db: DatabasePool) -> Self {
        self.db = Some(db);
        self
    }

    /// Directory served under `/avatars`.
    pub fn avatar_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.storage.root).join(AVATAR_DIR)
    }
}
