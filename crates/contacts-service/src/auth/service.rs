//! Authentication service: signup, confirmation, login, and refresh.

use std::sync::Arc;

use tracing::{info, warn};

use contacts_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use contacts_auth::password::{PasswordHasher, PasswordValidator};
use contacts_core::error::AppError;
use contacts_core::traits::EmailSender;
use contacts_database::store::UserStore;
use contacts_entity::user::{CreateUser, User};

use super::gravatar::gravatar_url;
use crate::context::RequestContext;

pub const MSG_EMAIL_CONFIRMED: &str = "Email confirmed";
pub const MSG_ALREADY_CONFIRMED: &str = "Your email is already confirmed";
pub const MSG_CHECK_EMAIL: &str = "Check your email for confirmation.";

/// Path, relative to the public base URL, of the confirmation endpoint.
const CONFIRM_PATH: &str = "api/auth/confirmed_email";

/// Data needed to register an account.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Orchestrates account creation and the token lifecycle.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    mailer: Arc<dyn EmailSender>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        mailer: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            users,
            encoder,
            decoder,
            hasher,
            validator,
            mailer,
        }
    }

    /// Register a new, unconfirmed account and send the confirmation email.
    ///
    /// `base_url` is the public origin with a trailing slash.
    pub async fn signup(&self, req: SignupRequest, base_url: &str) -> Result<User, AppError> {
        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("Account already exists"));
        }

        self.validator.validate(&req.password)?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .users
            .create(&CreateUser {
                avatar: Some(gravatar_url(&req.email)),
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "User signed up");

        self.dispatch_verification(&user, base_url)?;
        Ok(user)
    }

    /// Exchange credentials for a token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email"))?;

        if !user.can_login() {
            return Err(AppError::authentication("Email not confirmed"));
        }

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication("Invalid password"));
        }

        let pair = self.issue_pair(&user).await?;
        info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// Rotate a refresh token.
    ///
    /// Only the most recently issued refresh token is accepted. Presenting
    /// any other valid one revokes the stored token, forcing a new login.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let user = self
            .users
            .find_by_email(claims.email())
            .await?
            .ok_or_else(|| AppError::authentication("Could not validate credentials"))?;

        if !user.holds_refresh_token(refresh_token) {
            warn!(user_id = %user.id, "Stale refresh token presented, revoking session");
            self.users.update_refresh_token(user.id, None).await?;
            return Err(AppError::authentication("Invalid refresh token"));
        }

        self.issue_pair(&user).await
    }

    /// Confirm the mailbox named by an email token.
    pub async fn confirm_email(&self, token: &str) -> Result<&'static str, AppError> {
        let email = self.decoder.email_from_token(token)?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::bad_request("Verification error"))?;

        if user.confirmed {
            return Ok(MSG_ALREADY_CONFIRMED);
        }

        self.users.confirm_email(&user.email).await?;
        info!(user_id = %user.id, "Email confirmed");
        Ok(MSG_EMAIL_CONFIRMED)
    }

    /// Re-send the confirmation email.
    ///
    /// Unknown addresses get the same answer as known ones.
    pub async fn request_email(&self, email: &str, base_url: &str) -> Result<&'static str, AppError> {
        match self.users.find_by_email(email).await? {
            Some(user) if user.confirmed => Ok(MSG_ALREADY_CONFIRMED),
            Some(user) => {
                self.dispatch_verification(&user, base_url)?;
                Ok(MSG_CHECK_EMAIL)
            }
            None => Ok(MSG_CHECK_EMAIL),
        }
    }

    /// Resolve a bearer access token to the acting user.
    pub async fn authenticate(&self, access_token: &str) -> Result<RequestContext, AppError> {
        let claims = self.decoder.decode_access_token(access_token)?;
        let user = self
            .users
            .find_by_email(claims.email())
            .await?
            .ok_or_else(|| AppError::authentication("Could not validate credentials"))?;
        Ok(RequestContext::new(user))
    }

    async fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let pair = self.encoder.generate_token_pair(&user.email)?;
        self.users
            .update_refresh_token(user.id, Some(&pair.refresh_token))
            .await?;
        Ok(pair)
    }

    /// Mint an email token and deliver the link in the background.
    ///
    /// Delivery failures are logged only; the HTTP request has already
    /// succeeded by the time the mail goes out.
    fn dispatch_verification(&self, user: &User, base_url: &str) -> Result<(), AppError> {
        let token = self.encoder.create_email_token(&user.email)?;
        let confirm_url = format!("{base_url}{CONFIRM_PATH}/{token}");
        let mailer = Arc::clone(&self.mailer);
        let email = user.email.clone();
        let username = user.username.clone();

        tokio::spawn(async move {
            if let Err(e) = mailer
                .send_verification(&email, &username, &confirm_url)
                .await
            {
                warn!(to = %email, transport = mailer.transport(), error = %e, "Verification email failed");
            }
        });
        Ok(())
    }
}
