//! JWT token validation and scope checking.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use contacts_core::config::AuthConfig;
use contacts_core::error::AppError;

use super::claims::{Claims, TokenScope};

const INVALID_CREDENTIALS: &str = "Could not validate credentials";
const INVALID_SCOPE: &str = "Invalid scope for token";
const INVALID_EMAIL_TOKEN: &str = "Invalid token for email verification";

/// Validates JWT signatures, expiry, and scope.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Validate a bearer access token.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_scoped(token, TokenScope::AccessToken)
    }

    /// Validate a refresh token.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_scoped(token, TokenScope::RefreshToken)
    }

    /// Extract the email from a confirmation token.
    ///
    /// Any failure is a validation error rather than an authentication one:
    /// the caller is not logged in, they submitted a bad link.
    pub fn email_from_token(&self, token: &str) -> Result<String, AppError> {
        let claims = self
            .decode_token(token)
            .map_err(|_| AppError::validation(INVALID_EMAIL_TOKEN))?;
        if claims.scope != TokenScope::EmailToken {
            return Err(AppError::validation(INVALID_EMAIL_TOKEN));
        }
        Ok(claims.sub)
    }

    fn decode_scoped(&self, token: &str, scope: TokenScope) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        if claims.scope != scope {
            debug!(expected = ?scope, actual = ?claims.scope, "Token presented with wrong scope");
            return Err(AppError::authentication(INVALID_SCOPE));
        }
        Ok(claims)
    }

    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                AppError::authentication(INVALID_CREDENTIALS)
            })
    }
}
