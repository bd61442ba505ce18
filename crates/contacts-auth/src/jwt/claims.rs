//! JWT claims carried by every token the API issues.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims payload shared by all token scopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account email.
    pub sub: String,
    /// What the token may be used for.
    pub scope: TokenScope,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token id. Keeps tokens minted in the same second distinct.
    pub jti: Uuid,
}

/// Purpose a token was minted for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    /// Short-lived bearer credential for API requests.
    AccessToken,
    /// Long-lived credential exchanged for a new token pair.
    RefreshToken,
    /// Proof of mailbox ownership sent in the confirmation email.
    EmailToken,
}

impl Claims {
    /// Returns the email the token was issued to.
    pub fn email(&self) -> &str {
        &self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_wire_names() {
        assert_eq!(
            serde_json::to_value(TokenScope::AccessToken).unwrap(),
            "access_token"
        );
        assert_eq!(
            serde_json::to_value(TokenScope::RefreshToken).unwrap(),
            "refresh_token"
        );
        assert_eq!(
            serde_json::to_value(TokenScope::EmailToken).unwrap(),
            "email_token"
        );
    }
}
