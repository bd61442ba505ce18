//! Default avatar URLs.

use sha2::{Digest, Sha256};

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar";

/// Gravatar identicon URL for `email`, hashed as Gravatar expects
/// (trimmed, lowercased, SHA-256).
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!("{GRAVATAR_BASE}/{digest:x}?d=identicon")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_ignores_case_and_whitespace() {
        assert_eq!(
            gravatar_url(" Alan@Example.com "),
            gravatar_url("alan@example.com")
        );
    }

    #[test]
    fn test_url_shape() {
        let url = gravatar_url("alan@example.com");
        let hash = url
            .strip_prefix("https://www.gravatar.com/avatar/")
            .and_then(|rest| rest.strip_suffix("?d=identicon"))
            .unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
