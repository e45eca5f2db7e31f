//! Bearer token issuance and verification.
//!
//! Tokens are stateless: validity is a pure function of the token string,
//! the server-held secret, and the clock. There is no server-side session
//! record and no revocation list.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind, get_current_timestamp,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use paperleaf_core::Email;

/// Fixed token lifetime: 24 hours from issuance.
pub const TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Errors from token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing failed; the secret is unusable.
    #[error("token signing failed")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// The token is past its expiry.
    #[error("token is expired")]
    Expired,

    /// Bad signature or malformed structure.
    #[error("token is invalid")]
    Invalid,
}

/// The identity payload carried inside a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's login email.
    pub sub: String,
    /// Issued-at (Unix seconds).
    pub iat: u64,
    /// Expiry (Unix seconds).
    pub exp: u64,
}

/// Issues and verifies HS256-signed bearer tokens.
///
/// Holds the derived signing keys; the secret itself is read once at
/// construction and not retained.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    /// Create a token service from the server secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a signed token for an email identity.
    ///
    /// Claims are `{ sub: email, iat: now, exp: now + TTL }`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if signing fails.
    pub fn issue(&self, email: &Email) -> Result<String, TokenError> {
        let now = get_current_timestamp();
        let claims = Claims {
            sub: email.as_str().to_owned(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// No store lookup happens here; resolving the subject to a live user
    /// is the session guard's job.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` past expiry, `TokenError::Invalid` for
    /// a bad signature or malformed structure.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&SecretString::from("kX9$mP2&vQ7!wL4@nR8#tY3^zB6*cF1%"))
    }

    fn email() -> Email {
        Email::parse("reader@example.com").unwrap()
    }

    #[test]
    fn test_issue_then_verify_yields_subject() {
        let tokens = service();
        let token = tokens.issue(&email()).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "reader@example.com");
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECS);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = service().issue(&email()).unwrap();

        let other = TokenService::new(&SecretString::from("aJ5^dH8!qN3$sV6&gK1@xM9#wP4*zT7%"));
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let tokens = service();
        assert!(matches!(tokens.verify("not-a-token"), Err(TokenError::Invalid)));
        assert!(matches!(tokens.verify(""), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_rejects_expired() {
        let tokens = service();

        // Sign claims whose expiry is already in the past with the same key.
        let now = get_current_timestamp();
        let claims = Claims {
            sub: "reader@example.com".to_owned(),
            iat: now - 2 * TOKEN_TTL_SECS,
            exp: now - TOKEN_TTL_SECS,
        };
        let token = encode(&Header::default(), &claims, &tokens.encoding).unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let tokens = service();
        let token = tokens.issue(&email()).unwrap();

        // Flip a character in the payload segment.
        let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
        let payload = parts.get_mut(1).unwrap();
        payload.push('x');
        let tampered = parts.join(".");

        assert!(matches!(tokens.verify(&tampered), Err(TokenError::Invalid)));
    }
}
