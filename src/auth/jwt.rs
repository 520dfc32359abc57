//! # Token Issuer/Verifier
//!
//! Issues and validates the signed, time-bound bearer tokens that gate
//! access to protected vendor operations. Tokens are HS256 JWTs signed
//! with the shared secret from `JWT_SECRET`; the identity claim (`sub`)
//! is the vendor's email.
//!
//! There is no revocation list — expiry (1 hour by default) is the only
//! lifetime bound. Verification runs with zero leeway so that bound is
//! exact.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity claim: the vendor's email.
    pub sub: String,

    /// Issued-at, seconds since the epoch.
    pub iat: i64,

    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Issues and verifies bearer tokens.
///
/// Constructed once at startup from configuration and shared via the
/// application state; cheap to clone.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenIssuer {
    /// Build an issuer from the shared secret and token lifetime.
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs: ttl_secs as i64,
        }
    }

    /// Issue a token bound to the given vendor email.
    ///
    /// The token expires `ttl_secs` after issuance.
    pub fn issue(&self, email: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: email.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Fails with `Expired` when the expiry window has passed and
    /// `InvalidToken` for anything else (bad signature, malformed token).
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Default leeway is 60s; the expiry bound here is exact.
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken,
            })
    }
}

/// Extract the token segment from an `Authorization: Bearer <token>`
/// header value. Returns `None` when the scheme or segment is absent.
pub fn extract_bearer(header_value: &str) -> Option<&str> {
    let mut parts = header_value.splitn(2, ' ');
    match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Some(token)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", 3600)
    }

    #[test]
    fn issued_token_verifies_immediately() {
        let issuer = issuer();
        let token = issuer.issue("a@b.com").unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, "a@b.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Sign a token whose expiry is firmly in the past.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "a@b.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        match issuer().verify(&token) {
            Err(AuthError::Expired) => {}
            other => panic!("expected Expired, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = TokenIssuer::new("other-secret", 3600)
            .issue("a@b.com")
            .unwrap();
        assert!(matches!(
            issuer().verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            issuer().verify("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(extract_bearer("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer("bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer("Bearer"), None);
        assert_eq!(extract_bearer("Bearer "), None);
        assert_eq!(extract_bearer("Basic abc123"), None);
        assert_eq!(extract_bearer(""), None);
    }
}
