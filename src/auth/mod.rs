//! # Authentication Module
//!
//! Everything credential-shaped lives here:
//!
//! | Submodule | Responsibility |
//! |-----------|---------------|
//! | `password` | bcrypt hashing and verification |
//! | `jwt` | Issuing and verifying bearer tokens |
//! | `gate` | Middleware rejecting requests without a valid token |

pub mod gate;
pub mod jwt;
pub mod password;

pub use gate::AccessGate;
pub use jwt::{Claims, TokenIssuer};
pub use password::{hash_password, verify_password};

use thiserror::Error;

/// Authentication and authorization failures.
///
/// The split matters for status codes: a missing token is
/// `Unauthenticated` (401), while a token that is present but invalid
/// or expired is `Forbidden` (403).
#[derive(Error, Debug)]
pub enum AuthError {
    /// No authorization header, or no token segment after "Bearer".
    #[error("Token required.")]
    MissingToken,

    /// Signature check failed or the token is malformed.
    #[error("Invalid or expired token.")]
    InvalidToken,

    /// The token's expiry window has passed.
    #[error("Invalid or expired token.")]
    Expired,

    /// Signing a new token failed.
    #[error("Failed to issue token: {0}")]
    TokenCreation(String),

    /// Password hashing or verification failed.
    #[error("Credential processing failed: {0}")]
    Hashing(String),
}
