use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::TokenError;
use crate::jwt::JwtMaker;
use crate::paseto::PasetoMaker;
use crate::payload::Payload;

/// Port for issuing and verifying tokens.
///
/// Implementations only hold immutable key material, so a single instance can be
/// shared between threads.
pub trait Maker: Send + Sync + 'static {
    /// Create a new token for a user.
    ///
    /// # Arguments
    /// * `username` - Identity asserted by the token
    /// * `role` - Role asserted by the token
    /// * `duration` - Lifetime of the token from now
    ///
    /// # Returns
    /// Token string and the claims it carries
    ///
    /// # Errors
    /// * `Payload` - Claims could not be built
    /// * `Encoding` - Token serialization failed
    fn create_token(
        &self,
        username: &str,
        role: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError>;

    /// Verify a token and return its claims.
    ///
    /// # Arguments
    /// * `token` - Token string to verify
    ///
    /// # Returns
    /// Claims carried by the token
    ///
    /// # Errors
    /// * `ExpiredToken` - Token is authentic but past its expiry
    /// * `InvalidToken` - Token is malformed, tampered with, or issued under another key
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}

/// Token format selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MakerKind {
    /// HS256 signed JWT, claims readable by the holder
    Jwt,
    /// PASETO v2.local, claims encrypted
    Paseto,
}

impl fmt::Display for MakerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MakerKind::Jwt => f.write_str("jwt"),
            MakerKind::Paseto => f.write_str("paseto"),
        }
    }
}

impl FromStr for MakerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jwt" => Ok(MakerKind::Jwt),
            "paseto" => Ok(MakerKind::Paseto),
            other => Err(format!("unknown token kind: {other} (expected jwt or paseto)")),
        }
    }
}

/// Build the maker for a token format.
///
/// # Arguments
/// * `kind` - Token format
/// * `key` - Secret key (JWT) or symmetric key (PASETO)
///
/// # Errors
/// * `KeyTooShort` / `KeySizeMismatch` - Key does not fit the chosen format
pub fn new_maker(kind: MakerKind, key: &str) -> Result<Box<dyn Maker>, TokenError> {
    match kind {
        MakerKind::Jwt => Ok(Box::new(JwtMaker::new(key)?)),
        MakerKind::Paseto => Ok(Box::new(PasetoMaker::new(key)?)),
    }
}
