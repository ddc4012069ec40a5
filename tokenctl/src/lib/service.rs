use chrono::Duration;
use serde::Serialize;
use token::new_maker;
use token::Maker;
use token::MakerKind;
use token::Payload;
use token::TokenError;

use crate::config::TokenConfig;

/// Issued token together with the claims it carries.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub payload: Payload,
}

/// Issues and verifies access tokens with the configured maker.
pub struct TokenService {
    maker: Box<dyn Maker>,
    kind: MakerKind,
    access_token_duration: Duration,
}

impl TokenService {
    pub fn new(maker: Box<dyn Maker>, kind: MakerKind, access_token_duration: Duration) -> Self {
        Self {
            maker,
            kind,
            access_token_duration,
        }
    }

    /// Build the service from configuration.
    ///
    /// # Errors
    /// * `KeyTooShort` / `KeySizeMismatch` - Configured key does not fit the token kind
    pub fn from_config(config: &TokenConfig) -> Result<Self, TokenError> {
        let maker = new_maker(config.kind, &config.symmetric_key)?;
        Ok(Self::new(maker, config.kind, config.access_token_duration))
    }

    pub fn kind(&self) -> MakerKind {
        self.kind
    }

    /// Issue a token, falling back to the configured lifetime.
    pub fn issue(
        &self,
        username: &str,
        role: &str,
        duration: Option<Duration>,
    ) -> Result<IssuedToken, TokenError> {
        let duration = duration.unwrap_or(self.access_token_duration);

        let (token, payload) = self
            .maker
            .create_token(username, role, duration)
            .map_err(|e| {
                tracing::error!(error = %e, kind = %self.kind, username, role, "Token creation failed");
                e
            })?;

        tracing::info!(
            kind = %self.kind,
            token_id = %payload.id,
            username = %payload.username,
            role = %payload.role,
            expired_at = %payload.expired_at,
            "Token issued"
        );

        Ok(IssuedToken { token, payload })
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Payload, TokenError> {
        match self.maker.verify_token(token) {
            Ok(payload) => {
                tracing::info!(
                    kind = %self.kind,
                    token_id = %payload.id,
                    username = %payload.username,
                    "Token verified"
                );
                Ok(payload)
            }
            Err(e) => {
                tracing::warn!(error = %e, kind = %self.kind, "Token verification failed");
                Err(e)
            }
        }
    }
}
