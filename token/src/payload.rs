use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::PayloadError;
use crate::errors::TokenError;

/// Claims carried by every token, whichever maker produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payload {
    /// Random token identifier
    pub id: Uuid,

    /// Identity asserted by the token
    pub username: String,

    /// Authorization tag asserted for the identity
    pub role: String,

    /// Creation time
    pub issued_at: DateTime<Utc>,

    /// Time after which the token is no longer accepted
    pub expired_at: DateTime<Utc>,
}

impl Payload {
    /// Create claims for a user, valid from now for `duration`.
    ///
    /// Zero or negative durations are accepted and yield claims that are
    /// already expired.
    ///
    /// # Arguments
    /// * `username` - Identity to assert
    /// * `role` - Role to assert
    /// * `duration` - Lifetime of the token
    ///
    /// # Errors
    /// * `IdGeneration` - The OS random source failed
    /// * `DurationOutOfRange` - `now + duration` is not a representable time
    pub fn new(
        username: impl Into<String>,
        role: impl Into<String>,
        duration: Duration,
    ) -> Result<Self, PayloadError> {
        let id = random_id()?;
        let issued_at = Utc::now();
        let expired_at = issued_at
            .checked_add_signed(duration)
            .ok_or(PayloadError::DurationOutOfRange)?;

        Ok(Self {
            id,
            username: username.into(),
            role: role.into(),
            issued_at,
            expired_at,
        })
    }

    /// Check whether the claims are expired at a given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expired_at
    }

    /// Check the claims against the current time.
    ///
    /// # Errors
    /// * `ExpiredToken` - Current time is past `expired_at`
    pub fn valid(&self) -> Result<(), TokenError> {
        if self.is_expired_at(Utc::now()) {
            return Err(TokenError::ExpiredToken);
        }
        Ok(())
    }
}

fn random_id() -> Result<Uuid, PayloadError> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes).map_err(|e| PayloadError::IdGeneration(e.to_string()))?;
    Ok(uuid::Builder::from_random_bytes(bytes).into_uuid())
}
