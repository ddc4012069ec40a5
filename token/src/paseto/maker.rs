use chrono::Duration;
use rusty_paseto::core::Key;
use rusty_paseto::core::Local;
use rusty_paseto::core::Paseto;
use rusty_paseto::core::PasetoNonce;
use rusty_paseto::core::PasetoSymmetricKey;
use rusty_paseto::core::Payload as PasetoPayload;
use rusty_paseto::core::V2;

use crate::errors::TokenError;
use crate::maker::Maker;
use crate::payload::Payload;

/// XChaCha20-Poly1305 key size in bytes.
pub const KEY_SIZE: usize = 32;

const NONCE_SIZE: usize = 24;

/// PASETO v2.local token maker.
///
/// Claims are encrypted with XChaCha20-Poly1305; holders without the key can
/// neither read nor forge them. No footer is written or accepted.
pub struct PasetoMaker {
    symmetric_key: PasetoSymmetricKey<V2, Local>,
}

impl PasetoMaker {
    /// Create a new PASETO maker with a symmetric key.
    ///
    /// # Arguments
    /// * `symmetric_key` - Exactly 32 bytes of key material
    ///
    /// # Errors
    /// * `KeyTooShort` - Key is shorter than `KEY_SIZE`
    /// * `KeySizeMismatch` - Key is longer than `KEY_SIZE`
    pub fn new(symmetric_key: &str) -> Result<Self, TokenError> {
        let actual = symmetric_key.len();
        if actual < KEY_SIZE {
            return Err(TokenError::KeyTooShort {
                min: KEY_SIZE,
                actual,
            });
        }

        let bytes: [u8; KEY_SIZE] =
            symmetric_key
                .as_bytes()
                .try_into()
                .map_err(|_| TokenError::KeySizeMismatch {
                    expected: KEY_SIZE,
                    actual,
                })?;

        Ok(Self {
            symmetric_key: PasetoSymmetricKey::<V2, Local>::from(Key::<KEY_SIZE>::from(bytes)),
        })
    }

    fn encrypt(&self, message: &str) -> Result<String, TokenError> {
        let nonce =
            Key::<NONCE_SIZE>::try_new_random().map_err(|e| TokenError::Encoding(e.to_string()))?;

        Paseto::<V2, Local>::default()
            .set_payload(PasetoPayload::from(message))
            .try_encrypt(&self.symmetric_key, &PasetoNonce::<V2, Local>::from(&nonce))
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }
}

impl Maker for PasetoMaker {
    fn create_token(
        &self,
        username: &str,
        role: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(username, role, duration)?;

        let message =
            serde_json::to_string(&payload).map_err(|e| TokenError::Encoding(e.to_string()))?;
        let token = self.encrypt(&message)?;

        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let message = Paseto::<V2, Local>::try_decrypt(token, &self.symmetric_key, None)
            .map_err(|_| TokenError::InvalidToken)?;
        let payload: Payload =
            serde_json::from_str(&message).map_err(|_| TokenError::InvalidToken)?;

        payload.valid()?;

        Ok(payload)
    }
}
