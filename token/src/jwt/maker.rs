use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::TokenError;
use crate::maker::Maker;
use crate::payload::Payload;

/// Minimum secret length accepted for HS256 signing.
pub const MIN_SECRET_KEY_SIZE: usize = 32;

/// JSON Web Token maker.
///
/// Claims are base64url encoded and readable by anyone holding the token; only
/// their integrity is protected, by an HS256 signature.
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

/// Wire claims: the payload plus the registered `exp` claim in seconds.
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    #[serde(flatten)]
    payload: Payload,
    exp: i64,
}

impl From<Payload> for JwtClaims {
    fn from(payload: Payload) -> Self {
        let exp = payload.expired_at.timestamp();
        Self { payload, exp }
    }
}

impl JwtMaker {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Create a new JWT maker with a secret key.
    ///
    /// # Arguments
    /// * `secret_key` - Secret used for signing, at least 32 bytes
    ///
    /// # Errors
    /// * `KeyTooShort` - Secret is shorter than `MIN_SECRET_KEY_SIZE`
    pub fn new(secret_key: &str) -> Result<Self, TokenError> {
        if secret_key.len() < MIN_SECRET_KEY_SIZE {
            return Err(TokenError::KeyTooShort {
                min: MIN_SECRET_KEY_SIZE,
                actual: secret_key.len(),
            });
        }

        // Only HS256 is accepted. `exp` has second resolution, so the payload's
        // own `expired_at` is still checked after decoding.
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret_key.as_bytes()),
            validation,
        })
    }
}

impl Maker for JwtMaker {
    fn create_token(
        &self,
        username: &str,
        role: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(username, role, duration)?;

        let claims = JwtClaims::from(payload);
        let token = encode(&Header::new(Self::ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok((token, claims.payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let payload = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(classify)?
            .claims
            .payload;

        payload.valid()?;

        Ok(payload)
    }
}

fn classify(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
        _ => TokenError::InvalidToken,
    }
}
