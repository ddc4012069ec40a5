//! Token issuing and verification library
//!
//! Mints short-lived tokens binding a username and role to an expiry window, in one
//! of two interchangeable formats:
//! - Signed JWT (HS256): claims readable by the holder, integrity protected
//! - PASETO v2.local: claims encrypted with XChaCha20-Poly1305
//!
//! Both formats implement the [`Maker`] trait, so services pick a format at
//! configuration time and stay indifferent to it afterwards. The library is
//! stateless: issued tokens are not tracked and cannot be revoked.
//!
//! # Examples
//!
//! ## Signed tokens
//! ```
//! use chrono::Duration;
//! use token::{JwtMaker, Maker};
//!
//! let maker = JwtMaker::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let (token, payload) = maker.create_token("alice", "depositor", Duration::minutes(15)).unwrap();
//! let verified = maker.verify_token(&token).unwrap();
//! assert_eq!(verified, payload);
//! ```
//!
//! ## Format chosen from configuration
//! ```
//! use chrono::Duration;
//! use token::{new_maker, MakerKind, TokenError};
//!
//! let maker = new_maker(MakerKind::Paseto, "abcdefghijklmnopqrstuvwxyz012345").unwrap();
//! let (token, _) = maker.create_token("alice", "banker", Duration::minutes(-1)).unwrap();
//! assert_eq!(maker.verify_token(&token), Err(TokenError::ExpiredToken));
//! ```

pub mod errors;
pub mod jwt;
pub mod maker;
pub mod paseto;
pub mod payload;

// Re-export commonly used items
pub use errors::PayloadError;
pub use errors::TokenError;
pub use jwt::JwtMaker;
pub use maker::new_maker;
pub use maker::Maker;
pub use maker::MakerKind;
pub use paseto::PasetoMaker;
pub use payload::Payload;
