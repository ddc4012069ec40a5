use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use chrono::Duration;
use token::new_maker;
use token::JwtMaker;
use token::Maker;
use token::MakerKind;
use token::PasetoMaker;
use token::TokenError;

const KEY: &str = "abcdefghijklmnopqrstuvwxyz012345";
const OTHER_KEY: &str = "543210zyxwvutsrqponmlkjihgfedcba";
const KINDS: [MakerKind; 2] = [MakerKind::Jwt, MakerKind::Paseto];

fn maker(kind: MakerKind, key: &str) -> Box<dyn Maker> {
    new_maker(kind, key).expect("Failed to build maker")
}

/// Replace the character at `index` with a different base64url character.
fn tamper_at(token: &str, index: usize) -> String {
    let mut bytes = token.as_bytes().to_vec();
    bytes[index] = if bytes[index] == b'A' { b'g' } else { b'A' };
    String::from_utf8(bytes).unwrap()
}

#[test]
fn test_round_trip_preserves_claims() {
    for kind in KINDS {
        let maker = maker(kind, KEY);
        let duration = Duration::minutes(15);

        let (token, payload) = maker
            .create_token("alice", "depositor", duration)
            .expect("Failed to create token");
        assert!(!token.is_empty());

        let verified = maker.verify_token(&token).expect("Failed to verify token");
        assert_eq!(verified.id, payload.id);
        assert_eq!(verified.username, "alice");
        assert_eq!(verified.role, "depositor");
        assert_eq!(verified.issued_at, payload.issued_at);
        assert_eq!(verified.expired_at, verified.issued_at + duration);
    }
}

#[test]
fn test_short_keys_are_rejected() {
    for key in ["", "a", "abcdefghijklmnopqrstuvwxyz01234"] {
        assert!(matches!(
            JwtMaker::new(key),
            Err(TokenError::KeyTooShort { min: 32, .. })
        ));
        assert!(matches!(
            PasetoMaker::new(key),
            Err(TokenError::KeyTooShort { min: 32, .. })
        ));
    }
}

#[test]
fn test_non_positive_duration_is_expired() {
    for kind in KINDS {
        let maker = maker(kind, KEY);

        for duration in [Duration::zero(), Duration::seconds(-30)] {
            let (token, payload) = maker
                .create_token("alice", "depositor", duration)
                .expect("Degenerate duration must still create a token");
            assert!(payload.expired_at <= payload.issued_at);

            assert_eq!(maker.verify_token(&token), Err(TokenError::ExpiredToken));
        }
    }
}

#[test]
fn test_tampered_signed_token_is_invalid() {
    let maker = maker(MakerKind::Jwt, KEY);
    let (token, _) = maker
        .create_token("alice", "depositor", Duration::minutes(1))
        .unwrap();

    for (index, c) in token.char_indices() {
        if c == '.' {
            continue;
        }
        let tampered = tamper_at(&token, index);
        assert_eq!(
            maker.verify_token(&tampered),
            Err(TokenError::InvalidToken),
            "tampering at {index} was accepted"
        );
    }
}

#[test]
fn test_tampered_encrypted_token_is_invalid() {
    let maker = maker(MakerKind::Paseto, KEY);
    let (token, _) = maker
        .create_token("alice", "depositor", Duration::minutes(1))
        .unwrap();

    for index in "v2.local.".len()..token.len() {
        let tampered = tamper_at(&token, index);
        assert_eq!(
            maker.verify_token(&tampered),
            Err(TokenError::InvalidToken),
            "tampering at {index} was accepted"
        );
    }
}

#[test]
fn test_cross_key_verification_fails() {
    for kind in KINDS {
        let issuer = maker(kind, KEY);
        let stranger = maker(kind, OTHER_KEY);
        let twin = maker(kind, KEY);

        let (token, payload) = issuer
            .create_token("alice", "depositor", Duration::minutes(1))
            .unwrap();

        assert_eq!(stranger.verify_token(&token), Err(TokenError::InvalidToken));
        assert_eq!(twin.verify_token(&token), Ok(payload));
    }
}

#[test]
fn test_formats_do_not_cross_verify() {
    let jwt = maker(MakerKind::Jwt, KEY);
    let paseto = maker(MakerKind::Paseto, KEY);

    let (signed, _) = jwt.create_token("alice", "banker", Duration::minutes(1)).unwrap();
    let (encrypted, _) = paseto
        .create_token("alice", "banker", Duration::minutes(1))
        .unwrap();

    assert_eq!(paseto.verify_token(&signed), Err(TokenError::InvalidToken));
    assert_eq!(jwt.verify_token(&encrypted), Err(TokenError::InvalidToken));
}

#[test]
fn test_repeated_creation_is_not_deterministic() {
    for kind in KINDS {
        let maker = maker(kind, KEY);

        let (first_token, first) = maker
            .create_token("alice", "depositor", Duration::minutes(1))
            .unwrap();
        let (second_token, second) = maker
            .create_token("alice", "depositor", Duration::minutes(1))
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(first_token, second_token);
    }
}

#[test]
fn test_concurrent_use() {
    for kind in KINDS {
        let maker: Arc<dyn Maker> = Arc::from(maker(kind, KEY));

        let ids: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|worker| {
                    let maker = Arc::clone(&maker);
                    scope.spawn(move || {
                        (0..25)
                            .map(|_| {
                                let username = format!("user-{worker}");
                                let (token, payload) = maker
                                    .create_token(&username, "depositor", Duration::minutes(1))
                                    .expect("Failed to create token");
                                let verified =
                                    maker.verify_token(&token).expect("Failed to verify token");
                                assert_eq!(verified.username, username);
                                payload.id
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap())
                .collect()
        });

        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 8 * 25);
    }
}
