//! Salted one-way password hashing.
//!
//! PBKDF2-HMAC-SHA256 with a per-password random salt. Stored hashes are
//! self-describing (`pbkdf2-sha256$<iterations>$<salt>$<digest>`) so the
//! iteration count can be raised later without invalidating existing records.

use crate::{StoreError, StoreResult};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

pub const PBKDF2_ITERATIONS: u32 = 600_000;
pub const SALT_LENGTH: usize = 16;
pub const KEY_LENGTH: usize = 32;

const SCHEME: &str = "pbkdf2-sha256";

/// Hash a password with a freshly generated salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);

    let derived = derive(password, &salt, PBKDF2_ITERATIONS);
    format!(
        "{SCHEME}${PBKDF2_ITERATIONS}${}${}",
        hex::encode(salt),
        hex::encode(derived)
    )
}

/// Verify a password against a stored hash.
///
/// # Errors
///
/// Returns `StoreError::PasswordHash` when the stored value is not a valid
/// `pbkdf2-sha256` record; a mismatching password is `Ok(false)`.
pub fn verify_password(password: &str, stored: &str) -> StoreResult<bool> {
    let mut parts = stored.split('$');
    let (scheme, iterations, salt_hex, digest_hex) =
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(s), Some(i), Some(salt), Some(digest)) if parts.next().is_none() => {
                (s, i, salt, digest)
            }
            _ => {
                return Err(StoreError::PasswordHash(
                    "stored hash has an unexpected shape".into(),
                ))
            }
        };

    if scheme != SCHEME {
        return Err(StoreError::PasswordHash(format!(
            "unsupported hash scheme {scheme}"
        )));
    }

    let iterations: u32 = iterations
        .parse()
        .map_err(|_| StoreError::PasswordHash("invalid iteration count".into()))?;
    let salt =
        hex::decode(salt_hex).map_err(|e| StoreError::PasswordHash(format!("bad salt: {e}")))?;
    let expected = hex::decode(digest_hex)
        .map_err(|e| StoreError::PasswordHash(format!("bad digest: {e}")))?;

    let derived = derive(password, &salt, iterations);
    Ok(constant_time_eq(&derived, &expected))
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; KEY_LENGTH] {
    let mut out = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hashing at the production iteration count is slow by design, so the
    // round-trip tests share a single hash.
    #[test]
    fn hash_and_verify_round_trip() {
        let stored = hash_password("correct horse");
        assert!(verify_password("correct horse", &stored).expect("verify should parse"));
        assert!(!verify_password("wrong horse", &stored).expect("verify should parse"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("hunter2");
        let b = hash_password("hunter2");
        assert_ne!(a, b, "salting must randomise the stored hash");
    }

    #[test]
    fn stored_hash_is_self_describing() {
        let stored = hash_password("pw");
        let parts: Vec<&str> = stored.split('$').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "pbkdf2-sha256");
        assert_eq!(parts[1], PBKDF2_ITERATIONS.to_string());
        assert_eq!(parts[2].len(), SALT_LENGTH * 2);
        assert_eq!(parts[3].len(), KEY_LENGTH * 2);
    }

    #[test]
    fn malformed_stored_hashes_are_errors_not_mismatches() {
        for stored in ["", "plain", "md5$1$aa$bb", "pbkdf2-sha256$x$aa$bb"] {
            let err = verify_password("pw", stored)
                .expect_err("malformed hash should be an error");
            assert!(matches!(err, StoreError::PasswordHash(_)));
        }
    }
}
