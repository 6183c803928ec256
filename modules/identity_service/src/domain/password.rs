//! Password hashes and session token generation
//!
//! New hashes are Argon2id PHC strings (`$argon2id$v=19$...`). Hashes in the
//! older `sha256$<salt-hex>$<digest-hex>` form, where
//! `digest = sha256(salt || password)`, still verify so existing accounts can
//! log in.

use anyhow::{anyhow, Result};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;
use sha2::{Digest, Sha256};

const LEGACY_SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;
const TOKEN_LEN: usize = 32;

pub fn hash_password(password: &str) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill(&mut salt);
    let salt = SaltString::encode_b64(&salt).map_err(|e| anyhow!("invalid password salt: {e}"))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("password hashing failed: {e}"))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    if stored.starts_with('$') {
        return PasswordHash::new(stored).is_ok_and(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), &hash)
                .is_ok()
        });
    }
    verify_legacy(password, stored)
}

/// Hashes written before Argon2; true when `stored` should be re-hashed
pub fn needs_rehash(stored: &str) -> bool {
    !stored.starts_with("$argon2")
}

fn verify_legacy(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some(scheme), Some(salt_hex), Some(expected)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != LEGACY_SCHEME {
        return false;
    }
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    constant_time_eq(legacy_digest(&salt, password).as_bytes(), expected.as_bytes())
}

/// New random session token (hex) for the cookie
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_LEN];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// Storage key for a session token
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn legacy_digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
