use anyhow::{Context, Result};
use rand::Rng;
use rand::rngs::OsRng;

/// bcrypt work factor for stored credentials
const HASH_COST: u32 = 10;

/// Characters a generated password may contain
pub const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

pub const MIN_GENERATED_LENGTH: usize = 6;
pub const DEFAULT_GENERATED_LENGTH: usize = 8;

/// Hash a plaintext password. A failure here must abort the surrounding
/// write: a record is never persisted with a plaintext password.
pub fn hash_password(plain: &str) -> Result<String> {
    bcrypt::hash(plain, HASH_COST).context("password hashing failed")
}

pub fn verify_password(plain: &str, hashed: &str) -> Result<bool> {
    bcrypt::verify(plain, hashed).context("password verification failed")
}

/// Resolve the requested generator length from the raw query value:
/// absent, non-numeric or zero falls back to the default, anything else is
/// clamped to the minimum.
pub fn resolve_length(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n != 0)
        .map(|n| n.max(MIN_GENERATED_LENGTH as i64) as usize)
        .unwrap_or(DEFAULT_GENERATED_LENGTH)
}

/// Generate a random password of exactly `length` characters drawn from
/// [`PASSWORD_CHARSET`], using the OS CSPRNG.
pub fn generate_password(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..PASSWORD_CHARSET.len());
            PASSWORD_CHARSET[idx] as char
        })
        .collect()
}
