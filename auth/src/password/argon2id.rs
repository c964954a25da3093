use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;

/// Algorithm identifier written into the first field of every encoded hash.
pub const ALGORITHM_ID: &str = "argon2id";

/// Time cost (iterations).
pub const TIME_COST: u32 = 3;

/// Memory cost in KiB (64 MiB).
pub const MEMORY_COST: u32 = 64 * 1024;

/// Degree of parallelism (lanes).
pub const PARALLELISM: u32 = 4;

/// Derived key length in bytes.
pub const KEY_LENGTH: usize = 32;

/// Salt length in bytes.
pub const SALT_LENGTH: usize = 16;

const SEPARATOR: char = '$';

/// Password hashing implementation.
///
/// Produces self-describing Argon2id hashes of the form
/// `$argon2id$v=19$m=65536,t=3,p=4$<salt>$<key>` (unpadded standard base64).
///
/// Every call works on a 64 MiB block of memory. Callers serving concurrent
/// logins should bound the number of in-flight operations.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Any password is accepted, including the empty string.
    ///
    /// # Errors
    /// * `HashingFailed` - Key derivation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut salt);

        let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(KEY_LENGTH))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        let mut key = [0u8; KEY_LENGTH];
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password_into(password.as_bytes(), &salt, &mut key)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(format!(
            "{sep}{ALGORITHM_ID}{sep}v={}{sep}m={MEMORY_COST},t={TIME_COST},p={PARALLELISM}{sep}{}{sep}{}",
            Version::V0x13 as u32,
            STANDARD_NO_PAD.encode(salt),
            STANDARD_NO_PAD.encode(key),
            sep = SEPARATOR,
        ))
    }

    /// Verify a password against a stored hash.
    ///
    /// The key is re-derived with the cost parameters embedded in `hash`,
    /// not with the current defaults, and compared in constant time.
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidHash` - Hash is empty, malformed or not argon2id
    /// * `IncompatibleVersion` - Hash was produced by another argon2 version
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        if hash.is_empty() {
            return Err(PasswordError::InvalidHash);
        }

        let encoded = EncodedHash::parse(hash)?;

        let params = Params::new(
            encoded.memory_cost,
            encoded.time_cost,
            encoded.parallelism,
            Some(encoded.key.len()),
        )
        .map_err(|_| PasswordError::InvalidHash)?;

        let mut computed = vec![0u8; encoded.key.len()];
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password_into(password.as_bytes(), &encoded.salt, &mut computed)
            .map_err(|_| PasswordError::InvalidHash)?;

        Ok(computed.ct_eq(&encoded.key).into())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoded fields of a stored hash.
struct EncodedHash {
    memory_cost: u32,
    time_cost: u32,
    parallelism: u32,
    salt: Vec<u8>,
    key: Vec<u8>,
}

impl EncodedHash {
    fn parse(hash: &str) -> Result<Self, PasswordError> {
        let fields: Vec<&str> = hash.split(SEPARATOR).collect();
        if fields.len() != 6 || !fields[0].is_empty() {
            return Err(PasswordError::InvalidHash);
        }

        if fields[1] != ALGORITHM_ID {
            return Err(PasswordError::InvalidHash);
        }

        let version: u32 = fields[2]
            .strip_prefix("v=")
            .and_then(|v| v.parse().ok())
            .ok_or(PasswordError::InvalidHash)?;
        if version != Version::V0x13 as u32 {
            return Err(PasswordError::IncompatibleVersion);
        }

        let (memory_cost, time_cost, parallelism) =
            parse_cost(fields[3]).ok_or(PasswordError::InvalidHash)?;

        let salt = STANDARD_NO_PAD
            .decode(fields[4])
            .map_err(|_| PasswordError::InvalidHash)?;
        let key = STANDARD_NO_PAD
            .decode(fields[5])
            .map_err(|_| PasswordError::InvalidHash)?;

        Ok(Self {
            memory_cost,
            time_cost,
            parallelism,
            salt,
            key,
        })
    }
}

/// Parse `m=<uint>,t=<uint>,p=<uint>`.
fn parse_cost(field: &str) -> Option<(u32, u32, u32)> {
    let mut parts = field.split(',');
    let memory = parts.next()?.strip_prefix("m=")?.parse().ok()?;
    let time = parts.next()?.strip_prefix("t=")?.parse().ok()?;
    let parallelism = parts.next()?.strip_prefix("p=")?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((memory, time, parallelism))
}
