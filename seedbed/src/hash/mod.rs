// One-way password hashing for `password` columns

use crate::error::{Result, SeedError};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

/// Prefix every hash produced by [`hash_password`] starts with.
pub const HASH_PREFIX: &str = "$argon2id$";

/// Hash a plaintext password with Argon2id at its minimum cost parameters.
/// Fixture passwords only need to be verifiable, not expensive to crack.
pub fn hash_password(password: &str) -> Result<String> {
    let params = Params::new(
        Params::MIN_M_COST,
        Params::MIN_T_COST,
        Params::MIN_P_COST,
        None,
    )
    .map_err(|e| SeedError::Hash(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut salt_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| SeedError::Hash(e.to_string()))?;

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SeedError::Hash(e.to_string()))
}

/// Check a plaintext password against a hash from [`hash_password`].
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| SeedError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("secret").unwrap();
        assert_ne!(hash, "secret");
        assert!(hash.starts_with(HASH_PREFIX), "unexpected hash: {hash}");
    }

    #[test]
    fn test_hash_is_salted() {
        assert_ne!(hash_password("secret").unwrap(), hash_password("secret").unwrap());
    }

    #[test]
    fn test_verify() {
        let hash = hash_password("secret").unwrap();
        assert!(verify_password("secret", &hash).unwrap());
        assert!(!verify_password("Secret", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(verify_password("secret", "not a hash").is_err());
    }
}
