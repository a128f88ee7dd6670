use argon2::{
    password_hash::SaltString, Algorithm, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    Version,
};
use rand::rngs::OsRng;
use tracing::{debug, error};

use crate::config::PasswordConfig;

pub fn hash_password(plain: &str, cfg: &PasswordConfig) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, cfg.params()?);
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Cost parameters are read back from the digest, so hashes made under an
/// older configuration keep verifying.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            debug!(error = %e, "stored digest is not a valid PHC string");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// Runs hashing on the blocking pool; argon2 is deliberately slow.
pub async fn hash_password_blocking(plain: String, cfg: PasswordConfig) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain, &cfg)).await?
}

pub async fn verify_password_blocking(plain: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
        .await
        .unwrap_or_else(|e| {
            error!(error = %e, "verify_password task failed");
            false
        })
}
