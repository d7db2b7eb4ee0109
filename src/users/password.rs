use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::error;

/// Derives a salted one-way hash of the plaintext. Runs on the blocking
/// pool; the caller suspends exactly once.
pub async fn hash_password(plain: &str, time_cost: u32) -> anyhow::Result<String> {
    let plain = plain.to_owned();
    tokio::task::spawn_blocking(move || hash_blocking(&plain, time_cost)).await?
}

/// Checks the plaintext against a stored hash. A malformed hash is an
/// error, distinct from a clean mismatch.
pub async fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let plain = plain.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || verify_blocking(&plain, &hash)).await?
}

fn hash_blocking(plain: &str, time_cost: u32) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let params = Params::new(Params::DEFAULT_M_COST, time_cost, Params::DEFAULT_P_COST, None)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

fn verify_blocking(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password, 1).await.expect("hashing should succeed");
        assert_ne!(hash, password);
        assert!(verify_password(password, &hash)
            .await
            .expect("verify should succeed"));
    }

    #[tokio::test]
    async fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password, 1).await.expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash)
            .await
            .expect("verify should not error"));
    }

    #[tokio::test]
    async fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash")
            .await
            .unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn salts_differ_between_hashes() {
        let h1 = hash_password("same-password", 1).await.expect("hash 1");
        let h2 = hash_password("same-password", 1).await.expect("hash 2");
        assert_ne!(h1, h2);
    }
}
