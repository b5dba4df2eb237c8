//! Password hashing.
//!
//! The hashing context is chosen once at startup: the configured primary
//! algorithm is probed with a throwaway password, and if that fails the
//! fallback algorithm (with library-default cost parameters) is used for the
//! rest of the process lifetime. Verification does not depend on that choice;
//! the algorithm and parameters are read back from the stored PHC string.

use anyhow::Result;
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::{info, warn};

use crate::config::{HashAlgorithm, SecurityConfig};

const PROBE_PASSWORD: &str = "probe";

impl From<HashAlgorithm> for Algorithm {
    fn from(value: HashAlgorithm) -> Self {
        match value {
            HashAlgorithm::Argon2id => Self::Argon2id,
            HashAlgorithm::Argon2i => Self::Argon2i,
            HashAlgorithm::Argon2d => Self::Argon2d,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CredentialHasher {
    algorithm: HashAlgorithm,
    params: Params,
    fallback: bool,
    decoy_hash: Option<String>,
}

impl CredentialHasher {
    /// Probes the primary algorithm and settles on the hashing context.
    #[must_use]
    pub fn initialize(config: &SecurityConfig) -> Self {
        match Self::probe_primary(config) {
            Ok(hasher) => {
                info!(
                    algorithm = hasher.algorithm.as_str(),
                    "Password hashing initialized"
                );
                hasher
            }
            Err(e) => {
                warn!(
                    primary = config.primary_algorithm.as_str(),
                    fallback = config.fallback_algorithm.as_str(),
                    error = %e,
                    "Primary password hash algorithm failed its probe, using fallback"
                );
                let mut hasher = Self {
                    algorithm: config.fallback_algorithm,
                    params: Params::default(),
                    fallback: true,
                    decoy_hash: None,
                };
                hasher.decoy_hash = hasher.hash(PROBE_PASSWORD).ok();
                hasher
            }
        }
    }

    fn probe_primary(config: &SecurityConfig) -> Result<Self> {
        let params = Params::new(
            config.argon2_memory_cost_kib,
            config.argon2_time_cost,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

        let mut hasher = Self {
            algorithm: config.primary_algorithm,
            params,
            fallback: false,
            decoy_hash: None,
        };
        hasher.decoy_hash = Some(hasher.hash(PROBE_PASSWORD)?);

        Ok(hasher)
    }

    #[must_use]
    pub const fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Hashes a password into a PHC string. CPU-heavy; call from a blocking task.
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(self.algorithm.into(), Version::V0x13, self.params.clone());

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

        Ok(hash.to_string())
    }

    /// Any failure, including a malformed stored hash, counts as "not verified".
    #[must_use]
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Runs a verification against the probe hash so that an unknown account
    /// costs about as much as a wrong password.
    pub fn verify_decoy(&self, password: &str) {
        if let Some(decoy) = &self.decoy_hash {
            let _ = self.verify(password, decoy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        }
    }

    #[test]
    fn primary_algorithm_is_used_when_probe_succeeds() {
        let hasher = CredentialHasher::initialize(&fast_config());
        assert!(!hasher.is_fallback());
        assert_eq!(hasher.algorithm(), HashAlgorithm::Argon2id);

        let hash = hasher.hash("secret-password").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("secret-password"));
        assert!(hasher.verify("secret-password", &hash));
        assert!(!hasher.verify("wrong-password", &hash));
    }

    #[test]
    fn invalid_primary_params_switch_to_fallback() {
        let config = SecurityConfig {
            // below the Argon2 minimum of 8 KiB per lane
            argon2_memory_cost_kib: 1,
            ..fast_config()
        };

        let hasher = CredentialHasher::initialize(&config);
        assert!(hasher.is_fallback());
        assert_eq!(hasher.algorithm(), HashAlgorithm::Argon2i);

        let hash = hasher.hash("secret-password").unwrap();
        assert!(hash.starts_with("$argon2i$"));
        assert!(hasher.verify("secret-password", &hash));
    }

    #[test]
    fn verification_detects_algorithm_from_stored_hash() {
        let primary = CredentialHasher::initialize(&fast_config());
        let fallback = CredentialHasher::initialize(&SecurityConfig {
            argon2_memory_cost_kib: 1,
            ..fast_config()
        });

        let from_primary = primary.hash("shared").unwrap();
        let from_fallback = fallback.hash("shared").unwrap();

        assert!(fallback.verify("shared", &from_primary));
        assert!(primary.verify("shared", &from_fallback));
    }

    #[test]
    fn malformed_hash_is_not_verified() {
        let hasher = CredentialHasher::initialize(&fast_config());
        assert!(!hasher.verify("anything", "not-a-phc-string"));
        assert!(!hasher.verify("anything", ""));
        assert!(!hasher.verify("anything", "$2b$12$bcryptlookingbutnotsupported"));
    }
}
