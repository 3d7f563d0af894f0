//! Credential hashing and the login verification policy.
//!
//! New hashes are argon2id PHC strings. Databases written by earlier
//! deployments hold bare SHA-256 hex digests; those still verify.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// What happens when a known student logs in again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialPolicy {
  /// Universal login: any credential is accepted for a known student. The
  /// stored hash is kept but never checked.
  #[default]
  Permissive,
  /// The credential must match the hash stored at first contact.
  Verify,
}

/// Hash a credential for storage.
pub fn hash_credential(credential: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(credential.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| Error::CredentialHash(e.to_string()))
}

/// Hex-encoded SHA-256 of `credential`, the legacy stored form.
pub fn legacy_digest(credential: &str) -> String {
  hex::encode(Sha256::digest(credential.as_bytes()))
}

/// Check `credential` against a stored hash of either supported form.
pub fn verify_credential(stored_hash: &str, credential: &str) -> bool {
  match PasswordHash::new(stored_hash) {
    Ok(parsed) => Argon2::default()
      .verify_password(credential.as_bytes(), &parsed)
      .is_ok(),
    Err(_) => {
      stored_hash.len() == 64
        && stored_hash.eq_ignore_ascii_case(&legacy_digest(credential))
    }
  }
}
