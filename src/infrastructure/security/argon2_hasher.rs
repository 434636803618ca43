use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

/// Argon2id password hasher implementation
///
/// Uses the Argon2id algorithm with secure parameters:
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
/// - Algorithm: Argon2id (resistant to both side-channel and GPU attacks)
///
/// Hashing and verification are deliberately slow; both run on the tokio
/// blocking pool so they never stall an actix worker thread.
pub struct Argon2PasswordHasher {
  params: Params,
}

impl Argon2PasswordHasher {
  /// Creates a new Argon2PasswordHasher with the default work factor
  pub fn new() -> Result<Self, AuthError> {
    // Memory cost: 19 MiB = 19456 KiB
    let memory_cost = 19456;
    // Time cost: 2 iterations
    let time_cost = 2;
    // Parallelism: 1 thread
    let parallelism = 1;
    // Output length: 32 bytes
    let output_len = Some(32);

    let params = Params::new(memory_cost, time_cost, parallelism, output_len).map_err(|e| {
      AuthError::Hash(HashError::HashingFailed(format!(
        "Failed to create Argon2 params: {}",
        e
      )))
    })?;

    Ok(Self { params })
  }

  fn argon2(params: Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  /// Hashes a plain text password using Argon2id
  ///
  /// A fresh random salt is drawn from the OS CSPRNG per call, so the same
  /// password hashes to a different PHC string every time.
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
    let params = self.params.clone();
    let password = password.clone();

    let hash = tokio::task::spawn_blocking(move || {
      let salt = SaltString::generate(&mut rand::rngs::OsRng);
      Self::argon2(params)
        .hash_password(password.as_str().as_bytes(), &salt)
        .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| AuthError::Hash(HashError::HashingFailed(format!("Join error: {}", e))))?
    .map_err(|e| {
      AuthError::Hash(HashError::HashingFailed(format!(
        "Failed to hash password: {}",
        e
      )))
    })?;

    PasswordHash::from_hash(hash)
      .map_err(|_| AuthError::Hash(HashError::InvalidFormat))
  }

  /// Verifies a plain text password against a hashed password
  ///
  /// A mismatch is `Ok(false)`; only a malformed hash or an internal failure
  /// is an error.
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError> {
    let params = self.params.clone();
    let password = password.clone();
    let hashed_password = hashed_password.clone();

    tokio::task::spawn_blocking(move || {
      let parsed_hash = Argon2PasswordHash::new(hashed_password.as_str()).map_err(|e| {
        AuthError::Hash(HashError::VerificationFailed(format!(
          "Invalid hash format: {}",
          e
        )))
      })?;

      // verify_password uses constant-time comparison internally
      match Self::argon2(params).verify_password(password.as_str().as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Hash(HashError::VerificationFailed(format!(
          "Password verification failed: {}",
          e
        )))),
      }
    })
    .await
    .map_err(|e| AuthError::Hash(HashError::VerificationFailed(format!("Join error: {}", e))))?
  }
}
