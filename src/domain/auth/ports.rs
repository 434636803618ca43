use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::entities::{Session, User};
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash, SessionToken};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user in the repository
  ///
  /// The duplicate-email check must be atomic with respect to concurrent
  /// creates for the same email (a store-level unique index, not
  /// check-then-act); a conflict surfaces as `RepositoryError::DuplicateKey`.
  async fn create(&self, user: User) -> Result<User, AuthError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  /// Finds a user by their email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;

  /// Returns all users (administrative listing, unordered)
  async fn find_all(&self) -> Result<Vec<User>, AuthError>;
}

/// Repository trait for session persistence operations
#[async_trait]
pub trait SessionRepository: Send + Sync {
  /// Persists a new session
  async fn save(&self, session: Session) -> Result<Session, AuthError>;

  /// Finds a session by its token hash
  ///
  /// Callers are responsible for comparing `expires_at` against the current
  /// time; the repository does not purge expired rows on read.
  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError>;

  /// Deletes the session holding this token hash
  ///
  /// Idempotent: deleting an absent token is not an error.
  async fn delete_by_token_hash(&self, token_hash: &str) -> Result<(), AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password with an internally generated salt
  ///
  /// Repeated calls with the same input produce different stored outputs,
  /// all of which verify against the original input.
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a hashed password
  ///
  /// A mismatch is a normal `Ok(false)` result, never an error.
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}

/// Service trait for minting session tokens
#[async_trait]
pub trait TokenIssuer: Send + Sync {
  /// Produces a cryptographically unguessable token together with its
  /// absolute expiry (issuance time plus the configured lifetime)
  async fn issue(&self) -> Result<(SessionToken, DateTime<Utc>), AuthError>;
}
