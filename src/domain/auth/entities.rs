use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing an account in the system
///
/// Created on registration and immutable thereafter. The `password_hash`
/// field carries the Argon2id PHC string, never the raw password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// Display name
  pub username: String,
  /// User's email address (unique, used as the login key)
  pub email: String,
  /// Hashed password using Argon2
  pub password_hash: String,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
}

impl User {
  /// Creates a new user with the given details
  pub fn new(username: String, email: String, password_hash: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      username,
      email,
      password_hash,
      created_at: Utc::now(),
    }
  }

  /// Creates a user from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      username,
      email,
      password_hash,
      created_at,
    }
  }
}

/// Session entity binding a bearer token to a user and an expiry
///
/// `token_hash` stores the SHA-256 of the token the client holds, so a
/// database leak does not leak usable bearer credentials. A user may hold
/// any number of concurrent sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  /// Unique identifier for the session
  pub id: Uuid,
  /// Reference to the user who owns this session
  pub user_id: Uuid,
  /// SHA-256 hash of the session token
  pub token_hash: String,
  /// Timestamp when the session expires
  pub expires_at: DateTime<Utc>,
  /// Timestamp when the session was created
  pub created_at: DateTime<Utc>,
}

impl Session {
  /// Creates a new session for a user with an absolute expiration time
  pub fn new(user_id: Uuid, token_hash: String, expires_at: DateTime<Utc>) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id,
      token_hash,
      expires_at,
      created_at: Utc::now(),
    }
  }

  /// Creates a session with a duration instead of absolute expiration time
  pub fn with_duration(user_id: Uuid, token_hash: String, duration: Duration) -> Self {
    let expires_at = Utc::now() + duration;
    Self::new(user_id, token_hash, expires_at)
  }

  /// Creates a session from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    user_id: Uuid,
    token_hash: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      user_id,
      token_hash,
      expires_at,
      created_at,
    }
  }

  /// Checks if the session has expired
  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  #[test]
  fn test_user_creation() {
    let user = User::new(
      "alice".to_string(),
      "alice@example.com".to_string(),
      "hashed_password".to_string(),
    );

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.password_hash, "hashed_password");
  }

  #[test]
  fn test_session_creation() {
    let user_id = Uuid::new_v4();
    let session = Session::with_duration(user_id, "token_hash".to_string(), Duration::hours(1));

    assert_eq!(session.user_id, user_id);
    assert!(!session.is_expired());
  }

  #[test]
  fn test_session_expiry_is_creation_plus_duration() {
    let before = Utc::now();
    let session =
      Session::with_duration(Uuid::new_v4(), "token_hash".to_string(), Duration::hours(1));
    let after = Utc::now();

    assert!(session.expires_at >= before + Duration::hours(1));
    assert!(session.expires_at <= after + Duration::hours(1));
    assert!(session.expires_at > session.created_at);
  }

  #[test]
  fn test_session_expiration() {
    let session = Session::new(
      Uuid::new_v4(),
      "token_hash".to_string(),
      Utc::now() - Duration::seconds(10), // Already expired
    );

    assert!(session.is_expired());
  }
}
