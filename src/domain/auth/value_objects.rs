use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;
use zeroize::Zeroize;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Username must not be empty")]
  UsernameEmpty,

  #[error("Username is too long (maximum {max} characters)")]
  UsernameTooLong { max: usize },

  #[error("Password is too short (minimum 8 characters)")]
  PasswordTooShort,

  #[error("Password is too long (maximum 128 characters)")]
  PasswordTooLong,

  #[error("Invalid password hash format")]
  InvalidPasswordHash,

  #[error("Invalid token format")]
  InvalidToken,
}

// ============================================================================
// Email Value Object
// ============================================================================

/// Validated, lowercase email address. Used as the login key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into();

    if !email.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    // Normalize to lowercase so the unique index sees one spelling
    Ok(Self(email.to_lowercase()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Username Value Object
// ============================================================================

/// Display name shown alongside the account. Non-empty, bounded length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
  const MAX_LENGTH: usize = 255;

  /// Creates a new Username after validation
  pub fn new(username: impl Into<String>) -> Result<Self, ValueObjectError> {
    let username = username.into();
    let trimmed = username.trim();

    if trimmed.is_empty() {
      return Err(ValueObjectError::UsernameEmpty);
    }

    if trimmed.len() > Self::MAX_LENGTH {
      return Err(ValueObjectError::UsernameTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Username {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

#[derive(Clone)]
pub struct Password(String);

impl Password {
  const MIN_LENGTH: usize = 8;
  const MAX_LENGTH: usize = 128;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.len() < Self::MIN_LENGTH {
      return Err(ValueObjectError::PasswordTooShort);
    }

    if password.len() > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong);
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// Implement Display without exposing the password
impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// Zero out the plaintext when the value is dropped
impl Drop for Password {
  fn drop(&mut self) {
    self.0.zeroize();
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2id PHC String)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Creates a new PasswordHash from an existing hash string
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    // Validate it's a proper PHC-format hash
    argon2::PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for PasswordHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// SessionToken Value Object (Random Secure Token)
// ============================================================================

/// The opaque bearer credential handed to the client on login. It is
/// returned exactly once and only its SHA-256 hash is persisted.
#[derive(Clone)]
pub struct SessionToken(String);

impl SessionToken {
  const TOKEN_LENGTH: usize = 32; // 32 bytes = 256 bits

  /// Generates a new random session token from the OS CSPRNG
  pub fn generate() -> Result<Self, ValueObjectError> {
    use rand::RngCore;

    let mut bytes = [0u8; Self::TOKEN_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut bytes);

    Ok(Self(hex::encode(bytes)))
  }

  /// Creates a SessionToken from an existing token string
  pub fn from_string(token: impl Into<String>) -> Result<Self, ValueObjectError> {
    let token = token.into();

    // Validate token is hex and correct length
    if token.len() != Self::TOKEN_LENGTH * 2 {
      return Err(ValueObjectError::InvalidToken);
    }

    if !token.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ValueObjectError::InvalidToken);
    }

    Ok(Self(token))
  }

  /// Creates a hash of this token for storage
  pub fn hash(&self) -> TokenHash {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(self.0.as_bytes());
    let result = hasher.finalize();

    TokenHash(hex::encode(result))
  }

  /// Returns the token as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// Implement Debug without exposing the token
impl fmt::Debug for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("SessionToken(***)")
  }
}

// Implement Display without exposing the token
impl fmt::Display for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// TokenHash Value Object (SHA-256 Hash of Token)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHash(String);

impl TokenHash {
  /// Creates a TokenHash from an existing hash string
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    // SHA-256 produces 64 hex characters
    if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ValueObjectError::InvalidToken);
    }

    Ok(Self(hash))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for TokenHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
