use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::TokenIssuer;
use crate::domain::auth::value_objects::SessionToken;

/// Default session lifetime: one hour from issuance
const DEFAULT_SESSION_TTL_SECONDS: i64 = 3600;

/// Token issuer producing opaque random bearer tokens
///
/// Tokens are 32 bytes from the OS CSPRNG, hex-encoded; validity relies on
/// the session repository lookup rather than an embedded signature, which
/// makes revocation exact. The token carries no user data and no secrets.
pub struct SystemTokenIssuer {
  ttl: Duration,
}

impl SystemTokenIssuer {
  /// Creates an issuer with the default one-hour token lifetime
  pub fn new() -> Self {
    Self {
      ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECONDS),
    }
  }

  /// Creates an issuer with an explicit token lifetime in seconds
  pub fn with_ttl_seconds(ttl_seconds: i64) -> Self {
    Self {
      ttl: Duration::seconds(ttl_seconds),
    }
  }
}

impl Default for SystemTokenIssuer {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl TokenIssuer for SystemTokenIssuer {
  async fn issue(&self) -> Result<(SessionToken, DateTime<Utc>), AuthError> {
    let token = SessionToken::generate().map_err(AuthError::Validation)?;
    let expires_at = Utc::now() + self.ttl;

    Ok((token, expires_at))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_issue_creates_unique_tokens() {
    let issuer = SystemTokenIssuer::new();

    let (token1, _) = issuer.issue().await.unwrap();
    let (token2, _) = issuer.issue().await.unwrap();

    assert_ne!(token1.as_str(), token2.as_str());
  }

  #[tokio::test]
  async fn test_default_expiry_is_one_hour_out() {
    let issuer = SystemTokenIssuer::new();

    let before = Utc::now();
    let (_, expires_at) = issuer.issue().await.unwrap();
    let after = Utc::now();

    assert!(expires_at >= before + Duration::hours(1));
    assert!(expires_at <= after + Duration::hours(1));
  }

  #[tokio::test]
  async fn test_configured_ttl_is_honored() {
    let issuer = SystemTokenIssuer::with_ttl_seconds(60);

    let before = Utc::now();
    let (_, expires_at) = issuer.issue().await.unwrap();

    let delta = (expires_at - before).num_seconds();
    assert!((59..=61).contains(&delta));
  }

  #[tokio::test]
  async fn test_token_is_hex_of_expected_length() {
    let issuer = SystemTokenIssuer::new();
    let (token, _) = issuer.issue().await.unwrap();

    assert_eq!(token.as_str().len(), 64);
    assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
  }
}
