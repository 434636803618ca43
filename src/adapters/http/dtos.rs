use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  /// User's display name
  #[validate(length(
    min = 1,
    max = 255,
    message = "Username must be between 1 and 255 characters"
  ))]
  pub username: String,

  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub password: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// A user as exposed over the API
///
/// Never carries password material in any form.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
  /// Unique identifier of the user
  pub id: Uuid,

  /// User's display name
  pub username: String,

  /// User's email address
  pub email: String,
}

/// Response after successful user login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  /// Session token for authentication
  pub token: String,

  /// Session expiration timestamp (RFC 3339)
  pub expires_at: DateTime<Utc>,
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  /// Success message
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use validator::Validate;

  #[test]
  fn test_register_request_validation_valid() {
    let request = RegisterRequest {
      username: "alice".to_string(),
      email: "test@example.com".to_string(),
      password: "SecureP@ss123".to_string(),
    };

    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_register_request_validation_invalid_email() {
    let request = RegisterRequest {
      username: "alice".to_string(),
      email: "invalid-email".to_string(),
      password: "SecureP@ss123".to_string(),
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_register_request_validation_short_password() {
    let request = RegisterRequest {
      username: "alice".to_string(),
      email: "test@example.com".to_string(),
      password: "short".to_string(),
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_register_request_validation_empty_username() {
    let request = RegisterRequest {
      username: "".to_string(),
      email: "test@example.com".to_string(),
      password: "SecureP@ss123".to_string(),
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_login_request_validation_valid() {
    let request = LoginRequest {
      email: "test@example.com".to_string(),
      password: "password123".to_string(),
    };

    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_user_response_has_no_password_field() {
    let response = UserResponse {
      id: Uuid::new_v4(),
      username: "alice".to_string(),
      email: "a@x.com".to_string(),
    };

    let json = serde_json::to_value(&response).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    assert_eq!(keys.len(), 3);
    assert!(!keys.iter().any(|k| k.contains("password")));
  }

  #[test]
  fn test_login_response_expires_at_is_rfc3339() {
    let response = LoginResponse {
      token: "abc".to_string(),
      expires_at: "2026-01-01T00:00:00Z".parse().unwrap(),
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["expires_at"], "2026-01-01T00:00:00Z");
  }
}
