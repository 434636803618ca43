use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::auth::errors::{AuthError, RepositoryError};

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Authentication/account error (status depends on kind)
  Auth(AuthErrorKind),

  /// Storage backend unreachable (503 Service Unavailable, retryable)
  StorageUnavailable,

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Authentication error kinds
#[derive(Debug, Serialize)]
pub enum AuthErrorKind {
  /// Invalid credentials (401) — also covers unknown emails on login
  InvalidCredentials,

  /// Absent, expired, or malformed session token (401)
  InvalidToken,

  /// Email already exists (409)
  EmailAlreadyExists,

  /// User not found (404)
  UserNotFound,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::StorageUnavailable => write!(f, "Storage unavailable"),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::InvalidToken => StatusCode::UNAUTHORIZED,
        AuthErrorKind::EmailAlreadyExists => StatusCode::CONFLICT,
        AuthErrorKind::UserNotFound => StatusCode::NOT_FOUND,
      },
      ApiError::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => (
          "invalid_credentials",
          "Invalid email or password".to_string(),
        ),
        AuthErrorKind::InvalidToken => (
          "invalid_token",
          "Invalid or expired session token".to_string(),
        ),
        AuthErrorKind::EmailAlreadyExists => (
          "email_already_exists",
          "An account with this email already exists".to_string(),
        ),
        AuthErrorKind::UserNotFound => ("user_not_found", "User not found".to_string()),
      },
      ApiError::StorageUnavailable => (
        "storage_unavailable",
        "Storage backend is unavailable, please retry".to_string(),
      ),
      ApiError::Internal(msg) => {
        // Don't expose internal error details to clients
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::EmailAlreadyExists => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
      AuthError::UserNotFound => ApiError::Auth(AuthErrorKind::UserNotFound),
      AuthError::InvalidToken => ApiError::Auth(AuthErrorKind::InvalidToken),
      AuthError::Validation(err) => ApiError::Validation(err.to_string()),
      AuthError::Repository(err) => match err {
        RepositoryError::ConnectionFailed(_) => ApiError::StorageUnavailable,
        RepositoryError::NotFound => ApiError::Auth(AuthErrorKind::UserNotFound),
        RepositoryError::DuplicateKey(_) => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
        _ => ApiError::Internal(err.to_string()),
      },
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::InvalidCredentials).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::InvalidToken).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::EmailAlreadyExists).status_code(),
      StatusCode::CONFLICT
    );
    assert_eq!(
      ApiError::StorageUnavailable.status_code(),
      StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_auth_error_conversion() {
    let api_error: ApiError = AuthError::InvalidCredentials.into();
    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);

    let api_error: ApiError = AuthError::EmailAlreadyExists.into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);

    let api_error: ApiError = AuthError::InvalidToken.into();
    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);
  }

  #[test]
  fn test_connection_failure_maps_to_service_unavailable() {
    let api_error: ApiError =
      AuthError::Repository(RepositoryError::ConnectionFailed("pool timed out".into())).into();
    assert_eq!(api_error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
  }

  #[test]
  fn test_duplicate_key_maps_to_conflict() {
    let api_error: ApiError =
      AuthError::Repository(RepositoryError::DuplicateKey("users_email_key".into())).into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);
  }
}
