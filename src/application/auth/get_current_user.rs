use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Response containing current user information
#[derive(Debug, Clone)]
pub struct GetCurrentUserResponse {
  /// Unique identifier of the user
  pub user_id: Uuid,
  /// User's display name
  pub username: String,
  /// User's email address
  pub email: String,
}

/// Use case for resolving a session token to its authenticated user
///
/// This is the transport-facing form of Authorize: the HTTP middleware and
/// the /me endpoint both go through it.
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  /// Creates a new instance of GetCurrentUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the get current user use case
  ///
  /// # Errors
  /// Returns `AuthError::InvalidToken` for a malformed, unknown, or expired
  /// token; the three cases are indistinguishable to the caller.
  pub async fn execute(&self, session_token: String) -> Result<GetCurrentUserResponse, AuthError> {
    let token =
      SessionToken::from_string(session_token).map_err(|_| AuthError::InvalidToken)?;

    let user = self.auth_service.authorize(token).await?;

    Ok(GetCurrentUserResponse {
      user_id: user.id,
      username: user.username,
      email: user.email,
    })
  }
}
