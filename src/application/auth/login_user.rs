use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  /// User's email address
  pub email: String,
  /// User's password (plain text)
  pub password: String,
}

/// Response after successful user login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  /// Session token for authentication (the only time it leaves the server)
  pub token: String,
  /// Session expiration timestamp
  pub expires_at: DateTime<Utc>,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  /// Creates a new instance of LoginUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user login use case
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` for an unknown email as well as
  /// a wrong password; the two are not distinguishable by the caller.
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    // A malformed email cannot belong to any registered user, so it is
    // surfaced the same way as a failed credential check
    let email = Email::new(command.email).map_err(|_| AuthError::InvalidCredentials)?;
    let password = Password::new(command.password).map_err(|_| AuthError::InvalidCredentials)?;

    let (session, token) = self.auth_service.login(email, password).await?;

    Ok(LoginUserResponse {
      token: token.into_inner(),
      expires_at: session.expires_at,
    })
  }
}
