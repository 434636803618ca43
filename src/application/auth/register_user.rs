use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password, Username};

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  /// User's display name
  pub username: String,
  /// User's email address
  pub email: String,
  /// User's password (plain text, will be hashed)
  pub password: String,
}

/// Response after successful user registration
///
/// Deliberately carries no credential material: neither the password nor
/// its hash ever leaves the domain.
#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
  /// Unique identifier of the newly created user
  pub user_id: Uuid,
  /// User's display name
  pub username: String,
  /// User's email address
  pub email: String,
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  /// Creates a new instance of RegisterUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user registration use case
  ///
  /// # Errors
  /// Returns `AuthError` if validation fails or the email is already taken.
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, AuthError> {
    // Parse and validate inputs
    let username = Username::new(command.username)?;
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let user = self.auth_service.register(username, email, password).await?;

    Ok(RegisterUserResponse {
      user_id: user.id,
      username: user.username,
      email: user.email,
    })
  }
}
