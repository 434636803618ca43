use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Use case for logging out a user
pub struct LogoutUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutUserUseCase {
  /// Creates a new instance of LogoutUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user logout use case
  ///
  /// Revocation is idempotent and unconditional: a token that is malformed,
  /// already revoked, or was never issued still logs out successfully. Only
  /// an infrastructure fault is an error.
  pub async fn execute(&self, session_token: String) -> Result<(), AuthError> {
    let token = match SessionToken::from_string(session_token) {
      Ok(token) => token,
      // A token we could never have issued holds no session to revoke
      Err(_) => return Ok(()),
    };

    self.auth_service.logout(token).await?;

    Ok(())
  }
}
