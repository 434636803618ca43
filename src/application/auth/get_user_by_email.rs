use std::sync::Arc;

use super::list_users::UserSummary;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::Email;

/// Use case for looking up a single user by email
pub struct GetUserByEmailUseCase {
  auth_service: Arc<AuthService>,
}

impl GetUserByEmailUseCase {
  /// Creates a new instance of GetUserByEmailUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the lookup
  ///
  /// # Errors
  /// Returns `AuthError::UserNotFound` if no user holds this email. Unlike
  /// login, this administrative query may say so openly.
  pub async fn execute(&self, email: String) -> Result<UserSummary, AuthError> {
    let email = Email::new(email)?;

    let user = self.auth_service.find_user_by_email(email).await?;

    Ok(UserSummary {
      user_id: user.id,
      username: user.username,
      email: user.email,
    })
  }
}
