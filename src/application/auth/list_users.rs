use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// A single user in the administrative listing (no credential fields)
#[derive(Debug, Clone)]
pub struct UserSummary {
  pub user_id: Uuid,
  pub username: String,
  pub email: String,
}

/// Use case for listing all registered users
pub struct ListUsersUseCase {
  auth_service: Arc<AuthService>,
}

impl ListUsersUseCase {
  /// Creates a new instance of ListUsersUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Returns every registered user, password hashes stripped
  pub async fn execute(&self) -> Result<Vec<UserSummary>, AuthError> {
    let users = self.auth_service.list_users().await?;

    Ok(
      users
        .into_iter()
        .map(|user| UserSummary {
          user_id: user.id,
          username: user.username,
          email: user.email,
        })
        .collect(),
    )
  }
}
