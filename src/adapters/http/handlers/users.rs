use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::{dtos::UserResponse, errors::ApiError, middleware::AuthUser};
use crate::application::auth::{GetUserByEmailUseCase, ListUsersUseCase};

/// Handler for listing all registered users
///
/// GET /api/v1/users
/// Headers: Authorization: Bearer <token>
/// Response: Vec<UserResponse> (JSON) with status 200
pub async fn list_users_handler(
  use_case: web::Data<Arc<ListUsersUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  // AuthMiddleware guarantees a resolved caller on this scope
  let caller = http_req.authenticated_user();
  tracing::debug!(caller = %caller.id, "Listing all users");

  let users = use_case.execute().await?;

  let api_response: Vec<UserResponse> = users
    .into_iter()
    .map(|user| UserResponse {
      id: user.user_id,
      username: user.username,
      email: user.email,
    })
    .collect();

  Ok(HttpResponse::Ok().json(api_response))
}

/// Handler for looking up a single user by email
///
/// GET /api/v1/users/{email}
/// Headers: Authorization: Bearer <token>
/// Response: UserResponse (JSON) with status 200, 404 if no such user
pub async fn get_user_by_email_handler(
  path: web::Path<String>,
  use_case: web::Data<Arc<GetUserByEmailUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let caller = http_req.authenticated_user();
  let email = path.into_inner();
  tracing::debug!(caller = %caller.id, "Looking up user by email");

  let user = use_case.execute(email).await?;

  let api_response = UserResponse {
    id: user.user_id,
    username: user.username,
    email: user.email,
  };

  Ok(HttpResponse::Ok().json(api_response))
}
