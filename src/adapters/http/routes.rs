use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{
  GetCurrentUserUseCase, GetUserByEmailUseCase, ListUsersUseCase, LoginUserUseCase,
  LogoutUserUseCase, RegisterUserUseCase,
};

use super::handlers::auth::{
  get_current_user_handler, login_handler, logout_handler, register_handler,
};
use super::handlers::users::{get_user_by_email_handler, list_users_handler};

/// Configure authentication routes
///
/// Mounts all authentication-related endpoints under the provided scope.
/// All routes are prefixed with the scope path (e.g., /api/v1/auth).
///
/// # Routes
///
/// - POST /register - Register a new user account
/// - POST /login - Authenticate and create a session
/// - POST /logout - Revoke the presented session token
/// - GET /me - Get current user information
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  register_use_case: Arc<RegisterUserUseCase>,
  login_use_case: Arc<LoginUserUseCase>,
  logout_use_case: Arc<LogoutUserUseCase>,
  get_user_use_case: Arc<GetCurrentUserUseCase>,
) {
  // Store use cases in app data so handlers can access them
  cfg
    .app_data(web::Data::new(register_use_case))
    .app_data(web::Data::new(login_use_case))
    .app_data(web::Data::new(logout_use_case))
    .app_data(web::Data::new(get_user_use_case))
    // Configure routes
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler))
    .route("/logout", web::post().to(logout_handler))
    .route("/me", web::get().to(get_current_user_handler));
}

/// Configure user administration routes
///
/// Mounts the user query endpoints under the provided scope (e.g.,
/// /api/v1/users). The scope is expected to be wrapped in AuthMiddleware;
/// these handlers assume a valid session.
///
/// # Routes
///
/// - GET / - List all registered users
/// - GET /{email} - Look up a single user by email
pub fn configure_user_routes(
  cfg: &mut web::ServiceConfig,
  list_users_use_case: Arc<ListUsersUseCase>,
  get_user_by_email_use_case: Arc<GetUserByEmailUseCase>,
) {
  cfg
    .app_data(web::Data::new(list_users_use_case))
    .app_data(web::Data::new(get_user_by_email_use_case))
    .route("", web::get().to(list_users_handler))
    .route("/{email}", web::get().to(get_user_by_email_handler));
}
