use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{LoginRequest, LoginResponse, RegisterRequest, SuccessResponse, UserResponse},
  errors::ApiError,
};
use crate::application::auth::{
  GetCurrentUserResponse as UseCaseCurrentUserResponse, GetCurrentUserUseCase, LoginUserCommand,
  LoginUserResponse as UseCaseLoginResponse, LoginUserUseCase, LogoutUserUseCase,
  RegisterUserCommand, RegisterUserResponse as UseCaseRegisterResponse, RegisterUserUseCase,
};

/// Extract session token from Authorization header
fn extract_session_token(req: &HttpRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string())
    .ok_or_else(|| ApiError::Validation("Missing or invalid Authorization header".to_string()))
}

/// Handler for user registration
///
/// POST /api/v1/auth/register
/// Body: RegisterRequest (JSON)
/// Response: UserResponse (JSON) with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = RegisterUserCommand {
    username: request.username.clone(),
    email: request.email.clone(),
    password: request.password.clone(),
  };

  let response: UseCaseRegisterResponse = use_case.execute(command).await?;

  let api_response = UserResponse {
    id: response.user_id,
    username: response.username,
    email: response.email,
  };

  Ok(HttpResponse::Created().json(api_response))
}

/// Handler for user login
///
/// POST /api/v1/auth/login
/// Body: LoginRequest (JSON)
/// Response: LoginResponse (JSON) with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = LoginUserCommand {
    email: request.email.clone(),
    password: request.password.clone(),
  };

  let response: UseCaseLoginResponse = use_case.execute(command).await?;

  let api_response = LoginResponse {
    token: response.token,
    expires_at: response.expires_at,
  };

  Ok(HttpResponse::Ok().json(api_response))
}

/// Handler for user logout
///
/// POST /api/v1/auth/logout
/// Headers: Authorization: Bearer <token>
/// Response: SuccessResponse (JSON) with status 200
///
/// Logout is idempotent: any presented token logs out successfully, whether
/// it is live, already revoked, expired, or was never issued at all.
pub async fn logout_handler(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = extract_session_token(&http_req)?;

  use_case.execute(session_token).await?;

  let response = SuccessResponse {
    message: "Successfully logged out".to_string(),
  };

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for getting current user information
///
/// GET /api/v1/auth/me
/// Headers: Authorization: Bearer <token>
/// Response: UserResponse (JSON) with status 200
pub async fn get_current_user_handler(
  use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = extract_session_token(&http_req)?;

  let response: UseCaseCurrentUserResponse = use_case.execute(session_token).await?;

  let api_response = UserResponse {
    id: response.user_id,
    username: response.username,
    email: response.email,
  };

  Ok(HttpResponse::Ok().json(api_response))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extract_session_token_valid() {
    use actix_web::test::TestRequest;

    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_http_request();

    let token = extract_session_token(&req).unwrap();
    assert_eq!(token, "test_token_123");
  }

  #[test]
  fn test_extract_session_token_missing() {
    use actix_web::test::TestRequest;

    let req = TestRequest::default().to_http_request();

    let result = extract_session_token(&req);
    assert!(result.is_err());
  }

  #[test]
  fn test_extract_session_token_invalid_format() {
    use actix_web::test::TestRequest;

    let req = TestRequest::default()
      .insert_header(("Authorization", "InvalidFormat token"))
      .to_http_request();

    let result = extract_session_token(&req);
    assert!(result.is_err());
  }
}
