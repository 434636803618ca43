use actix_web::{
  Error, HttpMessage,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  error::ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};
use uuid::Uuid;

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  application::auth::GetCurrentUserUseCase,
};

/// The user a valid session token resolved to, as seen by handlers behind
/// the middleware. Carries no credential material.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub id: Uuid,
  pub username: String,
  pub email: String,
}

/// Authentication middleware that validates session tokens and attaches the
/// resolved user to the request
///
/// This middleware:
/// 1. Extracts the session token from the Authorization header
/// 2. Validates the token using GetCurrentUserUseCase
/// 3. Attaches an AuthenticatedUser to request extensions for downstream handlers
/// 4. Returns 401 Unauthorized if the token is absent, invalid, or expired
pub struct AuthMiddleware {
  get_user_use_case: Arc<GetCurrentUserUseCase>,
}

impl AuthMiddleware {
  /// Creates a new authentication middleware
  pub fn new(get_user_use_case: Arc<GetCurrentUserUseCase>) -> Self {
    Self { get_user_use_case }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      get_user_use_case: self.get_user_use_case.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  get_user_use_case: Arc<GetCurrentUserUseCase>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let get_user_use_case = self.get_user_use_case.clone();

    Box::pin(async move {
      // Extract session token from Authorization header
      let session_token = match extract_session_token(&req) {
        Ok(token) => token,
        Err(e) => {
          let (request, _) = req.into_parts();
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      // Validate token and resolve the user. The error's own status mapping
      // is preserved: a bad token is 401, but a storage outage stays 503
      // rather than telling the client its token is invalid.
      let user_response = match get_user_use_case.execute(session_token).await {
        Ok(response) => response,
        Err(e) => {
          let (request, _) = req.into_parts();
          let api_error: ApiError = e.into();
          let response = api_error.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      let user = AuthenticatedUser {
        id: user_response.user_id,
        username: user_response.username,
        email: user_response.email,
      };

      // Attach user to request extensions
      req.extensions_mut().insert(user);

      // Call the next service
      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract session token from Authorization header
fn extract_session_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}

/// Extension trait to easily extract the authenticated user from a request
pub trait AuthUser {
  /// Get the authenticated user from request extensions
  ///
  /// # Panics
  ///
  /// Panics if the user is not present in extensions.
  /// This should only be called in handlers that are protected by AuthMiddleware.
  fn authenticated_user(&self) -> AuthenticatedUser;
}

impl AuthUser for actix_web::HttpRequest {
  fn authenticated_user(&self) -> AuthenticatedUser {
    self
      .extensions()
      .get::<AuthenticatedUser>()
      .cloned()
      .expect("User not found in request extensions. Did you forget to add AuthMiddleware?")
  }
}
