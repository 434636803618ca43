//! HTTP middleware

pub mod auth;

pub use auth::{AuthMiddleware, AuthUser, AuthenticatedUser};
