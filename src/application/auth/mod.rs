//! Authentication use cases
//!
//! This module contains all authentication-related use cases that orchestrate
//! domain services to implement application-specific workflows.

mod get_current_user;
mod get_user_by_email;
mod list_users;
mod login_user;
mod logout_user;
mod register_user;

pub use get_current_user::{GetCurrentUserResponse, GetCurrentUserUseCase};
pub use get_user_by_email::GetUserByEmailUseCase;
pub use list_users::{ListUsersUseCase, UserSummary};
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use logout_user::LogoutUserUseCase;
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};
