//! HTTP adapter
//!
//! Exposes the application use cases as a JSON API over actix-web. DTOs,
//! error mapping, handlers, middleware, and route wiring live here; no
//! domain logic does.

pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
