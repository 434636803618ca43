//! Gatehouse — a user account and session service.
//!
//! Exposes registration, credential login, bearer-token sessions, and
//! administrative user queries over a JSON API. Layered hexagonally:
//!
//! - `domain` — entities, value objects, ports, and the auth service
//! - `application` — use cases orchestrating the domain
//! - `infrastructure` — Postgres repositories, Argon2 hashing, config
//! - `adapters` — the actix-web HTTP surface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
