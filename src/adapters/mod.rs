//! Adapters layer
//!
//! Transport-facing adapters that translate between the outside world and
//! the application layer.

pub mod http;
