//! Adapters: implementations of the port interfaces.
//!
//! - `http` - Axum API surface
//! - `memory` - in-memory port implementations for development and tests

pub mod http;
pub mod memory;
