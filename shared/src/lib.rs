//! Shared types and models for the Raincast platform
//!
//! This crate contains the pure scoring and conversion core shared between
//! the backend server and the browser (via WASM). Nothing in here performs I/O.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
