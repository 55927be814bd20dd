//! Shared types and models for the Agriculture Assistant
//!
//! This crate contains the pure domain logic shared between the backend and the
//! browser frontend (via WASM): record types, request inputs, the model-output
//! extractor and the deterministic fallbacks.

pub mod extract;
pub mod models;
pub mod types;
pub mod validation;

pub use extract::*;
pub use models::*;
pub use types::*;
pub use validation::*;
