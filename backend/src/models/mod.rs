//! Record and request models
//!
//! Re-exports the domain models from the shared crate

pub use shared::models::*;
