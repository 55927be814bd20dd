//! Domain models for the Agriculture Assistant

mod advisory;
mod crop;
mod market;
mod soil;
mod weather;
mod yield_prediction;

pub use advisory::*;
pub use crop::*;
pub use market::*;
pub use soil::*;
pub use weather::*;
pub use yield_prediction::*;
