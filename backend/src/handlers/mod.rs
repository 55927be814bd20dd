//! HTTP request handlers

pub mod assistant;
pub mod crops;
pub mod health;
pub mod market;
pub mod soil;
pub mod weather;
pub mod yield_prediction;

pub use assistant::{ask_assistant, recent_queries};
pub use crops::{create_crop_record, list_crop_records, suggest_crops};
pub use health::health_check;
pub use market::market_prices;
pub use soil::{analyze_soil, soil_history};
pub use weather::get_weather;
pub use yield_prediction::{predict_yield, yield_history};
