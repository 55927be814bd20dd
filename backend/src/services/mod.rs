//! Business logic services for the agriculture assistant

pub mod advisory;
pub mod assistant;
pub mod crop_record;
pub mod crop_suggestion;
pub mod market;
pub mod soil;
pub mod weather;
pub mod yield_prediction;

pub use advisory::Advisor;
pub use assistant::AssistantService;
pub use crop_record::CropRecordService;
pub use crop_suggestion::CropSuggestionService;
pub use market::MarketService;
pub use soil::SoilAnalysisService;
pub use weather::WeatherService;
pub use yield_prediction::YieldPredictionService;
