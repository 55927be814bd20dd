//! External API integrations

pub mod llm;
pub mod weather;

pub use llm::{ChatMessage, ChatRole, CompletionRequest, LanguageModel, OpenAiClient};
pub use weather::{CurrentConditions, WeatherClient, WeatherProvider};
