//! AI assistant question/answer models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::timestamp;
use crate::validation::validate_not_blank;

/// Where the figures in a generated record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorySource {
    /// Parsed from the language model's reply
    Model,
    /// Computed by the deterministic fallback
    Fallback,
}

/// A question put to the assistant and the answer it gave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryAnswer {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl AdvisoryAnswer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: question.into(),
            answer: answer.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Request body for the assistant
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssistantRequest {
    #[validate(custom = "validate_not_blank")]
    pub question: String,
}
