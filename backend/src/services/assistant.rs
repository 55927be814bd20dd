//! Free-form farming assistant

use std::sync::Arc;

use shared::AdvisoryAnswer;

use super::advisory::{Advisor, AdvisoryPrompt, NARRATIVE_TEMPERATURE};
use crate::error::AppResult;
use crate::store::{self, DocumentStore, FindOptions};

const SYSTEM_ROLE: &str = "You are an expert agricultural advisor with deep knowledge of farming, crop management, weather patterns, soil health, pest control, and modern farming techniques. Provide helpful, practical advice for farmers.";

/// Number of answers returned by the recent-queries listing
pub const RECENT_QUERY_LIMIT: usize = 10;

#[derive(Clone)]
pub struct AssistantService {
    store: Arc<dyn DocumentStore>,
    advisor: Advisor,
}

fn assistant_prompt(question: &str) -> AdvisoryPrompt {
    AdvisoryPrompt {
        system: SYSTEM_ROLE,
        user: question.to_string(),
        temperature: NARRATIVE_TEMPERATURE,
    }
}

impl AssistantService {
    pub fn new(store: Arc<dyn DocumentStore>, advisor: Advisor) -> Self {
        Self { store, advisor }
    }

    /// Answer a question and keep the exchange
    #[tracing::instrument(skip(self, question))]
    pub async fn ask(&self, question: &str) -> AppResult<AdvisoryAnswer> {
        let answer = self.advisor.ask(assistant_prompt(question)).await?;

        let record = AdvisoryAnswer::new(question, answer);
        store::insert(self.store.as_ref(), &record).await?;
        tracing::info!(query_id = %record.id, "Stored assistant answer");

        Ok(record)
    }

    /// Most recent exchanges, newest first
    pub async fn recent(&self) -> AppResult<Vec<AdvisoryAnswer>> {
        store::find(
            self.store.as_ref(),
            FindOptions::latest("timestamp", RECENT_QUERY_LIMIT),
        )
        .await
    }
}
