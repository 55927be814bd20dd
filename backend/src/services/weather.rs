//! Weather service for fetching and archiving current conditions

use std::sync::Arc;

use shared::WeatherSnapshot;

use crate::error::AppResult;
use crate::external::WeatherProvider;
use crate::store::{self, DocumentStore};

/// Weather service for managing weather data
#[derive(Clone)]
pub struct WeatherService {
    store: Arc<dyn DocumentStore>,
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(store: Arc<dyn DocumentStore>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self { store, provider }
    }

    /// Fetch current conditions for a location and store the snapshot
    #[tracing::instrument(skip(self))]
    pub async fn fetch_and_store(&self, location: &str) -> AppResult<WeatherSnapshot> {
        let location = location.trim();
        let conditions = self.provider.current_conditions(location).await?;

        let snapshot = WeatherSnapshot::new(
            location,
            conditions.temperature,
            conditions.humidity,
            conditions.description,
        );

        store::insert(self.store.as_ref(), &snapshot).await?;
        tracing::info!(snapshot_id = %snapshot.id, "Stored weather snapshot");

        Ok(snapshot)
    }
}
