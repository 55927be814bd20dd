//! Document store facade
//!
//! Records are kept as JSON documents grouped into named collections. The store
//! only inserts and lists: there is no update, delete or transaction support.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::AppResult;

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Sort on a single top-level document field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortBy {
    pub field: &'static str,
    pub order: SortOrder,
}

/// Query options for [`DocumentStore::find`]. Without a sort, documents come
/// back in insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub sort: Option<SortBy>,
    pub limit: Option<usize>,
}

impl FindOptions {
    pub fn limit(limit: usize) -> Self {
        Self {
            sort: None,
            limit: Some(limit),
        }
    }

    /// Newest first on `field`, capped at `limit`
    pub fn latest(field: &'static str, limit: usize) -> Self {
        Self {
            sort: Some(SortBy {
                field,
                order: SortOrder::Descending,
            }),
            limit: Some(limit),
        }
    }
}

/// Insert-and-list JSON document storage
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, collection: &str, document: Value) -> AppResult<()>;

    async fn find(&self, collection: &str, options: FindOptions) -> AppResult<Vec<Value>>;

    /// Cheap connectivity check for health reporting
    async fn ping(&self) -> AppResult<()>;
}

/// A record type bound to its collection
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;
}

impl Document for shared::WeatherSnapshot {
    const COLLECTION: &'static str = "weather_data";
}

impl Document for shared::CropSuggestion {
    const COLLECTION: &'static str = "crop_suggestions";
}

impl Document for shared::AdvisoryAnswer {
    const COLLECTION: &'static str = "ai_queries";
}

impl Document for shared::CropRecord {
    const COLLECTION: &'static str = "crop_records";
}

impl Document for shared::YieldPrediction {
    const COLLECTION: &'static str = "yield_predictions";
}

impl Document for shared::SoilAnalysis {
    const COLLECTION: &'static str = "soil_analyses";
}

impl Document for shared::MarketPrice {
    const COLLECTION: &'static str = "market_prices";
}

/// Serialize and insert a typed record
pub async fn insert<T: Document>(store: &dyn DocumentStore, record: &T) -> AppResult<()> {
    let document = serde_json::to_value(record)?;
    store.insert_one(T::COLLECTION, document).await
}

/// List typed records from their collection
pub async fn find<T: Document>(store: &dyn DocumentStore, options: FindOptions) -> AppResult<Vec<T>> {
    store
        .find(T::COLLECTION, options)
        .await?
        .into_iter()
        .map(|document| serde_json::from_value(document).map_err(Into::into))
        .collect()
}
