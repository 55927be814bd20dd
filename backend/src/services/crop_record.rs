//! Planting records entered by the farmer

use std::sync::Arc;

use shared::{CropRecord, CropRecordInput};

use crate::error::{AppError, AppResult};
use crate::store::{self, DocumentStore, FindOptions};

/// Upper bound on records returned by the listing
pub const CROP_LIST_LIMIT: usize = 1000;

#[derive(Clone)]
pub struct CropRecordService {
    store: Arc<dyn DocumentStore>,
}

impl CropRecordService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Store a new planting record
    pub async fn create(&self, input: CropRecordInput) -> AppResult<CropRecord> {
        input
            .check_growing_window()
            .map_err(|message| AppError::Validation {
                field: "expected_harvest".to_string(),
                message: message.to_string(),
            })?;

        let record = CropRecord::from(input);
        store::insert(self.store.as_ref(), &record).await?;
        tracing::info!(record_id = %record.id, crop = %record.crop_name, "Recorded planting");

        Ok(record)
    }

    /// All planting records in the order they were entered
    pub async fn list(&self) -> AppResult<Vec<CropRecord>> {
        store::find(self.store.as_ref(), FindOptions::limit(CROP_LIST_LIMIT)).await
    }
}
