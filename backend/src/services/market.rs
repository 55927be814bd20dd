//! Simulated commodity market

use std::sync::Arc;

use shared::{simulate_market, MarketPrice};

use crate::error::AppResult;
use crate::store::{self, DocumentStore};

#[derive(Clone)]
pub struct MarketService {
    store: Arc<dyn DocumentStore>,
}

impl MarketService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Quote every tracked commodity and archive the quotes
    pub async fn current_prices(&self) -> AppResult<Vec<MarketPrice>> {
        // ThreadRng is not Send; draw everything before the first await
        let prices = {
            let mut rng = rand::thread_rng();
            simulate_market(&mut rng)
        };

        for price in &prices {
            store::insert(self.store.as_ref(), price).await?;
        }
        tracing::debug!(count = prices.len(), "Archived market quotes");

        Ok(prices)
    }
}
