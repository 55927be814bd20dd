//! In-process document store

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{DocumentStore, FindOptions, SortOrder};
use crate::error::AppResult;

/// Keeps every collection in memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Order two field values; missing and null sort first
fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_one(&self, collection: &str, document: Value) -> AppResult<()> {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn find(&self, collection: &str, options: FindOptions) -> AppResult<Vec<Value>> {
        let mut documents = self
            .collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default();

        if let Some(sort) = options.sort {
            // Ties follow insertion order in the sort direction, newest first
            // when descending, matching the `seq` tiebreak in PostgreSQL
            if sort.order == SortOrder::Descending {
                documents.reverse();
            }
            documents.sort_by(|a, b| {
                let ordering = compare_fields(a.get(sort.field), b.get(sort.field));
                match sort.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = options.limit {
            documents.truncate(limit);
        }

        Ok(documents)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SortBy;
    use serde_json::json;

    #[test]
    fn test_insertion_order_without_sort() {
        tokio_test::block_on(async {
            let store = MemoryDocumentStore::new();
            for n in 0..3 {
                store.insert_one("crops", json!({"n": n})).await.unwrap();
            }

            let docs = store.find("crops", FindOptions::default()).await.unwrap();
            assert_eq!(docs, vec![json!({"n": 0}), json!({"n": 1}), json!({"n": 2})]);
        });
    }

    #[test]
    fn test_latest_sorts_descending_and_limits() {
        tokio_test::block_on(async {
            let store = MemoryDocumentStore::new();
            for stamp in ["2025-01-02", "2025-01-03", "2025-01-01"] {
                store.insert_one("q", json!({"timestamp": stamp})).await.unwrap();
            }

            let docs = store.find("q", FindOptions::latest("timestamp", 2)).await.unwrap();
            assert_eq!(
                docs,
                vec![json!({"timestamp": "2025-01-03"}), json!({"timestamp": "2025-01-02"})]
            );
        });
    }

    #[test]
    fn test_descending_ties_newest_first() {
        tokio_test::block_on(async {
            let store = MemoryDocumentStore::new();
            for (n, stamp) in ["2025-01-01", "2025-01-02", "2025-01-02", "2025-01-02"].iter().enumerate() {
                store.insert_one("q", json!({"n": n, "timestamp": stamp})).await.unwrap();
            }

            let order: Vec<_> = store
                .find("q", FindOptions::latest("timestamp", 10))
                .await
                .unwrap()
                .into_iter()
                .map(|doc| doc["n"].as_u64().unwrap())
                .collect();
            assert_eq!(order, vec![3, 2, 1, 0]);
        });
    }

    #[test]
    fn test_ascending_ties_oldest_first() {
        tokio_test::block_on(async {
            let store = MemoryDocumentStore::new();
            for n in 0..3 {
                store.insert_one("q", json!({"n": n, "score": 1})).await.unwrap();
            }

            let options = FindOptions {
                sort: Some(SortBy {
                    field: "score",
                    order: SortOrder::Ascending,
                }),
                limit: None,
            };
            let order: Vec<_> = store
                .find("q", options)
                .await
                .unwrap()
                .into_iter()
                .map(|doc| doc["n"].as_u64().unwrap())
                .collect();
            assert_eq!(order, vec![0, 1, 2]);
        });
    }

    #[test]
    fn test_numeric_ascending_sort() {
        tokio_test::block_on(async {
            let store = MemoryDocumentStore::new();
            for score in [10.5, 2.0, 7.0] {
                store.insert_one("s", json!({"score": score})).await.unwrap();
            }

            let options = FindOptions {
                sort: Some(SortBy {
                    field: "score",
                    order: SortOrder::Ascending,
                }),
                limit: None,
            };
            let scores: Vec<_> = store
                .find("s", options)
                .await
                .unwrap()
                .into_iter()
                .map(|doc| doc["score"].as_f64().unwrap())
                .collect();
            assert_eq!(scores, vec![2.0, 7.0, 10.5]);
        });
    }

    #[test]
    fn test_unknown_collection_is_empty() {
        tokio_test::block_on(async {
            let store = MemoryDocumentStore::new();
            assert!(store.find("nothing", FindOptions::default()).await.unwrap().is_empty());
        });
    }
}
