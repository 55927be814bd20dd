//! PostgreSQL-backed document store
//!
//! All collections share one `documents` table holding JSONB bodies. `seq`
//! records insertion order and breaks ties when sorting on a body field.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{types::Json, PgPool, Postgres, QueryBuilder};

use super::{DocumentStore, FindOptions, SortOrder};
use crate::error::AppResult;

#[derive(Clone)]
pub struct PgDocumentStore {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    body: Json<Value>,
}

impl PgDocumentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    fn select_query<'a>(collection: &'a str, options: &FindOptions) -> QueryBuilder<'a, Postgres> {
        let mut query = QueryBuilder::new("SELECT body FROM documents WHERE collection = ");
        query.push_bind(collection);

        match options.sort {
            Some(sort) => {
                let direction = match sort.order {
                    SortOrder::Ascending => "ASC",
                    SortOrder::Descending => "DESC",
                };
                query.push(" ORDER BY body ->> ");
                query.push_bind(sort.field);
                query.push(format!(" {direction}, seq {direction}"));
            }
            None => {
                query.push(" ORDER BY seq ASC");
            }
        }

        if let Some(limit) = options.limit {
            query.push(" LIMIT ");
            query.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        query
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(&self, collection: &str, document: Value) -> AppResult<()> {
        sqlx::query("INSERT INTO documents (collection, body) VALUES ($1, $2)")
            .bind(collection)
            .bind(Json(document))
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn find(&self, collection: &str, options: FindOptions) -> AppResult<Vec<Value>> {
        let rows = Self::select_query(collection, &options)
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|row| row.body.0).collect())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsorted_query_uses_insertion_order() {
        let query = PgDocumentStore::select_query("crop_records", &FindOptions::limit(1000));
        assert_eq!(
            query.sql(),
            "SELECT body FROM documents WHERE collection = $1 ORDER BY seq ASC LIMIT $2"
        );
    }

    #[test]
    fn test_latest_query_sorts_on_body_field() {
        let query = PgDocumentStore::select_query("ai_queries", &FindOptions::latest("timestamp", 10));
        assert_eq!(
            query.sql(),
            "SELECT body FROM documents WHERE collection = $1 ORDER BY body ->> $2 DESC, seq DESC LIMIT $3"
        );
    }
}
