//! # SQLite Vector Store
//!
//! Persistent [`VectorStore`]. Embeddings are stored as little-endian `f32` BLOBs and
//! metadata as a JSON TEXT column. Similarity search loads every embedding and ranks
//! them by cosine similarity in process; there is no ANN index.

use std::cmp::Ordering;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use memory_core::{cosine_similarity, ScoredDocument, VectorDocument, VectorStore};
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct SQLiteVectorStore {
    pool: SqlitePool,
}

impl SQLiteVectorStore {
    /// Opens (or creates) the store at `database_url`: a file path or a `sqlite:` URL.
    pub async fn new(database_url: &str) -> Result<Self, anyhow::Error> {
        info!("Opening SQLite vector store: {}", database_url);

        let options = if database_url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(database_url)?
        } else {
            SqliteConnectOptions::new().filename(database_url)
        }
        .create_if_missing(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vector_documents (
                id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                metadata TEXT NOT NULL DEFAULT '{}',
                embedding BLOB NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
        embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn decode_embedding(blob: &[u8]) -> Vec<f32> {
        blob.chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    fn row_to_document(row: &SqliteRow) -> Result<VectorDocument, anyhow::Error> {
        let id: String = row.try_get("id")?;
        let metadata: String = row.try_get("metadata")?;
        let embedding: Vec<u8> = row.try_get("embedding")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        let metadata = match serde_json::from_str::<Value>(&metadata)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Ok(VectorDocument {
            id: Uuid::from_str(&id)?,
            content: row.try_get("content")?,
            metadata,
            embedding: Self::decode_embedding(&embedding),
            created_at,
        })
    }

    async fn insert<'e, E>(executor: E, document: &VectorDocument) -> Result<(), anyhow::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO vector_documents (id, content, metadata, embedding, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(document.id.to_string())
        .bind(document.content.clone())
        .bind(serde_json::to_string(&document.metadata)?)
        .bind(Self::encode_embedding(&document.embedding))
        .bind(document.created_at)
        .execute(executor)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl VectorStore for SQLiteVectorStore {
    async fn add(&self, document: VectorDocument) -> Result<(), anyhow::Error> {
        Self::insert(&self.pool, &document).await
    }

    async fn add_batch(&self, documents: Vec<VectorDocument>) -> Result<(), anyhow::Error> {
        let mut tx = self.pool.begin().await?;
        for document in &documents {
            Self::insert(&mut *tx, document).await?;
        }
        tx.commit().await?;
        debug!(count = documents.len(), "Vector documents added");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM vector_documents WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn similarity_search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredDocument>, anyhow::Error> {
        let rows = sqlx::query(
            "SELECT id, content, metadata, embedding, created_at FROM vector_documents",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut scored = rows
            .iter()
            .map(|row| {
                let document = Self::row_to_document(row)?;
                Ok(ScoredDocument {
                    score: cosine_similarity(query_embedding, &document.embedding),
                    document,
                })
            })
            .collect::<Result<Vec<_>, anyhow::Error>>()?;

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(limit);
        Ok(scored)
    }

    async fn count(&self) -> Result<usize, anyhow::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vector_documents")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// **Test: Documents and metadata survive reopening a file-backed store.**
    #[tokio::test]
    async fn test_persists_across_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("vectors.db");
        let url = path.to_str().unwrap();

        let mut metadata = Map::new();
        metadata.insert("source".into(), json!("faq.md"));
        let document = VectorDocument::new("Refunds take 5 days", metadata, vec![0.25, -1.5, 3.0]);
        {
            let store = SQLiteVectorStore::new(url).await.unwrap();
            store.add(document.clone()).await.unwrap();
        }

        let store = SQLiteVectorStore::new(url).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        let results = store.similarity_search(&[0.25, -1.5, 3.0], 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.embedding, vec![0.25, -1.5, 3.0]);
        assert_eq!(results[0].document.metadata["source"], "faq.md");
        assert!((results[0].score - 1.0).abs() < 1e-6);
    }

    /// **Test: Batch insert plus ranking and delete on an in-memory store.**
    #[tokio::test]
    async fn test_batch_rank_delete() {
        let store = SQLiteVectorStore::new("sqlite::memory:").await.unwrap();
        let near = VectorDocument::new("near", Map::new(), vec![1.0, 0.1]);
        let far = VectorDocument::new("far", Map::new(), vec![-1.0, 0.0]);
        let near_id = near.id;
        store.add_batch(vec![far, near]).await.unwrap();

        let results = store.similarity_search(&[1.0, 0.0], 1).await.unwrap();
        assert_eq!(results[0].document.content, "near");

        assert!(store.delete(near_id).await.unwrap());
        assert!(!store.delete(near_id).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
