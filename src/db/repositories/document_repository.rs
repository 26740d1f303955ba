// src/db/repositories/document_repository.rs
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{postgres::PgPool, types::Json, FromRow};
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;
use uuid::Uuid;

use super::parse_id;
use crate::db::error::StoreError;
use crate::db::models::{Collection, Document};

/// Data-access contract for a schemaless collection (items, users).
///
/// Same shape as the trade contract: one store call per method, raw path
/// ids, `None` when nothing matched.
#[async_trait]
pub trait DocumentRepositoryTrait: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Document>, StoreError>;
    async fn create(&self, fields: Map<String, Value>) -> Result<Document, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError>;
    /// Supplied fields overwrite, the others are kept.
    async fn update(&self, id: &str, fields: Map<String, Value>) -> Result<Option<Document>, StoreError>;
    async fn delete(&self, id: &str) -> Result<Option<Document>, StoreError>;
}

/// A document repository bound to collection `C`, so each collection gets
/// its own slot in the app data.
pub struct DocumentStore<C: Collection> {
    repo: Arc<dyn DocumentRepositoryTrait>,
    _collection: PhantomData<C>,
}

impl<C: Collection> DocumentStore<C> {
    pub fn new(repo: Arc<dyn DocumentRepositoryTrait>) -> Self {
        Self {
            repo,
            _collection: PhantomData,
        }
    }
}

impl<C: Collection> Deref for DocumentStore<C> {
    type Target = dyn DocumentRepositoryTrait;

    fn deref(&self) -> &Self::Target {
        self.repo.as_ref()
    }
}

#[derive(FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Map<String, Value>>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            fields: row.body.0,
        }
    }
}

/// PostgreSQL document repository; all collections share the `documents`
/// table, keyed by collection name.
pub struct DocumentRepository {
    pub(crate) pool: PgPool,
    collection: &'static str,
}

impl DocumentRepository {
    pub fn new<C: Collection>(pool: PgPool) -> Self {
        Self {
            pool,
            collection: C::KEY,
        }
    }
}

#[async_trait]
impl DocumentRepositoryTrait for DocumentRepository {
    async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, body FROM documents
            WHERE collection = $1
            ORDER BY created_at
            "#,
        )
        .bind(self.collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn create(&self, fields: Map<String, Value>) -> Result<Document, StoreError> {
        let document = Document::new(Uuid::new_v4(), fields);

        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            RETURNING id, body
            "#,
        )
        .bind(self.collection)
        .bind(document.id)
        .bind(Json(&document.fields))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let id = parse_id(id)?;

        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, body FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(self.collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Document::from))
    }

    async fn update(&self, id: &str, mut fields: Map<String, Value>) -> Result<Option<Document>, StoreError> {
        let id = parse_id(id)?;
        fields.remove("id");

        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            UPDATE documents SET body = body || $3
            WHERE collection = $1 AND id = $2
            RETURNING id, body
            "#,
        )
        .bind(self.collection)
        .bind(id)
        .bind(Json(&fields))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Document::from))
    }

    async fn delete(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let id = parse_id(id)?;

        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND id = $2
            RETURNING id, body
            "#,
        )
        .bind(self.collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Document::from))
    }
}
