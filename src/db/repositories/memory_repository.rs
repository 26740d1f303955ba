use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::document_repository::DocumentRepositoryTrait;
use super::parse_id;
use super::trade_repository::TradeRepositoryTrait;
use crate::db::error::StoreError;
use crate::db::models::{Document, NewTrade, Trade, TradeUpdate};

/// In-process trade store, used with `STORAGE=memory` and in tests.
#[derive(Default)]
pub struct InMemoryTradeRepository {
    trades: RwLock<Vec<Trade>>,
}

impl InMemoryTradeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TradeRepositoryTrait for InMemoryTradeRepository {
    async fn find_all(&self) -> Result<Vec<Trade>, StoreError> {
        Ok(self.trades.read().await.clone())
    }

    async fn create(&self, trade: NewTrade) -> Result<Trade, StoreError> {
        let trade = trade.into_trade(Uuid::new_v4());
        self.trades.write().await.push(trade.clone());
        Ok(trade)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Trade>, StoreError> {
        let id = parse_id(id)?;
        let trades = self.trades.read().await;
        Ok(trades.iter().find(|t| t.id == id).cloned())
    }

    async fn update(&self, id: &str, update: TradeUpdate) -> Result<Option<Trade>, StoreError> {
        let id = parse_id(id)?;
        let mut trades = self.trades.write().await;

        match trades.iter_mut().find(|t| t.id == id) {
            Some(trade) => {
                update.apply(trade);
                Ok(Some(trade.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<Option<Trade>, StoreError> {
        let id = parse_id(id)?;
        let mut trades = self.trades.write().await;

        let removed = trades
            .iter()
            .position(|t| t.id == id)
            .map(|index| trades.remove(index));
        Ok(removed)
    }
}

/// In-process store for one schemaless collection.
#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepositoryTrait for InMemoryDocumentRepository {
    async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.documents.read().await.clone())
    }

    async fn create(&self, fields: Map<String, Value>) -> Result<Document, StoreError> {
        let document = Document::new(Uuid::new_v4(), fields);
        self.documents.write().await.push(document.clone());
        Ok(document)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let id = parse_id(id)?;
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|d| d.id == id).cloned())
    }

    async fn update(&self, id: &str, fields: Map<String, Value>) -> Result<Option<Document>, StoreError> {
        let id = parse_id(id)?;
        let mut documents = self.documents.write().await;

        match documents.iter_mut().find(|d| d.id == id) {
            Some(document) => {
                document.merge(fields);
                Ok(Some(document.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let id = parse_id(id)?;
        let mut documents = self.documents.write().await;

        let removed = documents
            .iter()
            .position(|d| d.id == id)
            .map(|index| documents.remove(index));
        Ok(removed)
    }
}
