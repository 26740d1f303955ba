pub mod document_repository;
pub mod memory_repository;
pub mod trade_repository;

pub use document_repository::{DocumentRepository, DocumentRepositoryTrait, DocumentStore};
pub use memory_repository::{InMemoryDocumentRepository, InMemoryTradeRepository};
pub use trade_repository::{TradeRepository, TradeRepositoryTrait};

use uuid::Uuid;

use super::error::StoreError;

/// Casts a raw path id into a record key.
pub(crate) fn parse_id(id: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}
