// src/db/repositories/trade_repository.rs
use async_trait::async_trait;
use sqlx::postgres::PgPool;
use uuid::Uuid;

use super::parse_id;
use crate::db::error::StoreError;
use crate::db::models::{NewTrade, Trade, TradeUpdate};

/// Data-access contract for the trade collection.
///
/// Every method maps to exactly one store call. Ids arrive as the raw
/// strings taken from the request path; a value the store cannot cast
/// fails with [`StoreError::InvalidId`].
#[async_trait]
pub trait TradeRepositoryTrait: Send + Sync {
    /// All trades, in the store's natural (insertion) order.
    async fn find_all(&self) -> Result<Vec<Trade>, StoreError>;
    async fn create(&self, trade: NewTrade) -> Result<Trade, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Trade>, StoreError>;
    /// Returns `None` when no trade has the id.
    async fn update(&self, id: &str, update: TradeUpdate) -> Result<Option<Trade>, StoreError>;
    /// Returns the removed trade, or `None` when nothing matched.
    async fn delete(&self, id: &str) -> Result<Option<Trade>, StoreError>;
}

pub struct TradeRepository {
    pub(crate) pool: PgPool,
}

impl TradeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TradeRepositoryTrait for TradeRepository {
    async fn find_all(&self) -> Result<Vec<Trade>, StoreError> {
        let trades = sqlx::query_as::<_, Trade>(
            r#"
            SELECT id, item_id, seller_id, buyer_id, status, trade_price
            FROM trades
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trades)
    }

    async fn create(&self, trade: NewTrade) -> Result<Trade, StoreError> {
        let trade = trade.into_trade(Uuid::new_v4());

        let trade = sqlx::query_as::<_, Trade>(
            r#"
            INSERT INTO trades (id, item_id, seller_id, buyer_id, status, trade_price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, item_id, seller_id, buyer_id, status, trade_price
            "#,
        )
        .bind(trade.id)
        .bind(&trade.item_id)
        .bind(&trade.seller_id)
        .bind(&trade.buyer_id)
        .bind(trade.status)
        .bind(trade.trade_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(trade)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Trade>, StoreError> {
        let id = parse_id(id)?;

        let trade = sqlx::query_as::<_, Trade>(
            r#"
            SELECT id, item_id, seller_id, buyer_id, status, trade_price
            FROM trades WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trade)
    }

    async fn update(&self, id: &str, update: TradeUpdate) -> Result<Option<Trade>, StoreError> {
        let id = parse_id(id)?;

        let trade = sqlx::query_as::<_, Trade>(
            r#"
            UPDATE trades
            SET item_id = COALESCE($2, item_id),
                seller_id = COALESCE($3, seller_id),
                buyer_id = COALESCE($4, buyer_id),
                status = COALESCE($5, status),
                trade_price = COALESCE($6, trade_price)
            WHERE id = $1
            RETURNING id, item_id, seller_id, buyer_id, status, trade_price
            "#,
        )
        .bind(id)
        .bind(update.item_id)
        .bind(update.seller_id)
        .bind(update.buyer_id)
        .bind(update.status)
        .bind(update.trade_price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trade)
    }

    async fn delete(&self, id: &str) -> Result<Option<Trade>, StoreError> {
        let id = parse_id(id)?;

        let trade = sqlx::query_as::<_, Trade>(
            r#"
            DELETE FROM trades WHERE id = $1
            RETURNING id, item_id, seller_id, buyer_id, status, trade_price
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trade)
    }
}
