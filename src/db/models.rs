// src/db/models.rs - Trade record schema, opaque item/user documents and typed write bodies
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::error::StoreError;

/// Trade status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "trade_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Pending => write!(f, "pending"),
            TradeStatus::Completed => write!(f, "completed"),
            TradeStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for TradeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TradeStatus::Pending),
            "completed" => Ok(TradeStatus::Completed),
            "cancelled" => Ok(TradeStatus::Cancelled),
            _ => Err(format!("Invalid trade status: {}", s)),
        }
    }
}

/// A proposed or completed exchange of one item between two users.
///
/// `item_id`, `seller_id` and `buyer_id` are opaque references into the item
/// and user collections, which this service does not own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: Uuid,
    pub item_id: String,
    pub seller_id: String,
    pub buyer_id: String,
    pub status: TradeStatus,
    pub trade_price: f64,
}

/// Body accepted by the create endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    pub item_id: String,
    pub seller_id: String,
    pub buyer_id: String,
    pub trade_price: f64,
    #[serde(default)]
    pub status: Option<TradeStatus>,
}

impl NewTrade {
    pub fn validate(&self) -> Result<(), StoreError> {
        require_reference("itemId", &self.item_id)?;
        require_reference("sellerId", &self.seller_id)?;
        require_reference("buyerId", &self.buyer_id)?;
        require_price(self.trade_price)
    }

    /// Builds the record to persist, defaulting the status to pending.
    pub fn into_trade(self, id: Uuid) -> Trade {
        Trade {
            id,
            item_id: self.item_id,
            seller_id: self.seller_id,
            buyer_id: self.buyer_id,
            status: self.status.unwrap_or_default(),
            trade_price: self.trade_price,
        }
    }
}

/// Body accepted by the update endpoint.
///
/// Every supplied field overwrites the stored value and omitted fields are
/// kept. There is no transition rule on `status`: any value may replace any
/// other, `completed -> pending` included.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeUpdate {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub buyer_id: Option<String>,
    #[serde(default)]
    pub status: Option<TradeStatus>,
    #[serde(default)]
    pub trade_price: Option<f64>,
}

impl TradeUpdate {
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(item_id) = &self.item_id {
            require_reference("itemId", item_id)?;
        }
        if let Some(seller_id) = &self.seller_id {
            require_reference("sellerId", seller_id)?;
        }
        if let Some(buyer_id) = &self.buyer_id {
            require_reference("buyerId", buyer_id)?;
        }
        if let Some(price) = self.trade_price {
            require_price(price)?;
        }
        Ok(())
    }

    pub fn apply(self, trade: &mut Trade) {
        if let Some(item_id) = self.item_id {
            trade.item_id = item_id;
        }
        if let Some(seller_id) = self.seller_id {
            trade.seller_id = seller_id;
        }
        if let Some(buyer_id) = self.buyer_id {
            trade.buyer_id = buyer_id;
        }
        if let Some(status) = self.status {
            trade.status = status;
        }
        if let Some(price) = self.trade_price {
            trade.trade_price = price;
        }
    }
}

/// A collection whose documents this service stores without a schema.
pub trait Collection: Send + Sync + 'static {
    /// Model name used in messages, e.g. `Item`.
    const MODEL: &'static str;
    /// Collection key in the store, e.g. `items`.
    const KEY: &'static str;
}

/// Marker for the item collection
pub struct Items;

impl Collection for Items {
    const MODEL: &'static str = "Item";
    const KEY: &'static str = "items";
}

/// Marker for the user collection
pub struct Users;

impl Collection for Users {
    const MODEL: &'static str = "User";
    const KEY: &'static str = "users";
}

/// An item or user record: a store-assigned `id` plus opaque JSON fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Builds a new document. A caller-supplied `id` field is dropped since
    /// the store owns ids.
    pub fn new(id: Uuid, mut fields: Map<String, Value>) -> Self {
        fields.remove("id");
        Self { id, fields }
    }

    /// Overwrites the supplied fields and keeps the rest. `id` never changes.
    pub fn merge(&mut self, mut fields: Map<String, Value>) {
        fields.remove("id");
        self.fields.extend(fields);
    }
}

fn require_reference(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{}: Path `{}` is required.", field, field)));
    }
    Ok(())
}

fn require_price(price: f64) -> Result<(), StoreError> {
    if !price.is_finite() {
        return Err(StoreError::Validation(format!(
            "tradePrice: Cast to Number failed for value \"{}\"",
            price
        )));
    }
    Ok(())
}
