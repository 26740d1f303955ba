use actix_web::{web, HttpResponse};
use log::debug;

use crate::api::error::{ApiError, MessageResponse};
use crate::db::models::{NewTrade, TradeUpdate};
use crate::db::TradeRepositoryTrait;

type Trades = web::Data<dyn TradeRepositoryTrait>;

// List all trades
pub async fn get_trades(trades: Trades) -> Result<HttpResponse, ApiError> {
    let all = trades.find_all().await.map_err(ApiError::server_fault)?;
    debug!("Listing {} trades", all.len());
    Ok(HttpResponse::Ok().json(all))
}

// Create a trade; status defaults to pending
pub async fn create_trade(
    trades: Trades,
    req: web::Json<NewTrade>,
) -> Result<HttpResponse, ApiError> {
    let new_trade = req.into_inner();
    new_trade.validate().map_err(ApiError::client_fault)?;

    let saved = trades.create(new_trade).await.map_err(ApiError::client_fault)?;
    debug!("Created trade {}", saved.id);
    Ok(HttpResponse::Created().json(saved))
}

// Get a specific trade
pub async fn get_trade(trades: Trades, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    match trades.find_by_id(&id).await.map_err(ApiError::server_fault)? {
        Some(trade) => Ok(HttpResponse::Ok().json(trade)),
        None => Err(ApiError::NotFound("Trade not found".to_string())),
    }
}

// Update a trade. An unknown id answers 200 with a null body.
pub async fn update_trade(
    trades: Trades,
    path: web::Path<String>,
    req: web::Json<TradeUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let update = req.into_inner();
    update.validate().map_err(ApiError::client_fault)?;

    let updated = trades.update(&id, update).await.map_err(ApiError::client_fault)?;
    Ok(HttpResponse::Ok().json(updated))
}

// Delete a trade; succeeds whether or not it existed
pub async fn delete_trade(trades: Trades, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if trades.delete(&id).await.map_err(ApiError::server_fault)?.is_some() {
        debug!("Deleted trade {}", id);
    }
    Ok(HttpResponse::Ok().json(MessageResponse::new("Trade deleted")))
}
