use actix_web::{web, HttpResponse};
use log::debug;
use serde_json::{Map, Value};

use crate::api::error::{ApiError, MessageResponse};
use crate::db::models::Collection;
use crate::db::DocumentStore;

// Item and user handlers. Bodies must be JSON objects; their fields are
// stored as given.

pub async fn get_documents<C: Collection>(
    store: web::Data<DocumentStore<C>>,
) -> Result<HttpResponse, ApiError> {
    let all = store.find_all().await.map_err(ApiError::server_fault)?;
    debug!("Listing {} {}", all.len(), C::KEY);
    Ok(HttpResponse::Ok().json(all))
}

pub async fn create_document<C: Collection>(
    store: web::Data<DocumentStore<C>>,
    req: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    let saved = store.create(req.into_inner()).await.map_err(ApiError::client_fault)?;
    debug!("Created {} {}", C::MODEL, saved.id);
    Ok(HttpResponse::Created().json(saved))
}

pub async fn get_document<C: Collection>(
    store: web::Data<DocumentStore<C>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    match store.find_by_id(&id).await.map_err(ApiError::server_fault)? {
        Some(document) => Ok(HttpResponse::Ok().json(document)),
        None => Err(ApiError::NotFound(format!("{} not found", C::MODEL))),
    }
}

pub async fn update_document<C: Collection>(
    store: web::Data<DocumentStore<C>>,
    path: web::Path<String>,
    req: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let updated = store
        .update(&id, req.into_inner())
        .await
        .map_err(ApiError::client_fault)?;
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_document<C: Collection>(
    store: web::Data<DocumentStore<C>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if store.delete(&id).await.map_err(ApiError::server_fault)?.is_some() {
        debug!("Deleted {} {}", C::MODEL, id);
    }
    Ok(HttpResponse::Ok().json(MessageResponse::new(format!("{} deleted", C::MODEL))))
}
