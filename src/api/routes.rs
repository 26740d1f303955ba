use actix_web::{error::JsonPayloadError, web, HttpRequest, Scope};

use super::error::ApiError;
use super::handlers::{document, trade};
use crate::db::models::{Collection, Items, Users};

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(document_scope::<Items>())
        .service(document_scope::<Users>())
        .service(
            web::scope("/api/trades")
                .route("", web::get().to(trade::get_trades))
                .route("", web::post().to(trade::create_trade))
                .route("/{id}", web::get().to(trade::get_trade))
                .route("/{id}", web::put().to(trade::update_trade))
                .route("/{id}", web::delete().to(trade::delete_trade)),
        );
}

fn document_scope<C: Collection>() -> Scope {
    web::scope(&format!("/api/{}", C::KEY))
        .route("", web::get().to(document::get_documents::<C>))
        .route("", web::post().to(document::create_document::<C>))
        .route("/{id}", web::get().to(document::get_document::<C>))
        .route("/{id}", web::put().to(document::update_document::<C>))
        .route("/{id}", web::delete().to(document::delete_document::<C>))
}

// Body decoding failures are client faults and answer with a `{message}` body
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let message = match &err {
            JsonPayloadError::Deserialize(inner) => inner.to_string(),
            other => other.to_string(),
        };
        ApiError::BadRequest(message).into()
    })
}
