pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::ApiSettings;
use crate::db::models::{Items, Users};
use crate::db::{
    DocumentRepository, DocumentRepositoryTrait, DocumentStore, InMemoryDocumentRepository,
    InMemoryTradeRepository, TradeRepository, TradeRepositoryTrait,
};
use middleware::logging::RequestLogger;

/// Store handles for every collection the API serves.
#[derive(Clone)]
pub struct AppStores {
    pub trades: Arc<dyn TradeRepositoryTrait>,
    pub items: Arc<dyn DocumentRepositoryTrait>,
    pub users: Arc<dyn DocumentRepositoryTrait>,
}

impl AppStores {
    pub fn in_memory() -> Self {
        Self {
            trades: Arc::new(InMemoryTradeRepository::new()),
            items: Arc::new(InMemoryDocumentRepository::new()),
            users: Arc::new(InMemoryDocumentRepository::new()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            trades: Arc::new(TradeRepository::new(pool.clone())),
            items: Arc::new(DocumentRepository::new::<Items>(pool.clone())),
            users: Arc::new(DocumentRepository::new::<Users>(pool)),
        }
    }

    /// Registers the handles as app data, one slot per collection.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.trades.clone()))
            .app_data(web::Data::new(DocumentStore::<Items>::new(self.items.clone())))
            .app_data(web::Data::new(DocumentStore::<Users>::new(self.users.clone())));
    }
}

/// Serve the API until the server is stopped.
///
/// The stores are created by the caller and shared by every worker.
pub async fn start_api_server(config: &ApiSettings, stores: AppStores) -> std::io::Result<()> {
    let server_address = format!("{}:{}", config.host, config.port);
    let cors_origin = config.cors_origin.clone();

    let mut server = HttpServer::new(move || {
        let stores = stores.clone();
        App::new()
            .wrap(cors(&cors_origin))
            .wrap(RequestLogger::new())
            .configure(move |cfg| stores.register(cfg))
            .configure(routes::register_routes)
    })
    .bind(&server_address)?;

    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    info!("Server running on port {}", config.port);
    server.run().await
}

fn cors(origin: &str) -> Cors {
    let cors = if origin == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(origin)
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec!["Content-Type"])
        .max_age(3600)
}
