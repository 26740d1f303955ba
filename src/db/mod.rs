pub mod error;
pub mod models;
pub mod repositories;

use anyhow::{Context, Result};
use log::info;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::DatabaseSettings;

pub use error::StoreError;
pub use repositories::{
    DocumentRepository, DocumentRepositoryTrait, DocumentStore, InMemoryDocumentRepository,
    InMemoryTradeRepository, TradeRepository, TradeRepositoryTrait,
};

// Using sqlx for database operations with strong types
pub async fn init_db_pool(config: &DatabaseSettings) -> Result<PgPool> {
    info!("Initializing database connection pool with max_connections={}", config.max_connections);

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await
        .context("Failed to connect to database")
}

// Database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")
}

// Helper function to check database health
pub async fn check_database_health(pool: &PgPool) -> Result<bool> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| true)
        .context("Failed to connect to database")
}
