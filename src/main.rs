use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use skin_market::api::{self, AppStores};
use skin_market::client::{self, ApiClient, Resource, Store};
use skin_market::config::{self, StorageBackend};
use skin_market::{db, utils};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the trade API server (default)
    Serve,

    /// Apply database migrations and exit
    Migrate,

    /// Fetch a resource through the client store and print its state
    Fetch {
        /// items, users or trades
        resource: Resource,

        /// Server to fetch from
        #[arg(long, default_value = "http://localhost:3000")]
        base_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    utils::logging::init_logger();

    // Parse command line arguments
    let cli = Cli::parse();

    // Load configuration
    let config = config::load_config()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Migrate => {
            let pool = db::init_db_pool(&config.database).await?;
            db::run_migrations(&pool).await?;
            pool.close().await;
            info!("Migrations applied");
            Ok(())
        }
        Command::Fetch { resource, base_url } => fetch(resource, &base_url).await,
    }
}

async fn serve(config: config::Config) -> Result<()> {
    let mut pool = None;

    let stores = match config.storage {
        StorageBackend::Postgres => {
            let pg = db::init_db_pool(&config.database).await?;
            db::check_database_health(&pg).await?;
            db::run_migrations(&pg).await?;
            pool = Some(pg.clone());
            AppStores::postgres(pg)
        }
        StorageBackend::Memory => {
            info!("Using in-memory stores");
            AppStores::in_memory()
        }
    };

    let result = api::start_api_server(&config.api, stores)
        .await
        .context("API server failed");

    if let Some(pool) = pool {
        info!("Closing database connection pool");
        pool.close().await;
    }

    result
}

async fn fetch(resource: Resource, base_url: &str) -> Result<()> {
    let api_client = ApiClient::new(base_url)?;
    let store = Store::new();

    match resource {
        Resource::Items => client::fetch_items(&api_client, &store).await,
        Resource::Users => client::fetch_users(&api_client, &store).await,
        Resource::Trades => client::fetch_trades(&api_client, &store).await,
    }

    let state = store.state();
    let slice = match resource {
        Resource::Items => serde_json::to_string_pretty(&state.items)?,
        Resource::Users => serde_json::to_string_pretty(&state.users)?,
        Resource::Trades => serde_json::to_string_pretty(&state.trades)?,
    };
    println!("{}", slice);

    Ok(())
}
