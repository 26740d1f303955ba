// Re-export modules
pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod utils;

// Re-export models
pub mod models {
    // Trade record types shared by the server and the client
    pub use crate::db::models::*;
}
