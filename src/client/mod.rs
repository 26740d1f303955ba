//! Client side of the marketplace.
//!
//! Action creators call the REST API through [`ApiClient`] and dispatch the
//! outcome into a [`Store`], whose reducer folds it into per-resource view
//! state.
//!
//! ```ignore
//! let client = ApiClient::new("http://localhost:3000")?;
//! let store = Store::new();
//! fetch_trades(&client, &store).await;
//! println!("{} trades", store.state().trades.data.len());
//! ```

pub mod actions;
pub mod reducer;
pub mod store;

pub use actions::{fetch_items, fetch_resource, fetch_trades, fetch_users, Action, FetchEvent, Resource};
pub use reducer::{root_reducer, AppState, ResourceState};
pub use store::Store;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::error::MessageResponse;

/// Errors surfaced by [`ApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport or decoding failure.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
}

/// Thin JSON client bound to one server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `path` and decodes the JSON body.
    ///
    /// A non-2xx answer becomes [`ClientError::Api`], carrying the server's
    /// `message` field when the body has one and the status line otherwise.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.http.get(format!("{}{}", self.base_url, path)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<MessageResponse>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
