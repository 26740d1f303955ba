use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::{ApiClient, Store};
use crate::db::models::Trade;

/// A resource the client keeps view state for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Items,
    Users,
    Trades,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Items => "/api/items",
            Resource::Users => "/api/users",
            Resource::Trades => "/api/trades",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Items => write!(f, "items"),
            Resource::Users => write!(f, "users"),
            Resource::Trades => write!(f, "trades"),
        }
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "items" => Ok(Resource::Items),
            "users" => Ok(Resource::Users),
            "trades" => Ok(Resource::Trades),
            _ => Err(format!("Invalid resource: {}", s)),
        }
    }
}

/// Outcome of one fetch, as seen by a resource reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent<T> {
    Request,
    Success(Vec<T>),
    Failure(String),
}

impl<T> FetchEvent<T> {
    fn kind(&self) -> &'static str {
        match self {
            FetchEvent::Request => "REQUEST",
            FetchEvent::Success(_) => "SUCCESS",
            FetchEvent::Failure(_) => "FAILURE",
        }
    }
}

/// Dispatched event. Item and user payloads are opaque JSON since their
/// schemas live outside this service.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Items(FetchEvent<Value>),
    Users(FetchEvent<Value>),
    Trades(FetchEvent<Trade>),
}

impl Action {
    pub fn resource(&self) -> Resource {
        match self {
            Action::Items(_) => Resource::Items,
            Action::Users(_) => Resource::Users,
            Action::Trades(_) => Resource::Trades,
        }
    }

    /// Conventional name, e.g. `FETCH_TRADES_SUCCESS`.
    pub fn type_name(&self) -> String {
        let kind = match self {
            Action::Items(event) => event.kind(),
            Action::Users(event) => event.kind(),
            Action::Trades(event) => event.kind(),
        };
        format!("FETCH_{}_{}", self.resource().to_string().to_uppercase(), kind)
    }
}

/// Fetches `resource` and dispatches request, then success or failure.
///
/// No retry and no deduplication: concurrent fetches of the same resource
/// race, and whichever resolves last wins in the reducer.
pub async fn fetch_resource<T, F>(client: &ApiClient, store: &Store, resource: Resource, wrap: F)
where
    T: DeserializeOwned,
    F: Fn(FetchEvent<T>) -> Action,
{
    store.dispatch(wrap(FetchEvent::Request));

    let event = match client.get_json::<Vec<T>>(resource.path()).await {
        Ok(data) => FetchEvent::Success(data),
        Err(e) => {
            debug!("Fetching {} failed: {}", resource, e);
            FetchEvent::Failure(e.to_string())
        }
    };

    store.dispatch(wrap(event));
}

pub async fn fetch_items(client: &ApiClient, store: &Store) {
    fetch_resource(client, store, Resource::Items, Action::Items).await
}

pub async fn fetch_users(client: &ApiClient, store: &Store) {
    fetch_resource(client, store, Resource::Users, Action::Users).await
}

pub async fn fetch_trades(client: &ApiClient, store: &Store) {
    fetch_resource(client, store, Resource::Trades, Action::Trades).await
}
