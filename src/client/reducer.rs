use serde::Serialize;
use serde_json::Value;

use super::actions::{Action, FetchEvent};
use crate::db::models::Trade;

/// View state of one resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceState<T> {
    pub data: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// Folds one fetch event into a resource's state.
///
/// Success replaces `data` wholesale and leaves any earlier `error` as it was.
pub fn reduce<T>(state: ResourceState<T>, event: FetchEvent<T>) -> ResourceState<T> {
    match event {
        FetchEvent::Request => ResourceState {
            loading: true,
            ..state
        },
        FetchEvent::Success(data) => ResourceState {
            loading: false,
            data,
            ..state
        },
        FetchEvent::Failure(message) => ResourceState {
            loading: false,
            error: Some(message),
            ..state
        },
    }
}

/// Whole application state, one slice per resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub items: ResourceState<Value>,
    pub users: ResourceState<Value>,
    pub trades: ResourceState<Trade>,
}

/// Routes an action to the slice it belongs to; other slices are untouched.
pub fn root_reducer(state: AppState, action: Action) -> AppState {
    match action {
        Action::Items(event) => AppState {
            items: reduce(state.items, event),
            ..state
        },
        Action::Users(event) => AppState {
            users: reduce(state.users, event),
            ..state
        },
        Action::Trades(event) => AppState {
            trades: reduce(state.trades, event),
            ..state
        },
    }
}
