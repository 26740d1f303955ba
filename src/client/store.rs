use log::debug;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use super::actions::Action;
use super::reducer::{root_reducer, AppState};

type Listener = Arc<dyn Fn(&AppState) + Send + Sync>;

/// Holds the application state and applies dispatched actions through
/// [`root_reducer`].
#[derive(Default)]
pub struct Store {
    state: RwLock<AppState>,
    listeners: Mutex<Vec<Listener>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            state: RwLock::new(state),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state.read().clone()
    }

    pub fn dispatch(&self, action: Action) {
        debug!("dispatch {}", action.type_name());

        let snapshot = {
            let mut state = self.state.write();
            let next = root_reducer(std::mem::take(&mut *state), action);
            *state = next;
            state.clone()
        };

        // Listeners may dispatch or subscribe themselves, so none of the
        // locks may be held while they run.
        let listeners: Vec<Listener> = self.listeners.lock().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Registers a listener called with the new state after every dispatch.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&AppState) + Send + Sync + 'static,
    {
        self.listeners.lock().push(Arc::new(listener));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::actions::FetchEvent;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_dispatch_updates_state() {
        let store = Store::new();
        store.dispatch(Action::Trades(FetchEvent::Request));
        assert!(store.state().trades.loading);

        store.dispatch(Action::Trades(FetchEvent::Failure("offline".to_string())));
        let state = store.state();
        assert!(!state.trades.loading);
        assert_eq!(state.trades.error.as_deref(), Some("offline"));
    }

    #[test]
    fn test_listeners_see_every_dispatch() {
        let store = Store::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        store.subscribe(move |state| {
            seen.fetch_add(1, Ordering::SeqCst);
            assert!(state.items.loading || state.items.error.is_some());
        });

        store.dispatch(Action::Items(FetchEvent::Request));
        store.dispatch(Action::Items(FetchEvent::Failure("boom".to_string())));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_listener_can_dispatch_and_subscribe() {
        let store = Arc::new(Store::new());
        let inner = Arc::downgrade(&store);
        store.subscribe(move |state| {
            if state.trades.loading {
                if let Some(store) = inner.upgrade() {
                    store.subscribe(|_| {});
                    store.dispatch(Action::Trades(FetchEvent::Failure("offline".to_string())));
                }
            }
        });

        let (done, finished) = mpsc::channel();
        let worker = store.clone();
        thread::spawn(move || {
            worker.dispatch(Action::Trades(FetchEvent::Request));
            done.send(()).ok();
        });

        finished
            .recv_timeout(Duration::from_secs(3))
            .expect("dispatch from a listener did not return");

        let state = store.state();
        assert!(!state.trades.loading);
        assert_eq!(state.trades.error.as_deref(), Some("offline"));
    }
}
