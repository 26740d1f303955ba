use actix_web::{App, HttpServer};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use skin_market::api::routes::register_routes;
use skin_market::api::AppStores;
use skin_market::client::{fetch_items, fetch_trades, fetch_users, ApiClient, Store};
use skin_market::db::{DocumentRepositoryTrait, TradeRepositoryTrait};
use skin_market::models::NewTrade;

async fn spawn_server(stores: AppStores) -> String {
    let server = HttpServer::new(move || {
        let stores = stores.clone();
        App::new()
            .configure(move |cfg| stores.register(cfg))
            .configure(register_routes)
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("bind test server");
    let addr = server.addrs()[0];

    actix_web::rt::spawn(server.run());
    format!("http://{}", addr)
}

fn new_trade(item: &str, price: f64) -> NewTrade {
    NewTrade {
        item_id: item.to_string(),
        seller_id: "u1".to_string(),
        buyer_id: "u2".to_string(),
        trade_price: price,
        status: None,
    }
}

#[actix_web::test]
async fn test_fetch_trades_fills_store() {
    let stores = AppStores::in_memory();
    let first = stores.trades.create(new_trade("i1", 25.0)).await.unwrap();
    let second = stores.trades.create(new_trade("i2", 40.0)).await.unwrap();
    let base_url = spawn_server(stores).await;

    let client = ApiClient::new(base_url).unwrap();
    let store = Store::new();
    let notifications = Arc::new(AtomicUsize::new(0));
    let seen = notifications.clone();
    store.subscribe(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    fetch_trades(&client, &store).await;

    let state = store.state();
    assert!(!state.trades.loading);
    assert!(state.trades.error.is_none());
    assert_eq!(state.trades.data, vec![first, second]);
    assert!(state.items.data.is_empty());
    assert_eq!(notifications.load(Ordering::SeqCst), 2);
}

#[actix_web::test]
async fn test_fetch_items_and_users_fill_store() {
    let stores = AppStores::in_memory();
    let item = json!({ "name": "AWP | Dragon Lore", "price": 1500 });
    stores.items.create(item.as_object().unwrap().clone()).await.unwrap();
    let user = json!({ "username": "s1mple" });
    stores.users.create(user.as_object().unwrap().clone()).await.unwrap();
    let base_url = spawn_server(stores).await;

    let client = ApiClient::new(base_url).unwrap();
    let store = Store::new();

    fetch_items(&client, &store).await;
    fetch_users(&client, &store).await;

    let state = store.state();
    assert!(!state.items.loading);
    assert!(state.items.error.is_none());
    assert_eq!(state.items.data.len(), 1);
    assert_eq!(state.items.data[0]["name"], "AWP | Dragon Lore");
    assert!(state.items.data[0]["id"].is_string());

    assert!(state.users.error.is_none());
    assert_eq!(state.users.data.len(), 1);
    assert_eq!(state.users.data[0]["username"], "s1mple");
}

#[actix_web::test]
async fn test_error_status_is_dispatched_as_failure() {
    // a server that mounts no routes answers 404 with an empty body
    let server = HttpServer::new(App::new)
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind test server");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    let client = ApiClient::new(format!("http://{}", addr)).unwrap();
    let store = Store::new();

    fetch_items(&client, &store).await;

    let state = store.state();
    assert!(!state.items.loading);
    assert!(state.items.data.is_empty());
    assert_eq!(state.items.error.as_deref(), Some("404 Not Found"));
}

#[actix_web::test]
async fn test_unreachable_server_is_dispatched_as_failure() {
    let client = ApiClient::new("http://127.0.0.1:1").unwrap();
    let store = Store::new();

    fetch_trades(&client, &store).await;

    let state = store.state();
    assert!(!state.trades.loading);
    assert!(state.trades.error.is_some());
}
