use actix_web::{http::StatusCode, test, App};
use serde_json::{json, Value};
use uuid::Uuid;

use skin_market::api::routes::register_routes;
use skin_market::api::AppStores;
use skin_market::models::Document;

#[actix_web::test]
async fn test_item_lifecycle() {
    let stores = AppStores::in_memory();
    let app = test::init_service(
        App::new()
            .configure(|cfg| stores.register(cfg))
            .configure(register_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/items")
        .set_json(json!({ "name": "AK-47 | Redline", "price": 12.5, "id": "ignored" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Document = test::read_body_json(resp).await;
    assert_eq!(created.fields["name"], "AK-47 | Redline");
    assert!(!created.fields.contains_key("id"));
    let uri = format!("/api/items/{}", created.id);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let fetched: Document = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "price": 14 }))
        .to_request();
    let updated: Document = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.fields["name"], "AK-47 | Redline");
    assert_eq!(updated.fields["price"], 14);

    let req = test::TestRequest::get().uri("/api/items").to_request();
    let all: Vec<Document> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all, vec![updated]);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "message": "Item deleted" }));

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Item not found" }));
}

#[actix_web::test]
async fn test_users_are_a_separate_collection() {
    let stores = AppStores::in_memory();
    let app = test::init_service(
        App::new()
            .configure(|cfg| stores.register(cfg))
            .configure(register_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "username": "s1mple", "balance": 100 }))
        .to_request();
    let user: Document = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get().uri("/api/items").to_request();
    let items: Vec<Document> = test::call_and_read_body_json(&app, req).await;
    assert!(items.is_empty());

    // a user id is unknown to the item collection
    let req = test::TestRequest::get()
        .uri(&format!("/api/items/{}", user.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", user.id))
        .to_request();
    let fetched: Document = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched.fields["username"], "s1mple");
}

#[actix_web::test]
async fn test_document_failure_classes() {
    let stores = AppStores::in_memory();
    let app = test::init_service(
        App::new()
            .configure(|cfg| stores.register(cfg))
            .configure(register_routes),
    )
    .await;

    // body must be a JSON object
    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!(["not", "an", "object"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].is_string());

    let req = test::TestRequest::get().uri("/api/users/not-an-id").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let req = test::TestRequest::put()
        .uri("/api/users/not-an-id")
        .set_json(json!({ "balance": 5 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete().uri("/api/users/not-an-id").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // unknown ids: update answers null, delete still confirms
    let missing = format!("/api/users/{}", Uuid::new_v4());
    let req = test::TestRequest::put().uri(&missing).set_json(json!({ "balance": 5 })).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, Value::Null);

    let req = test::TestRequest::delete().uri(&missing).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "message": "User deleted" }));
}
