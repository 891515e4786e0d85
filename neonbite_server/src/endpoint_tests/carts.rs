use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use neonbite_common::Price;
use neonbite_engine::{
    db_types::{CartSnapshot, LineItem},
    CartApi,
};
use serde_json::json;

use super::{
    helpers::{get_request, post_request},
    mocks::MockStorefront,
};
use crate::routes::{ListCartsRoute, SaveCartRoute};

#[actix_web::test]
async fn save_cart() {
    let _ = env_logger::try_init();
    let payload = json!({"items": [{"name": "Neon Smash Burger", "price": 9.99}], "user_id": 3});
    let (status, body) = post_request("/cart", &payload, configure).await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"message": "Cart saved", "carritoId": 7}));
}

#[actix_web::test]
async fn an_empty_cart_is_rejected() {
    let _ = env_logger::try_init();
    let payload = json!({"items": []});
    let (status, body) = post_request("/cart", &payload, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"error": "The cart is empty"}));
}

#[actix_web::test]
async fn absent_items_get_the_same_answer_as_an_empty_cart() {
    let _ = env_logger::try_init();
    let payload = json!({"user_id": 3});
    let (status, body) = post_request("/cart", &payload, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"error": "The cart is empty"}));
}

#[actix_web::test]
async fn list_carts_newest_first() {
    let _ = env_logger::try_init();
    let (status, body) = get_request("/cart", configure).await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body,
        json!([{
            "id": 7,
            "user_id": null,
            "items": [{"name": "Glitch Fries", "price": 3.5}],
            "created_at": "2024-06-01T12:00:00Z"
        }])
    );
}

fn snapshots() -> Vec<CartSnapshot> {
    vec![CartSnapshot {
        id: 7,
        user_id: None,
        items: vec![LineItem::new("Glitch Fries", Price::from_cents(350))],
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    }]
}

fn configure(cfg: &mut ServiceConfig) {
    let mut store = MockStorefront::new();
    store.expect_insert_cart_snapshot().returning(|_| Ok(7));
    store.expect_fetch_cart_snapshots().returning(|| Ok(snapshots()));
    let api = CartApi::new(store);
    cfg.service(SaveCartRoute::<MockStorefront>::new())
        .service(ListCartsRoute::<MockStorefront>::new())
        .app_data(web::Data::new(api));
}
