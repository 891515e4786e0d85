use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use neonbite_common::Price;
use neonbite_engine::{
    db_types::{LineItem, Order, ORDER_STATUS_COMPLETED},
    traits::{CartApiError, OrderApiError},
    OrderFlowApi,
};
use serde_json::json;

use super::{helpers::post_request, mocks::MockStorefront};
use crate::{mailer::SmtpMailer, routes::CheckoutRoute};

#[actix_web::test]
async fn checkout_places_an_order() {
    let _ = env_logger::try_init();
    let payload = json!({
        "items": [{"name": "Burger", "price": 9.99}, {"name": "Fries", "price": 3.5}],
        "carritoId": 7,
        "user_email": "a@b.com"
    });
    let (status, body) = post_request("/orders", &payload, configure).await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"success": true, "message": "Order received", "orderId": 42}));
}

#[actix_web::test]
async fn absent_items_are_invalid() {
    let _ = env_logger::try_init();
    let payload = json!({"carritoId": 7});
    let (status, body) = post_request("/orders", &payload, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"error": "invalid items"}));
}

#[actix_web::test]
async fn non_array_items_are_invalid() {
    let _ = env_logger::try_init();
    let payload = json!({"items": "all of them"});
    let (status, body) = post_request("/orders", &payload, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"error": "invalid items"}));
}

#[actix_web::test]
async fn an_empty_item_list_is_invalid() {
    let _ = env_logger::try_init();
    let payload = json!({"items": []});
    let (status, body) = post_request("/orders", &payload, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"error": "invalid items"}));
}

#[actix_web::test]
async fn a_failed_order_insert_is_a_500() {
    let _ = env_logger::try_init();
    let payload = json!({"items": [{"name": "Burger", "price": 9.99}]});
    let (status, _body) = post_request("/orders", &payload, configure_broken_insert).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn a_failed_cart_cleanup_is_still_a_200() {
    let _ = env_logger::try_init();
    let payload = json!({
        "items": [{"name": "Burger", "price": 9.99}],
        "carritoId": 7
    });
    let (status, body) = post_request("/orders", &payload, configure_broken_cleanup).await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], json!(true));
}

fn placed_order() -> Order {
    Order {
        id: 42,
        items: vec![
            LineItem::new("Burger", Price::from_cents(999)),
            LineItem::new("Fries", Price::from_cents(350)),
        ],
        total: Price::from_cents(1349),
        status: ORDER_STATUS_COMPLETED.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    }
}

fn configure(cfg: &mut ServiceConfig) {
    let mut store = MockStorefront::new();
    store.expect_insert_order().returning(|_, _, _| Ok(placed_order()));
    store.expect_delete_cart_snapshot().returning(|_| Ok(true));
    store.expect_advance_fulfilment().returning(|_, _| Ok(()));
    let api = OrderFlowApi::new(store, SmtpMailer::unconfigured());
    cfg.service(CheckoutRoute::<MockStorefront>::new()).app_data(web::Data::new(api));
}

fn configure_broken_insert(cfg: &mut ServiceConfig) {
    let mut store = MockStorefront::new();
    store.expect_insert_order().returning(|_, _, _| Err(OrderApiError::DatabaseError("disk on fire".to_string())));
    let api = OrderFlowApi::new(store, SmtpMailer::unconfigured());
    cfg.service(CheckoutRoute::<MockStorefront>::new()).app_data(web::Data::new(api));
}

fn configure_broken_cleanup(cfg: &mut ServiceConfig) {
    let mut store = MockStorefront::new();
    store.expect_insert_order().returning(|_, _, _| Ok(placed_order()));
    store.expect_delete_cart_snapshot().returning(|_| Err(CartApiError::DatabaseError("locked".to_string())));
    store.expect_advance_fulfilment().returning(|_, _| Ok(()));
    let api = OrderFlowApi::new(store, SmtpMailer::unconfigured());
    cfg.service(CheckoutRoute::<MockStorefront>::new()).app_data(web::Data::new(api));
}
