use actix_web::{http::StatusCode, web, web::ServiceConfig};
use neonbite_common::Price;
use neonbite_engine::{db_types::Product, traits::CatalogApiError, CatalogApi};
use serde_json::json;

use super::{helpers::get_request, mocks::MockStorefront};
use crate::routes::ListProductsRoute;

#[actix_web::test]
async fn list_products() {
    let _ = env_logger::try_init();
    let (status, body) = get_request("/products", configure).await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body,
        json!([
            {
                "id": 1,
                "name": "Neon Smash Burger",
                "price": 9.99,
                "description": "Double-stacked smash patties.",
                "image_url": "/img/neon-smash-burger.jpg"
            },
            {
                "id": 2,
                "name": "Glitch Fries",
                "price": 3.5,
                "description": "Crinkle-cut fries.",
                "image_url": "/img/glitch-fries.jpg"
            }
        ])
    );
}

#[actix_web::test]
async fn list_products_store_failure_is_a_500() {
    let _ = env_logger::try_init();
    let (status, body) = get_request("/products", configure_broken).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("backend"));
}

fn catalogue() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Neon Smash Burger".to_string(),
            price: Price::from_cents(999),
            description: "Double-stacked smash patties.".to_string(),
            image_url: "/img/neon-smash-burger.jpg".to_string(),
        },
        Product {
            id: 2,
            name: "Glitch Fries".to_string(),
            price: Price::from_cents(350),
            description: "Crinkle-cut fries.".to_string(),
            image_url: "/img/glitch-fries.jpg".to_string(),
        },
    ]
}

fn configure(cfg: &mut ServiceConfig) {
    let mut store = MockStorefront::new();
    store.expect_fetch_products().returning(|| Ok(catalogue()));
    let api = CatalogApi::new(store);
    cfg.service(ListProductsRoute::<MockStorefront>::new()).app_data(web::Data::new(api));
}

fn configure_broken(cfg: &mut ServiceConfig) {
    let mut store = MockStorefront::new();
    store.expect_fetch_products().returning(|| Err(CatalogApiError::DatabaseError("disk on fire".to_string())));
    let api = CatalogApi::new(store);
    cfg.service(ListProductsRoute::<MockStorefront>::new()).app_data(web::Data::new(api));
}
