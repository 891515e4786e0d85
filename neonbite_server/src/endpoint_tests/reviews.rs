use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use neonbite_engine::{db_types::Review, ReviewApi};
use serde_json::json;

use super::{
    helpers::{get_request, post_request},
    mocks::MockReviewStore,
};
use crate::routes::{ListReviewsRoute, SubmitReviewRoute};

#[actix_web::test]
async fn submit_review_returns_the_stored_row() {
    let _ = env_logger::try_init();
    let payload = json!({"user_name": "Neo", "rating": 5, "comment": "The burger bends spoons."});
    let (status, body) = post_request("/reviews", &payload, configure).await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body,
        json!({
            "id": 11,
            "user_name": "Neo",
            "rating": 5,
            "comment": "The burger bends spoons.",
            "created_at": "2024-06-01T12:00:00Z"
        })
    );
}

#[actix_web::test]
async fn a_missing_field_is_a_400() {
    let _ = env_logger::try_init();
    let payload = json!({"user_name": "Neo", "comment": "no rating"});
    let (status, body) = post_request("/reviews", &payload, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"error": "Required review fields are missing"}));
}

#[actix_web::test]
async fn a_blank_comment_is_a_400() {
    let _ = env_logger::try_init();
    let payload = json!({"user_name": "Neo", "rating": 5, "comment": "   "});
    let (status, body) = post_request("/reviews", &payload, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"error": "Required review fields are missing"}));
}

#[actix_web::test]
async fn list_reviews() {
    let _ = env_logger::try_init();
    let (status, body) = get_request("/reviews", configure).await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body[0]["user_name"], json!("Neo"));
}

fn stored_review() -> Review {
    Review {
        id: 11,
        user_name: "Neo".to_string(),
        rating: 5,
        comment: "The burger bends spoons.".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    }
}

fn configure(cfg: &mut ServiceConfig) {
    let mut store = MockReviewStore::new();
    store.expect_insert_review().returning(|_| Ok(stored_review()));
    store.expect_fetch_reviews().returning(|| Ok(vec![stored_review()]));
    let api = ReviewApi::new(store);
    cfg.service(SubmitReviewRoute::<MockReviewStore>::new())
        .service(ListReviewsRoute::<MockReviewStore>::new())
        .app_data(web::Data::new(api));
}
