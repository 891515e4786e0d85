use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewReview, Review},
    traits::ReviewApiError,
};

pub async fn insert_review(review: NewReview, conn: &mut SqliteConnection) -> Result<Review, ReviewApiError> {
    let review: Review =
        sqlx::query_as("INSERT INTO reviews (user_name, rating, comment) VALUES ($1, $2, $3) RETURNING *")
            .bind(review.user_name)
            .bind(review.rating)
            .bind(review.comment)
            .fetch_one(conn)
            .await?;
    debug!("📝️ Review inserted with id {}", review.id);
    Ok(review)
}

/// Returns all reviews, newest first.
pub async fn fetch_reviews(conn: &mut SqliteConnection) -> Result<Vec<Review>, ReviewApiError> {
    let reviews = sqlx::query_as("SELECT * FROM reviews ORDER BY created_at DESC, id DESC").fetch_all(conn).await?;
    Ok(reviews)
}
