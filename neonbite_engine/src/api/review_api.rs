use log::debug;

use crate::{
    db_types::{NewReview, Review},
    traits::{ReviewApiError, ReviewManagement},
};

/// The public review board.
#[derive(Debug, Clone)]
pub struct ReviewApi<B> {
    db: B,
}

impl<B> ReviewApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> ReviewApi<B>
where B: ReviewManagement
{
    /// Stores a review. Blank names or comments, and ratings outside 1..=5, are rejected before anything is
    /// written.
    pub async fn submit(&self, review: NewReview) -> Result<Review, ReviewApiError> {
        if review.user_name.trim().is_empty() || review.comment.trim().is_empty() {
            return Err(ReviewApiError::MissingFields);
        }
        if !(1..=5).contains(&review.rating) {
            return Err(ReviewApiError::MissingFields);
        }
        let review = self.db.insert_review(review).await?;
        debug!("📝️ Review #{} stored", review.id);
        Ok(review)
    }

    /// Returns all reviews, newest first.
    pub async fn reviews(&self) -> Result<Vec<Review>, ReviewApiError> {
        self.db.fetch_reviews().await
    }
}
