//! Product reviews

use super::segment;
use crate::client::MarketplaceClient;
use crate::error::Result;
use crate::types::{CreateReviewRequest, Review};

impl MarketplaceClient {
    pub async fn list_reviews(&self, product_id: &str) -> Result<Vec<Review>> {
        self.get(&format!("/api/products/{}/reviews", segment(product_id)))
            .await
    }

    pub async fn create_review(
        &self,
        product_id: &str,
        request: &CreateReviewRequest,
    ) -> Result<Review> {
        let path = format!("/api/products/{}/reviews", segment(product_id));
        self.post(&path, request).await
    }
}
