use super::segment;
use crate::client::MarketplaceClient;
use crate::error::Result;
use crate::types::Favorite;
use serde_json::{json, Value};

impl MarketplaceClient {
    pub async fn list_favorites(&self) -> Result<Vec<Favorite>> {
        self.get("/api/favorites").await
    }

    pub async fn add_favorite(&self, product_id: &str) -> Result<Favorite> {
        self.post("/api/favorites", &json!({ "productId": product_id }))
            .await
    }

    pub async fn remove_favorite(&self, product_id: &str) -> Result<()> {
        self.delete::<Value>(&format!("/api/favorites/{}", segment(product_id)))
            .await
            .map(|_| ())
    }
}
