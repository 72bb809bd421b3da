//! Product catalog

use super::segment;
use crate::client::MarketplaceClient;
use crate::error::Result;
use crate::types::{Paginated, Product, ProductQuery};

impl MarketplaceClient {
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Paginated<Product>> {
        let query = query.to_query_string();
        let path = if query.is_empty() {
            "/api/products".to_string()
        } else {
            format!("/api/products?{query}")
        };
        self.get(&path).await
    }

    pub async fn get_product(&self, product_id: &str) -> Result<Product> {
        self.get(&format!("/api/products/{}", segment(product_id))).await
    }
}
