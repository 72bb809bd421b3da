//! Orders and checkout

use super::segment;
use crate::client::MarketplaceClient;
use crate::error::Result;
use crate::types::{CheckoutRequest, Order};

impl MarketplaceClient {
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        self.get("/api/orders").await
    }

    pub async fn get_order(&self, order_id: &str) -> Result<Order> {
        self.get(&format!("/api/orders/{}", segment(order_id))).await
    }

    /// Turn the current cart into an order
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<Order> {
        self.post("/api/orders", request).await
    }
}
