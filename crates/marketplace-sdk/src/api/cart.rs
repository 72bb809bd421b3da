//! Shopping cart

use super::segment;
use crate::client::MarketplaceClient;
use crate::error::Result;
use crate::types::{AddToCartRequest, Cart, UpdateCartItemRequest};

impl MarketplaceClient {
    pub async fn get_cart(&self) -> Result<Cart> {
        self.get("/api/cart").await
    }

    pub async fn add_to_cart(&self, request: &AddToCartRequest) -> Result<Cart> {
        self.post("/api/cart/items", request).await
    }

    pub async fn update_cart_item(&self, item_id: &str, quantity: u32) -> Result<Cart> {
        let path = format!("/api/cart/items/{}", segment(item_id));
        self.patch(&path, &UpdateCartItemRequest { quantity }).await
    }

    pub async fn remove_cart_item(&self, item_id: &str) -> Result<Cart> {
        self.delete(&format!("/api/cart/items/{}", segment(item_id))).await
    }
}
