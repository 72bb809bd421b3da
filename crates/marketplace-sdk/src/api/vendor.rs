//! Vendor console endpoints

use super::segment;
use crate::client::{FormPayload, MarketplaceClient, RequestOptions};
use crate::error::Result;
use crate::types::{Paginated, Product, ProductImage};

impl MarketplaceClient {
    /// Products owned by the logged-in vendor
    pub async fn list_vendor_products(&self) -> Result<Paginated<Product>> {
        self.get("/api/vendor/products").await
    }

    /// Upload an image for one of the vendor's products
    ///
    /// Sent as multipart form data; `alt` becomes a text field next to the
    /// file part.
    pub async fn upload_product_image(
        &self,
        product_id: &str,
        file_name: &str,
        mime: &str,
        data: Vec<u8>,
        alt: Option<&str>,
    ) -> Result<ProductImage> {
        let mut form = FormPayload::new().file("image", file_name, Some(mime), data);
        if let Some(alt) = alt {
            form = form.text("alt", alt);
        }

        let path = format!("/api/vendor/products/{}/images", segment(product_id));
        self.request(&path, RequestOptions::post().form(form)).await
    }
}
