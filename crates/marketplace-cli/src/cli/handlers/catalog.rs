//! Catalog browsing handlers

use crate::cli::commands::ProductFilters;
use crate::error::Result;
use crate::output::json_output;
use crate::output::listing::{render_product, render_products};
use marketplace_sdk::{MarketplaceClient, ProductQuery};

impl From<ProductFilters> for ProductQuery {
    fn from(filters: ProductFilters) -> Self {
        ProductQuery {
            search: filters.search,
            category: filters.category,
            page: filters.page,
            ..Default::default()
        }
    }
}

pub async fn handle_products(
    client: &MarketplaceClient,
    filters: ProductFilters,
    json: bool,
) -> Result<()> {
    let page = client.list_products(&filters.into()).await?;
    if json {
        return json_output(&page);
    }
    println!("{}", render_products(&page));
    Ok(())
}

pub async fn handle_product(client: &MarketplaceClient, id: &str, json: bool) -> Result<()> {
    let product = client.get_product(id).await?;
    if json {
        return json_output(&product);
    }
    println!("{}", render_product(&product));
    Ok(())
}
