//! Cart, order and favorites handlers

use crate::error::Result;
use crate::output::json_output;
use crate::output::listing::{render_cart, render_favorites, render_order, render_orders};
use marketplace_sdk::MarketplaceClient;

pub async fn handle_cart(client: &MarketplaceClient, json: bool) -> Result<()> {
    let cart = client.get_cart().await?;
    if json {
        return json_output(&cart);
    }
    println!("{}", render_cart(&cart));
    Ok(())
}

pub async fn handle_orders(client: &MarketplaceClient, json: bool) -> Result<()> {
    let orders = client.list_orders().await?;
    if json {
        return json_output(&orders);
    }
    println!("{}", render_orders(&orders));
    Ok(())
}

pub async fn handle_order(client: &MarketplaceClient, id: &str, json: bool) -> Result<()> {
    let order = client.get_order(id).await?;
    if json {
        return json_output(&order);
    }
    println!("{}", render_order(&order));
    Ok(())
}

pub async fn handle_favorites(client: &MarketplaceClient, json: bool) -> Result<()> {
    let favorites = client.list_favorites().await?;
    if json {
        return json_output(&favorites);
    }
    println!("{}", render_favorites(&favorites));
    Ok(())
}
