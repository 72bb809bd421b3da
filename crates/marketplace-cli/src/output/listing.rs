//! Plain-text rendering of marketplace resources

use console::style;
use marketplace_sdk::{AuthUser, Cart, Favorite, Order, Paginated, Product};
use std::fmt::Write;

fn money(amount: f64, currency: Option<&str>) -> String {
    format!("{amount:.2} {}", currency.unwrap_or("USD"))
}

/// One line per product, followed by the page position
pub fn render_products(page: &Paginated<Product>) -> String {
    if page.items.is_empty() {
        return "No products found".to_string();
    }

    let mut out = String::new();
    for product in &page.items {
        let _ = writeln!(
            out,
            "{}  {}  {}",
            style(&product.id).dim(),
            style(&product.name).bold(),
            money(product.price, product.currency.as_deref())
        );
    }
    let _ = write!(
        out,
        "Page {} ({} of {} products)",
        page.page,
        page.items.len(),
        page.total
    );
    out
}

pub fn render_product(product: &Product) -> String {
    let mut out = format!(
        "{}\n  ID:     {}\n  Price:  {}",
        style(&product.name).bold(),
        product.id,
        money(product.price, product.currency.as_deref())
    );
    if let Some(stock) = product.stock {
        let _ = write!(out, "\n  Stock:  {stock}");
    }
    if let Some(vendor) = &product.vendor_id {
        let _ = write!(out, "\n  Vendor: {vendor}");
    }
    if let Some(description) = &product.description {
        let _ = write!(out, "\n\n{description}");
    }
    out
}

pub fn render_cart(cart: &Cart) -> String {
    if cart.items.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut out = String::new();
    for item in &cart.items {
        let name = item
            .product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or(item.product_id.as_str());
        let _ = writeln!(out, "{:>3} x {}", item.quantity, name);
    }
    let _ = write!(out, "Total: {}", style(money(cart.total, None)).bold());
    out
}

pub fn render_orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet".to_string();
    }

    orders
        .iter()
        .map(|order| {
            format!(
                "{}  {:<10}  {}  {}",
                style(&order.id).dim(),
                format!("{:?}", order.status).to_lowercase(),
                money(order.total, None),
                order.created_at.as_deref().unwrap_or("-")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_order(order: &Order) -> String {
    let mut out = format!(
        "Order {}\n  Status: {}\n  Total:  {}",
        style(&order.id).bold(),
        format!("{:?}", order.status).to_lowercase(),
        money(order.total, None)
    );
    for item in &order.items {
        let name = item.product_name.as_deref().unwrap_or(&item.product_id);
        let _ = write!(
            out,
            "\n  {:>3} x {} @ {}",
            item.quantity,
            name,
            money(item.unit_price, None)
        );
    }
    out
}

pub fn render_favorites(favorites: &[Favorite]) -> String {
    if favorites.is_empty() {
        return "No favorites yet".to_string();
    }

    favorites
        .iter()
        .map(|favorite| match &favorite.product {
            Some(product) => format!("{}  {}", style(&favorite.product_id).dim(), product.name),
            None => favorite.product_id.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_user(user: &AuthUser) -> String {
    match &user.name {
        Some(name) => format!("{name} <{}> ({})", user.email, user.role),
        None => format!("{} ({})", user.email, user.role),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(id: &str, name: &str, price: f64) -> Product {
        serde_json::from_value(json!({ "id": id, "name": name, "price": price })).unwrap()
    }

    #[test]
    fn test_render_products() {
        let page = Paginated {
            items: vec![product("p-1", "Desk lamp", 24.5), product("p-2", "Chair", 80.0)],
            total: 12,
            page: 2,
            page_size: 2,
        };
        let rendered = render_products(&page);
        assert!(rendered.contains("Desk lamp"));
        assert!(rendered.contains("24.50 USD"));
        assert!(rendered.ends_with("Page 2 (2 of 12 products)"));

        let empty = Paginated::<Product> {
            items: vec![],
            total: 0,
            page: 1,
            page_size: 20,
        };
        assert_eq!(render_products(&empty), "No products found");
    }

    #[test]
    fn test_render_cart_prefers_product_name() {
        let cart: Cart = serde_json::from_value(json!({
            "items": [
                { "id": "c-1", "productId": "p-1", "quantity": 2,
                  "product": { "id": "p-1", "name": "Desk lamp", "price": 24.5 } },
                { "id": "c-2", "productId": "p-9", "quantity": 1 }
            ],
            "total": 49.0
        }))
        .unwrap();

        let rendered = render_cart(&cart);
        assert!(rendered.contains("2 x Desk lamp"));
        assert!(rendered.contains("1 x p-9"));
        assert!(rendered.contains("49.00 USD"));
    }

    #[test]
    fn test_render_order() {
        let order: Order = serde_json::from_value(json!({
            "id": "o-7",
            "status": "shipped",
            "total": 30.0,
            "items": [{ "productId": "p-1", "quantity": 3, "unitPrice": 10.0, "productName": "Mug" }]
        }))
        .unwrap();

        let rendered = render_order(&order);
        assert!(rendered.contains("Status: shipped"));
        assert!(rendered.contains("3 x Mug @ 10.00 USD"));
        assert!(render_orders(&[order]).contains("shipped"));
        assert_eq!(render_orders(&[]), "No orders yet");
    }

    #[test]
    fn test_render_user() {
        let user: AuthUser = serde_json::from_value(json!({
            "id": "u-1", "email": "vera@example.com", "name": "Vera", "role": "vendor"
        }))
        .unwrap();
        assert_eq!(render_user(&user), "Vera <vera@example.com> (vendor)");
    }
}
