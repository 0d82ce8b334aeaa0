use chrono::{DateTime, Utc};

use super::errors::DomainError;
use super::product::Product;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartLine {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
}

/// A line item as captured at order time. Name and price are copies, not
/// references to the live product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_name: String,
    pub quantity: i32,
    pub price_per_item: f64,
}

/// A fully validated and priced order, ready to be persisted as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder {
    pub page_id: i32,
    pub customer: CustomerDetails,
    pub total_price: f64,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub price_per_item: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub page_id: i32,
    pub items: Vec<OrderItem>,
}

/// Validate a cart against the catalog of `page_id` and price it.
///
/// Lines are checked in submission order and the first product that is
/// missing or listed on another page rejects the whole cart. `lookup`
/// resolves a product id at the moment of the call, so the returned
/// items hold the name and price current at that instant. Quantities are
/// taken verbatim and an empty cart prices to zero.
pub fn price_cart<F>(
    page_id: i32,
    customer: CustomerDetails,
    lines: &[CartLine],
    mut lookup: F,
) -> Result<PricedOrder, DomainError>
where
    F: FnMut(i32) -> Result<Option<Product>, DomainError>,
{
    let mut total_price = 0.0;
    let mut items = Vec::with_capacity(lines.len());

    for line in lines {
        let product = match lookup(line.product_id)? {
            Some(p) if p.page_id == page_id => p,
            _ => {
                return Err(DomainError::InvalidInput(format!(
                    "Product with ID {} is invalid for this page.",
                    line.product_id
                )))
            }
        };

        total_price += product.price * f64::from(line.quantity);
        items.push(NewOrderItem {
            product_name: product.name,
            quantity: line.quantity,
            price_per_item: product.price,
        });
    }

    Ok(PricedOrder {
        page_id,
        customer,
        total_price,
        items,
    })
}
