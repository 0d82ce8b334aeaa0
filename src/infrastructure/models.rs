use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::order::{OrderItem, PricedOrder};
use crate::domain::page::{NewPage, Page};
use crate::domain::product::{NewProduct, Product};
use crate::domain::user::{NewUser, User};
use crate::schema::{order_items, orders, pages, products, users};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
    pub email: String,
    pub hashed_password: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub email: String,
    pub hashed_password: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = pages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PageRow {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = pages)]
pub struct NewPageRow {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub page_id: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub page_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub page_id: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub customer_name: String,
    pub customer_phone: String,
    pub total_price: f64,
    pub page_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub price_per_item: f64,
    pub order_id: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub product_name: String,
    pub quantity: i32,
    pub price_per_item: f64,
    pub order_id: i32,
}

// ── Row <-> domain conversions ───────────────────────────────────────────────

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.hashed_password,
        }
    }
}

impl From<NewUser> for NewUserRow {
    fn from(user: NewUser) -> Self {
        NewUserRow {
            email: user.email,
            hashed_password: user.password_hash,
        }
    }
}

impl From<PageRow> for Page {
    fn from(row: PageRow) -> Self {
        Page {
            id: row.id,
            slug: row.slug,
            title: row.title,
            description: row.description,
            owner_id: row.owner_id,
        }
    }
}

impl From<NewPage> for NewPageRow {
    fn from(page: NewPage) -> Self {
        NewPageRow {
            slug: page.slug,
            title: page.title,
            description: page.description,
            owner_id: page.owner_id,
        }
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            page_id: row.page_id,
        }
    }
}

impl NewProductRow {
    pub fn for_page(page_id: i32, product: NewProduct) -> Self {
        NewProductRow {
            name: product.name,
            description: product.description,
            price: product.price,
            page_id,
        }
    }
}

impl From<&PricedOrder> for NewOrderRow {
    fn from(order: &PricedOrder) -> Self {
        NewOrderRow {
            customer_name: order.customer.name.clone(),
            customer_phone: order.customer.phone.clone(),
            total_price: order.total_price,
            page_id: order.page_id,
        }
    }
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            id: row.id,
            product_name: row.product_name,
            quantity: row.quantity,
            price_per_item: row.price_per_item,
        }
    }
}
