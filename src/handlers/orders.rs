use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::AppState;
use crate::auth::AuthenticatedUser;
use crate::domain::order::{CartLine, CustomerDetails, Order, OrderItem};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub price_per_item: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub total_price: f64,
    /// RFC 3339 timestamp assigned by the server.
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            id: item.id,
            product_name: item.product_name,
            quantity: item.quantity,
            price_per_item: item.price_per_item,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id,
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            total_price: order.total_price,
            created_at: order.created_at.to_rfc3339(),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders/{page_slug}
///
/// Public checkout. The cart is validated against the page's catalog and
/// priced server-side; order and items are stored in one transaction.
#[utoipa::path(
    post,
    path = "/orders/{page_slug}",
    params(("page_slug" = String, Path, description = "Slug of the page being ordered from")),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Cart references a product outside this page"),
        (status = 404, description = "Unknown slug"),
    ),
    tag = "orders"
)]
pub async fn place_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let body = body.into_inner();
    let customer = CustomerDetails {
        name: body.customer_name,
        phone: body.customer_phone,
    };
    let lines: Vec<CartLine> = body
        .items
        .iter()
        .map(|i| CartLine {
            product_id: i.product_id,
            quantity: i.quantity,
        })
        .collect();

    let order =
        web::block(move || state.orders.place_order(&slug, customer, &lines)).await??;
    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/my-orders
///
/// Orders received by the caller's page, newest first.
#[utoipa::path(
    get,
    path = "/orders/my-orders",
    responses(
        (status = 200, description = "Orders, newest first", body = [OrderResponse]),
        (status = 404, description = "Caller has no page"),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn list_my_orders(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || state.orders.list_for_owner(user.0.id)).await??;
    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
