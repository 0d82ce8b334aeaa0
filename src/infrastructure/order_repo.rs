use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{price_cart, CartLine, CustomerDetails, Order, OrderItem};
use crate::domain::ports::OrderRepository;
use crate::domain::product::Product;
use crate::schema::{order_items, orders, products};

use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow, ProductRow};

fn into_order(row: OrderRow, items: Vec<OrderItemRow>) -> Order {
    Order {
        id: row.id,
        customer_name: row.customer_name,
        customer_phone: row.customer_phone,
        total_price: row.total_price,
        created_at: row.created_at,
        page_id: row.page_id,
        items: items.into_iter().map(OrderItem::from).collect(),
    }
}

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn place(
        &self,
        page_id: i32,
        customer: CustomerDetails,
        lines: &[CartLine],
    ) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Resolve and price every line; the first bad one aborts.
            let priced = price_cart(page_id, customer, lines, |product_id| {
                let row = products::table
                    .find(product_id)
                    .select(ProductRow::as_select())
                    .first(conn)
                    .optional()?;
                Ok(row.map(Product::from))
            })?;

            // 2. Insert the order header
            let order = diesel::insert_into(orders::table)
                .values(&NewOrderRow::from(&priced))
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            // 3. Insert the item snapshots
            let new_items: Vec<NewOrderItemRow> = priced
                .items
                .into_iter()
                .map(|item| NewOrderItemRow {
                    product_name: item.product_name,
                    quantity: item.quantity,
                    price_per_item: item.price_per_item,
                    order_id: order.id,
                })
                .collect();
            let items = if new_items.is_empty() {
                Vec::new()
            } else {
                diesel::insert_into(order_items::table)
                    .values(&new_items)
                    .returning(OrderItemRow::as_returning())
                    .get_results(conn)?
            };

            Ok(into_order(order, items))
        })
    }

    fn list_for_page(&self, page_id: i32) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let rows = orders::table
                .filter(orders::page_id.eq(page_id))
                .order(orders::id.desc())
                .select(OrderRow::as_select())
                .load(conn)?;

            let items = OrderItemRow::belonging_to(&rows)
                .order(order_items::id.asc())
                .select(OrderItemRow::as_select())
                .load(conn)?
                .grouped_by(&rows);

            Ok(rows
                .into_iter()
                .zip(items)
                .map(|(order, items)| into_order(order, items))
                .collect())
        })
    }
}
