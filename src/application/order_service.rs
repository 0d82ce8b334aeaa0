use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::order::{CartLine, CustomerDetails, Order};
use crate::domain::ports::{OrderRepository, PageRepository};

#[derive(Clone)]
pub struct OrderService {
    pages: Arc<dyn PageRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(pages: Arc<dyn PageRepository>, orders: Arc<dyn OrderRepository>) -> Self {
        Self { pages, orders }
    }

    /// Place an order from an anonymous customer on the page at `slug`.
    pub fn place_order(
        &self,
        slug: &str,
        customer: CustomerDetails,
        lines: &[CartLine],
    ) -> Result<Order, DomainError> {
        let page = self.pages.find_by_slug(slug)?.ok_or_else(|| {
            DomainError::NotFound(
                "The page you are trying to order from does not exist.".to_string(),
            )
        })?;

        match self.orders.place(page.id, customer, lines) {
            Ok(order) => {
                log::info!(
                    "Placed order id={} on page={} items={} total={}",
                    order.id,
                    page.slug,
                    order.items.len(),
                    order.total_price
                );
                Ok(order)
            }
            Err(e) => {
                log::warn!("Rejected order on page={}: {}", page.slug, e);
                Err(e)
            }
        }
    }

    /// Orders received by the caller's page, newest first.
    pub fn list_for_owner(&self, owner_id: i32) -> Result<Vec<Order>, DomainError> {
        let page = self.pages.find_by_owner(owner_id)?.ok_or_else(|| {
            DomainError::NotFound("You do not have a page yet. No orders to show.".to_string())
        })?;
        self.orders.list_for_page(page.id)
    }
}
