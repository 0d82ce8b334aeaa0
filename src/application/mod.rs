pub mod auth_service;
pub mod catalog_service;
pub mod order_service;
pub mod page_service;

use std::sync::Arc;

use crate::auth::TokenService;
use crate::domain::ports::{OrderRepository, PageRepository, ProductRepository, UserRepository};

pub use auth_service::AuthService;
pub use catalog_service::CatalogService;
pub use order_service::OrderService;
pub use page_service::{PageService, PageWithProducts};

/// Everything a request handler needs, shared across workers.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub pages: PageService,
    pub catalog: CatalogService,
    pub orders: OrderService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        pages: Arc<dyn PageRepository>,
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
        tokens: TokenService,
    ) -> Self {
        Self {
            auth: AuthService::new(users, tokens),
            pages: PageService::new(pages.clone(), products.clone()),
            catalog: CatalogService::new(pages.clone(), products),
            orders: OrderService::new(pages, orders),
        }
    }
}
