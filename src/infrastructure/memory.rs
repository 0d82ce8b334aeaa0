//! Process-local implementation of every repository port, used by the
//! service and HTTP tests. One mutex guards all tables, so each call is
//! atomic the way a database transaction would be.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::domain::errors::DomainError;
use crate::domain::order::{price_cart, CartLine, CustomerDetails, Order, OrderItem};
use crate::domain::page::{NewPage, Page};
use crate::domain::ports::{OrderRepository, PageRepository, ProductRepository, UserRepository};
use crate::domain::product::{NewProduct, Product};
use crate::domain::user::{NewUser, User};

#[derive(Default)]
struct Tables {
    next_id: i32,
    users: Vec<User>,
    pages: Vec<Page>,
    products: Vec<Product>,
    orders: Vec<Order>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn delete_page_cascade(&mut self, page_id: i32) {
        self.orders.retain(|o| o.page_id != page_id);
        self.products.retain(|p| p.page_id != page_id);
        self.pages.retain(|p| p.id != page_id);
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn order_item_count(&self) -> usize {
        self.tables().orders.iter().map(|o| o.items.len()).sum()
    }
}

impl UserRepository for InMemoryStore {
    fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict("Email already registered".to_string()));
        }
        let user = User {
            id: t.next_id(),
            email: user.email,
            password_hash: user.password_hash,
        };
        t.users.push(user.clone());
        Ok(user)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    fn delete_cascade(&self, id: i32) -> Result<(), DomainError> {
        let mut t = self.tables();
        if !t.users.iter().any(|u| u.id == id) {
            return Err(DomainError::NotFound("User not found".to_string()));
        }
        if let Some(page_id) = t.pages.iter().find(|p| p.owner_id == id).map(|p| p.id) {
            t.delete_page_cascade(page_id);
        }
        t.users.retain(|u| u.id != id);
        Ok(())
    }
}

impl PageRepository for InMemoryStore {
    fn create(&self, page: NewPage) -> Result<Page, DomainError> {
        let mut t = self.tables();
        if t
            .pages
            .iter()
            .any(|p| p.slug == page.slug || p.owner_id == page.owner_id)
        {
            return Err(DomainError::Conflict("Page already exists".to_string()));
        }
        let page = Page {
            id: t.next_id(),
            slug: page.slug,
            title: page.title,
            description: page.description,
            owner_id: page.owner_id,
        };
        t.pages.push(page.clone());
        Ok(page)
    }

    fn find_by_owner(&self, owner_id: i32) -> Result<Option<Page>, DomainError> {
        Ok(self
            .tables()
            .pages
            .iter()
            .find(|p| p.owner_id == owner_id)
            .cloned())
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, DomainError> {
        Ok(self.tables().pages.iter().find(|p| p.slug == slug).cloned())
    }

    fn update(&self, page: &Page) -> Result<Page, DomainError> {
        let mut t = self.tables();
        let stored = t
            .pages
            .iter_mut()
            .find(|p| p.id == page.id)
            .ok_or_else(|| DomainError::NotFound("Page not found".to_string()))?;
        stored.title = page.title.clone();
        stored.description = page.description.clone();
        Ok(stored.clone())
    }

    fn delete_cascade(&self, id: i32) -> Result<(), DomainError> {
        let mut t = self.tables();
        if !t.pages.iter().any(|p| p.id == id) {
            return Err(DomainError::NotFound("Page not found".to_string()));
        }
        t.delete_page_cascade(id);
        Ok(())
    }
}

impl ProductRepository for InMemoryStore {
    fn create(&self, page_id: i32, product: NewProduct) -> Result<Product, DomainError> {
        let mut t = self.tables();
        let product = Product {
            id: t.next_id(),
            name: product.name,
            description: product.description,
            price: product.price,
            page_id,
        };
        t.products.push(product.clone());
        Ok(product)
    }

    fn find_with_owner(&self, id: i32) -> Result<Option<(Product, i32)>, DomainError> {
        let t = self.tables();
        Ok(t.products.iter().find(|p| p.id == id).and_then(|product| {
            t.pages
                .iter()
                .find(|page| page.id == product.page_id)
                .map(|page| (product.clone(), page.owner_id))
        }))
    }

    fn list_for_page(&self, page_id: i32) -> Result<Vec<Product>, DomainError> {
        Ok(self
            .tables()
            .products
            .iter()
            .filter(|p| p.page_id == page_id)
            .cloned()
            .collect())
    }

    fn update(&self, product: &Product) -> Result<Product, DomainError> {
        let mut t = self.tables();
        let stored = t
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| DomainError::NotFound("Product not found.".to_string()))?;
        stored.name = product.name.clone();
        stored.description = product.description.clone();
        stored.price = product.price;
        Ok(stored.clone())
    }

    fn delete(&self, id: i32) -> Result<Product, DomainError> {
        let mut t = self.tables();
        let index = t
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| DomainError::NotFound("Product not found.".to_string()))?;
        Ok(t.products.remove(index))
    }
}

impl OrderRepository for InMemoryStore {
    fn place(
        &self,
        page_id: i32,
        customer: CustomerDetails,
        lines: &[CartLine],
    ) -> Result<Order, DomainError> {
        let mut t = self.tables();
        let priced = price_cart(page_id, customer, lines, |id| {
            Ok(t.products.iter().find(|p| p.id == id).cloned())
        })?;

        let id = t.next_id();
        let mut items = Vec::with_capacity(priced.items.len());
        for item in priced.items {
            items.push(OrderItem {
                id: t.next_id(),
                product_name: item.product_name,
                quantity: item.quantity,
                price_per_item: item.price_per_item,
            });
        }
        let order = Order {
            id,
            customer_name: priced.customer.name,
            customer_phone: priced.customer.phone,
            total_price: priced.total_price,
            created_at: Utc::now(),
            page_id,
            items,
        };
        t.orders.push(order.clone());
        Ok(order)
    }

    fn list_for_page(&self, page_id: i32) -> Result<Vec<Order>, DomainError> {
        let mut orders: Vec<Order> = self
            .tables()
            .orders
            .iter()
            .filter(|o| o.page_id == page_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(orders)
    }
}
