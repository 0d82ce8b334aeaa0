use super::errors::DomainError;
use super::order::{CartLine, CustomerDetails, Order};
use super::page::{NewPage, Page};
use super::product::{NewProduct, Product};
use super::user::{NewUser, User};

pub trait UserRepository: Send + Sync + 'static {
    fn create(&self, user: NewUser) -> Result<User, DomainError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    /// Delete the user together with their page, its products, its orders
    /// and their items, all in one transaction.
    fn delete_cascade(&self, id: i32) -> Result<(), DomainError>;
}

pub trait PageRepository: Send + Sync + 'static {
    fn create(&self, page: NewPage) -> Result<Page, DomainError>;
    fn find_by_owner(&self, owner_id: i32) -> Result<Option<Page>, DomainError>;
    fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, DomainError>;
    /// Persist title and description and return the stored row.
    fn update(&self, page: &Page) -> Result<Page, DomainError>;
    fn delete_cascade(&self, id: i32) -> Result<(), DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn create(&self, page_id: i32, product: NewProduct) -> Result<Product, DomainError>;
    /// The product and the id of the user owning its page.
    fn find_with_owner(&self, id: i32) -> Result<Option<(Product, i32)>, DomainError>;
    fn list_for_page(&self, page_id: i32) -> Result<Vec<Product>, DomainError>;
    fn update(&self, product: &Product) -> Result<Product, DomainError>;
    fn delete(&self, id: i32) -> Result<Product, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Validate and price `lines` against the catalog of `page_id`, then
    /// store the order and all of its items atomically. Nothing is written
    /// when any line is rejected.
    fn place(
        &self,
        page_id: i32,
        customer: CustomerDetails,
        lines: &[CartLine],
    ) -> Result<Order, DomainError>;
    /// Orders of a page with their items, newest first.
    fn list_for_page(&self, page_id: i32) -> Result<Vec<Order>, DomainError>;
}
