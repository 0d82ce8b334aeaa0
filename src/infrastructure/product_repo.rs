use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, Product};
use crate::schema::{pages, products};

use super::models::{NewProductRow, ProductRow};

fn not_found() -> DomainError {
    DomainError::NotFound("Product not found.".to_string())
}

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for DieselProductRepository {
    fn create(&self, page_id: i32, product: NewProduct) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(products::table)
            .values(&NewProductRow::for_page(page_id, product))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn find_with_owner(&self, id: i32) -> Result<Option<(Product, i32)>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .inner_join(pages::table)
            .filter(products::id.eq(id))
            .select((ProductRow::as_select(), pages::owner_id))
            .first::<(ProductRow, i32)>(&mut conn)
            .optional()?;
        Ok(row.map(|(product, owner_id)| (product.into(), owner_id)))
    }

    fn list_for_page(&self, page_id: i32) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .filter(products::page_id.eq(page_id))
            .order(products::id.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    fn update(&self, product: &Product) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(products::table.find(product.id))
            .set((
                products::name.eq(&product.name),
                products::description.eq(&product.description),
                products::price.eq(product.price),
            ))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        row.map(Product::from).ok_or_else(not_found)
    }

    fn delete(&self, id: i32) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::delete(products::table.find(id))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        row.map(Product::from).ok_or_else(not_found)
    }
}
