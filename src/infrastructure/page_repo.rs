use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::page::{NewPage, Page};
use crate::domain::ports::PageRepository;
use crate::schema::{order_items, orders, pages, products};

use super::models::{NewPageRow, PageRow};

/// Remove a page and everything hanging off it, children first. Callers
/// run this inside their own transaction.
pub(crate) fn delete_page_cascade(conn: &mut PgConnection, page_id: i32) -> QueryResult<usize> {
    let page_orders = orders::table
        .filter(orders::page_id.eq(page_id))
        .select(orders::id);
    diesel::delete(order_items::table.filter(order_items::order_id.eq_any(page_orders)))
        .execute(conn)?;
    diesel::delete(orders::table.filter(orders::page_id.eq(page_id))).execute(conn)?;
    diesel::delete(products::table.filter(products::page_id.eq(page_id))).execute(conn)?;
    diesel::delete(pages::table.find(page_id)).execute(conn)
}

pub struct DieselPageRepository {
    pool: DbPool,
}

impl DieselPageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PageRepository for DieselPageRepository {
    fn create(&self, page: NewPage) -> Result<Page, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(pages::table)
            .values(&NewPageRow::from(page))
            .returning(PageRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn find_by_owner(&self, owner_id: i32) -> Result<Option<Page>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = pages::table
            .filter(pages::owner_id.eq(owner_id))
            .select(PageRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Page::from))
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = pages::table
            .filter(pages::slug.eq(slug))
            .select(PageRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Page::from))
    }

    fn update(&self, page: &Page) -> Result<Page, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(pages::table.find(page.id))
            .set((
                pages::title.eq(&page.title),
                pages::description.eq(&page.description),
            ))
            .returning(PageRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        row.map(Page::from)
            .ok_or_else(|| DomainError::NotFound("Page not found".to_string()))
    }

    fn delete_cascade(&self, id: i32) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            match delete_page_cascade(conn, id)? {
                0 => Err(DomainError::NotFound("Page not found".to_string())),
                _ => Ok(()),
            }
        })
    }
}
