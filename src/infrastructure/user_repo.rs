use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{NewUser, User};
use crate::schema::{pages, users};

use super::models::{NewUserRow, UserRow};
use super::page_repo::delete_page_cascade;

pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for DieselUserRepository {
    fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(users::table)
            .values(&NewUserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(User::from))
    }

    fn delete_cascade(&self, id: i32) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let page_id: Option<i32> = pages::table
                .filter(pages::owner_id.eq(id))
                .select(pages::id)
                .first(conn)
                .optional()?;
            if let Some(page_id) = page_id {
                delete_page_cascade(conn, page_id)?;
            }

            let deleted = diesel::delete(users::table.find(id)).execute(conn)?;
            if deleted == 0 {
                return Err(DomainError::NotFound("User not found".to_string()));
            }
            Ok(())
        })
    }
}
