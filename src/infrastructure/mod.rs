pub mod models;
pub mod order_repo;
pub mod page_repo;
pub mod product_repo;
pub mod user_repo;

#[cfg(test)]
pub mod memory;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::DomainError;

pub use order_repo::DieselOrderRepository;
pub use page_repo::DieselPageRepository;
pub use product_repo::DieselProductRepository;
pub use user_repo::DieselUserRepository;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                log::debug!("Unique violation: {}", info.message());
                DomainError::Conflict("Resource already exists".to_string())
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
