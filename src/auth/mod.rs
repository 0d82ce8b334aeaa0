//! Credentials: password hashing, bearer token issue/verify and the
//! request extractor that gates owner-only handlers.

pub mod extractor;
pub mod password;
pub mod token;

pub use extractor::AuthenticatedUser;
pub use token::TokenService;
