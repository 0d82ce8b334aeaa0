pub mod errors;
pub mod order;
pub mod page;
pub mod ports;
pub mod product;
pub mod user;
