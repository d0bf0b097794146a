pub mod auth;
pub mod dashboard;
pub mod errors;
pub mod products;
pub mod storefront;
pub mod stores;

pub use errors::{ServiceError, ServiceResult};
