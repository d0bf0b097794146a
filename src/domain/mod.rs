pub mod catalog;
pub mod dashboard;
pub mod product;
pub mod session;
pub mod store;
pub mod storefront;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;
