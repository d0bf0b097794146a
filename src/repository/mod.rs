use crate::db::{DbConnection, DbPool};
use crate::domain::product::{NewProduct, Product, ProductDraft};
use crate::domain::store::{NewStore, Store};
use crate::domain::types::{ProductId, StoreId, StoreSlug, UserId};

pub mod errors;
pub mod product;
pub mod store;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing the products of a store.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    /// Owning store.
    pub store_id: StoreId,
    /// Skip products hidden from the public storefront.
    pub visible_only: bool,
}

impl ProductListQuery {
    pub fn new(store_id: StoreId) -> Self {
        Self {
            store_id,
            visible_only: false,
        }
    }

    pub fn visible_only(mut self) -> Self {
        self.visible_only = true;
        self
    }
}

/// Read-only operations for store entities.
pub trait StoreReader {
    /// List every store, oldest first.
    fn list_stores(&self) -> RepositoryResult<Vec<Store>>;
    /// Retrieve a store by its identifier.
    fn get_store_by_id(&self, id: StoreId) -> RepositoryResult<Option<Store>>;
    /// Retrieve a store by its public slug.
    fn get_store_by_slug(&self, slug: &StoreSlug) -> RepositoryResult<Option<Store>>;
    /// Retrieve the first store owned by a session user.
    fn get_store_by_owner(&self, owner_id: &UserId) -> RepositoryResult<Option<Store>>;
}

/// Write operations for store entities.
pub trait StoreWriter {
    /// Persist a new store and return it with its assigned id.
    fn create_store(&self, store: &NewStore) -> RepositoryResult<Store>;
    /// Count one storefront visit.
    fn increment_visit_count(&self, id: StoreId) -> RepositoryResult<usize>;
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List products of a store in insertion order.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    /// Retrieve a product by its identifier within a store.
    fn get_product_by_id(
        &self,
        id: ProductId,
        store_id: StoreId,
    ) -> RepositoryResult<Option<Product>>;
}

/// Write operations for product entities.
pub trait ProductWriter {
    /// Persist a new product with its images and tags.
    fn add_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    /// Replace every editable field of a product.
    ///
    /// Returns [`RepositoryError::NotFound`] when the product is not part of
    /// the store.
    fn update_product(
        &self,
        store_id: StoreId,
        id: ProductId,
        draft: &ProductDraft,
    ) -> RepositoryResult<Product>;
    /// Delete a product and its child rows.
    fn delete_product(&self, store_id: StoreId, id: ProductId) -> RepositoryResult<usize>;
}
