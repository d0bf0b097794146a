use chrono::Utc;
use serde::Serialize;

use crate::domain::catalog::CatalogQuery;
use crate::domain::product::{NewProduct, ProductDraft};
use crate::domain::session::SessionUser;
use crate::domain::store::Store;
use crate::domain::types::ProductId;
use crate::dto::products::ProductRowDto;
use crate::forms::products::ProductForm;
use crate::repository::{
    ProductListQuery, ProductReader, ProductWriter, RepositoryError, StoreReader,
};

use super::stores::require_store;
use super::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductListView {
    pub store: Store,
    pub query: CatalogQuery,
    pub products: Vec<ProductRowDto>,
    /// Number of products in the store before filtering.
    pub total: usize,
}

/// State of the add/edit product page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductFormView {
    pub store: Store,
    /// `None` when adding a product.
    pub product_id: Option<i32>,
    pub form: ProductForm,
}

fn product_id(raw: i32) -> ServiceResult<ProductId> {
    ProductId::new(raw).map_err(|_| ServiceError::NotFound)
}

/// Core business logic for the dashboard product list.
///
/// Loads every product of the user's store and runs the catalog view-model
/// over it.
pub fn show_products<R>(
    query: CatalogQuery,
    user: &SessionUser,
    repo: &R,
) -> ServiceResult<ProductListView>
where
    R: StoreReader + ProductReader,
{
    let store = require_store(user, repo)?;

    let products = match repo.list_products(ProductListQuery::new(store.id)) {
        Ok(products) => products,
        Err(e) => {
            log::error!("Failed to list products: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let rows = query
        .apply(&products)
        .iter()
        .map(|product| ProductRowDto::new(product, &store))
        .collect();

    Ok(ProductListView {
        total: products.len(),
        store,
        query,
        products: rows,
    })
}

/// Editable state for a new product, or for `product_id` of the user's store.
pub fn load_product_form<R>(
    product_id: Option<i32>,
    user: &SessionUser,
    repo: &R,
) -> ServiceResult<ProductFormView>
where
    R: StoreReader + ProductReader,
{
    let store = require_store(user, repo)?;

    let Some(raw_id) = product_id else {
        return Ok(ProductFormView {
            form: ProductForm::for_store(&store),
            store,
            product_id: None,
        });
    };

    let id = self::product_id(raw_id)?;
    match repo.get_product_by_id(id, store.id) {
        Ok(Some(product)) => Ok(ProductFormView {
            form: ProductForm::from_product(&product),
            store,
            product_id: Some(raw_id),
        }),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Reconciles `form` and stores it as a new product or over `product_id`.
///
/// Invalid input is a [`ServiceError::Form`] and a product outside the store
/// is [`ServiceError::NotFound`]. A failed write is logged and reported as
/// `Ok(false)`.
pub fn save_product<R>(
    product_id: Option<i32>,
    form: ProductForm,
    user: &SessionUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: StoreReader + ProductWriter,
{
    let store = require_store(user, repo)?;
    let draft = ProductDraft::try_from(form)?;

    let result = match product_id {
        Some(raw_id) => repo.update_product(store.id, self::product_id(raw_id)?, &draft),
        None => repo.add_product(&NewProduct {
            store_id: store.id,
            draft,
            created_at: Utc::now().naive_utc(),
        }),
    };

    match result {
        Ok(product) => {
            log::info!("Saved product {} of store {}", product.id, store.slug);
            Ok(true)
        }
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to save product: {e}");
            Ok(false)
        }
    }
}

/// Deletes a product of the user's store.
///
/// Returns `Ok(false)` when the write failed, [`ServiceError::NotFound`] when
/// the product does not belong to the store.
pub fn delete_product<R>(product_id: i32, user: &SessionUser, repo: &R) -> ServiceResult<bool>
where
    R: StoreReader + ProductWriter,
{
    let store = require_store(user, repo)?;
    let id = self::product_id(product_id)?;

    match repo.delete_product(store.id, id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("Deleted product {id} of store {}", store.slug);
            Ok(true)
        }
        Err(e) => {
            log::error!("Failed to delete product: {e}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{SortDirection, SortField, VisibilityFilter};
    use crate::domain::fixtures::{
        OWNER_ID, digital_product, physical_product, sample_store, session_user,
    };
    use crate::domain::product::ProductKind;
    use crate::domain::types::StoreType;
    use crate::repository::test::TestRepository;

    fn repo() -> TestRepository {
        TestRepository::new(
            vec![sample_store(1, "chez-awa", StoreType::Physical)],
            vec![
                physical_product(1, "Robe", 10000.0, true),
                physical_product(2, "Sac", 5000.0, false),
                digital_product(3, "Guide couture", 2000.0, true),
            ],
        )
    }

    fn owner() -> SessionUser {
        session_user(OWNER_ID)
    }

    fn robe_form() -> ProductForm {
        ProductForm {
            name: "Robe wax".into(),
            price: "12000".into(),
            description: "Robe en tissu wax".into(),
            images: vec!["https://img.example.com/robe.jpg".into()],
            in_stock: "3".into(),
            ..ProductForm::default()
        }
    }

    #[test]
    fn list_applies_catalog_query() {
        let query = CatalogQuery::default()
            .visibility(VisibilityFilter::Visible)
            .sort(SortField::Price, SortDirection::Asc);

        let view = show_products(query, &owner(), &repo()).unwrap();

        assert_eq!(view.total, 3);
        let names: Vec<&str> = view.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Guide couture", "Robe"]);
    }

    #[test]
    fn list_requires_a_store() {
        let err = show_products(CatalogQuery::default(), &session_user("456"), &repo());
        assert_eq!(err.unwrap_err(), ServiceError::NotFound);
    }

    #[test]
    fn new_form_starts_from_store_defaults() {
        let view = load_product_form(None, &owner(), &repo()).unwrap();
        assert_eq!(view.product_id, None);
        assert!(view.form.is_visible);
        assert!(!view.form.is_digital);
    }

    #[test]
    fn edit_form_loads_product() {
        let view = load_product_form(Some(3), &owner(), &repo()).unwrap();
        assert_eq!(view.product_id, Some(3));
        assert_eq!(view.form.name, "Guide couture");
        assert!(view.form.is_digital);

        let err = load_product_form(Some(99), &owner(), &repo()).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn saving_new_product_adds_it() {
        let repo = repo();

        assert!(save_product(None, robe_form(), &owner(), &repo).unwrap());

        let products = repo.products();
        assert_eq!(products.len(), 4);
        let added = products.last().unwrap();
        assert_eq!(added.name.as_str(), "Robe wax");
        assert_eq!(added.kind.in_stock(), 3);
    }

    #[test]
    fn saving_existing_product_switches_kind() {
        let repo = repo();
        let form = ProductForm {
            is_digital: true,
            download_link: "https://files.example.com/robe.pdf".into(),
            ..robe_form()
        };

        assert!(save_product(Some(1), form, &owner(), &repo).unwrap());

        let updated = repo.products().into_iter().find(|p| p.id == 1).unwrap();
        assert!(matches!(updated.kind, ProductKind::Digital(_)));
        assert_eq!(updated.price, 12000.0);
    }

    #[test]
    fn saving_a_product_of_another_store_is_not_found() {
        let mut stranger = physical_product(7, "Pagne", 3000.0, true);
        stranger.store_id = crate::domain::types::StoreId::new(2).unwrap();
        let repo = TestRepository::new(
            vec![
                sample_store(1, "chez-awa", StoreType::Physical),
                sample_store(2, "ailleurs", StoreType::Physical),
            ],
            vec![physical_product(1, "Robe", 10000.0, true), stranger],
        );

        let err = save_product(Some(7), robe_form(), &owner(), &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
        let err = save_product(Some(99), robe_form(), &owner(), &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
        assert_eq!(repo.products()[1].name.as_str(), "Pagne");
    }

    #[test]
    fn invalid_form_is_rejected_before_writing() {
        let repo = repo();
        let form = ProductForm {
            images: vec![String::new()],
            ..robe_form()
        };

        let err = save_product(None, form, &owner(), &repo).unwrap_err();

        assert!(matches!(err, ServiceError::Form(_)));
        assert_eq!(repo.products().len(), 3);
    }

    #[test]
    fn failed_write_is_swallowed() {
        let repo = repo().failing_writes();
        assert!(!save_product(None, robe_form(), &owner(), &repo).unwrap());
        assert!(!delete_product(1, &owner(), &repo).unwrap());
    }

    #[test]
    fn deletes_only_own_products() {
        let repo = repo();

        assert!(delete_product(2, &owner(), &repo).unwrap());
        assert_eq!(repo.products().len(), 2);

        let err = delete_product(2, &owner(), &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }
}
