use serde::Serialize;

use crate::domain::catalog::CatalogQuery;
use crate::domain::product::Product;
use crate::domain::store::Store;
use crate::domain::storefront::{ProductDetail, StorefrontQuery};
use crate::dto::products::{ProductDetailDto, ProductRowDto};
use crate::repository::{ProductListQuery, ProductReader, StoreReader, StoreWriter};

use super::stores::resolve_store;
use super::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StorefrontView {
    pub store: Store,
    /// Visible products, newest first.
    pub products: Vec<ProductRowDto>,
    pub detail: Option<ProductDetailDto>,
}

/// Public storefront of the store identified by `id_or_slug`.
///
/// Counts a visit, lists the visible products and, when the query names a
/// product of this store, opens its detail view at the requested image.
pub fn show_storefront<R>(
    id_or_slug: &str,
    query: StorefrontQuery,
    repo: &R,
) -> ServiceResult<StorefrontView>
where
    R: StoreReader + StoreWriter + ProductReader,
{
    let store = resolve_store(id_or_slug, repo)?;

    if let Err(e) = repo.increment_visit_count(store.id) {
        log::warn!("Failed to count visit of store {}: {e}", store.slug);
    }

    let products = match repo.list_products(ProductListQuery::new(store.id).visible_only()) {
        Ok(products) => products,
        Err(e) => {
            log::error!("Failed to list storefront products: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let detail = match query.product_id() {
        Some(id) => match repo.get_product_by_id(id, store.id) {
            Ok(product) => product,
            Err(e) => {
                log::error!("Failed to get storefront product: {e}");
                return Err(ServiceError::Internal);
            }
        },
        None => None,
    }
    .map(|product| ProductDetail::at_image(product, query.image_index()))
    .map(|detail| ProductDetailDto::new(&detail, &store));

    let rows = CatalogQuery::default()
        .apply(&products)
        .iter()
        .map(|product| ProductRowDto::new(product, &store))
        .collect();

    Ok(StorefrontView {
        store,
        products: rows,
        detail,
    })
}

/// Visible products of a store run through the catalog view-model.
pub fn list_store_products<R>(
    id_or_slug: &str,
    query: CatalogQuery,
    repo: &R,
) -> ServiceResult<Vec<Product>>
where
    R: StoreReader + ProductReader,
{
    let store = resolve_store(id_or_slug, repo)?;

    match repo.list_products(ProductListQuery::new(store.id).visible_only()) {
        Ok(products) => Ok(query.apply(&products)),
        Err(e) => {
            log::error!("Failed to list store products: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{SortDirection, SortField};
    use crate::domain::fixtures::{digital_product, physical_product, sample_store};
    use crate::domain::types::{ImageUrl, ProductId, StoreType};
    use crate::repository::test::TestRepository;

    fn repo() -> TestRepository {
        let mut robe = physical_product(1, "Robe", 10000.0, true);
        robe.images = (0..3)
            .map(|i| ImageUrl::new(format!("https://img.example.com/1-{i}.jpg")).unwrap())
            .collect();
        TestRepository::new(
            vec![sample_store(1, "chez-awa", StoreType::Physical)],
            vec![
                robe,
                physical_product(2, "Sac", 5000.0, false),
                digital_product(3, "Guide", 2000.0, true),
            ],
        )
    }

    #[test]
    fn lists_only_visible_products() {
        let repo = repo();

        let view = show_storefront("chez-awa", StorefrontQuery::default(), &repo).unwrap();

        let ids: Vec<i32> = view.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(view.detail.is_none());
    }

    #[test]
    fn counts_each_visit() {
        let repo = repo();

        show_storefront("1", StorefrontQuery::default(), &repo).unwrap();
        show_storefront("chez-awa", StorefrontQuery::default(), &repo).unwrap();

        assert_eq!(repo.stores()[0].visit_count, 2);
    }

    #[test]
    fn product_param_opens_detail_at_first_image() {
        let query = StorefrontQuery::open(ProductId::new(1).unwrap());

        let view = show_storefront("chez-awa", query, &repo()).unwrap();

        let detail = view.detail.unwrap();
        assert_eq!(detail.product.id, 1);
        assert_eq!(detail.image_index, 0);
        assert_eq!(
            detail.current_image.as_deref(),
            Some("https://img.example.com/1-0.jpg")
        );
    }

    #[test]
    fn image_param_is_clamped() {
        let query = StorefrontQuery::at_image(ProductId::new(1).unwrap(), 12);

        let view = show_storefront("chez-awa", query, &repo()).unwrap();

        assert_eq!(view.detail.unwrap().image_index, 2);
    }

    #[test]
    fn unknown_product_leaves_detail_closed() {
        let query = StorefrontQuery::open(ProductId::new(42).unwrap());
        let view = show_storefront("chez-awa", query, &repo()).unwrap();
        assert!(view.detail.is_none());
    }

    #[test]
    fn malformed_query_still_renders_the_store() {
        let repo = repo();
        for (product, image) in [("abc", None), ("", None), ("-3", None), ("1.5", Some("2"))] {
            let query = StorefrontQuery {
                product: Some(product.to_string()),
                image: image.map(str::to_string),
            };
            let view = show_storefront("chez-awa", query, &repo).unwrap();
            assert!(view.detail.is_none(), "product={product}");
            assert_eq!(view.products.len(), 2);
        }
    }

    #[test]
    fn query_extractor_accepts_malformed_values() {
        for raw in ["product=abc", "product=", "product=1&image=-1", "product=7&image=x"] {
            let query = actix_web::web::Query::<StorefrontQuery>::from_query(raw)
                .unwrap()
                .into_inner();
            assert!(show_storefront("chez-awa", query, &repo()).is_ok(), "{raw}");
        }
    }

    #[test]
    fn malformed_image_falls_back_to_primary() {
        for image in ["-1", "x", ""] {
            let query = StorefrontQuery {
                product: Some("1".to_string()),
                image: Some(image.to_string()),
            };
            let view = show_storefront("chez-awa", query, &repo()).unwrap();
            assert_eq!(view.detail.unwrap().image_index, 0, "image={image}");
        }
    }

    #[test]
    fn unknown_store_is_not_found() {
        let err = show_storefront("ailleurs", StorefrontQuery::default(), &repo()).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn api_listing_sorts_visible_products() {
        let query = CatalogQuery::default().sort(SortField::Price, SortDirection::Asc);

        let products = list_store_products("chez-awa", query, &repo()).unwrap();

        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Guide", "Robe"]);
    }
}
