use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::dashboard::{DashboardStats, TimeRange, recent_products};
use crate::domain::session::SessionUser;
use crate::domain::store::Store;
use crate::dto::products::ProductRowDto;
use crate::repository::{ProductListQuery, ProductReader, StoreReader};

use super::stores::current_store;
use super::{ServiceError, ServiceResult};

pub const RECENT_PRODUCTS: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub store: Store,
    pub range: TimeRange,
    pub stats: DashboardStats,
    pub recent_products: Vec<ProductRowDto>,
}

/// Overview of the user's store, or `None` when they have not created one yet.
pub fn show_dashboard<R>(
    range: TimeRange,
    now: NaiveDateTime,
    user: &SessionUser,
    repo: &R,
) -> ServiceResult<Option<DashboardView>>
where
    R: StoreReader + ProductReader,
{
    let Some(store) = current_store(user, repo)? else {
        return Ok(None);
    };

    let products = repo
        .list_products(ProductListQuery::new(store.id))
        .map_err(|e| {
            log::error!("Failed to list products: {e}");
            ServiceError::Internal
        })?;

    let stats = DashboardStats::compute(&store, &products, range, now);
    let recent = recent_products(&products, RECENT_PRODUCTS)
        .iter()
        .map(|product| ProductRowDto::new(product, &store))
        .collect();

    Ok(Some(DashboardView {
        store,
        range,
        stats,
        recent_products: recent,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{OWNER_ID, day, physical_product, sample_store, session_user};
    use crate::domain::types::StoreType;
    use crate::repository::test::TestRepository;

    #[test]
    fn users_without_store_get_none() {
        let repo = TestRepository::default();
        let view = show_dashboard(TimeRange::Month, day(1), &session_user(OWNER_ID), &repo);
        assert_eq!(view.unwrap(), None);
    }

    #[test]
    fn overview_lists_five_newest_products() {
        let products = (1..=8)
            .map(|id| physical_product(id, &format!("Produit {id}"), 1000.0, id % 2 == 0))
            .collect();
        let repo = TestRepository::new(
            vec![sample_store(1, "chez-awa", StoreType::Physical)],
            products,
        );

        let view = show_dashboard(TimeRange::Week, day(9), &session_user(OWNER_ID), &repo)
            .unwrap()
            .unwrap();

        assert_eq!(view.stats.total_products, 8);
        assert_eq!(view.stats.visible_products, 4);
        assert_eq!(view.stats.added_in_range, 7);
        let ids: Vec<i32> = view.recent_products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![8, 7, 6, 5, 4]);
    }
}
