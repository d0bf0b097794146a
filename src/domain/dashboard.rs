//! Figures shown on the merchant dashboard, computed from a store's products.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::store::Store;

/// Window of the "added recently" figure.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    Today,
    Week,
    #[default]
    Month,
    Year,
}

impl TimeRange {
    pub const ALL: [Self; 4] = [Self::Today, Self::Week, Self::Month, Self::Year];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Today => "Aujourd'hui",
            Self::Week => "7 jours",
            Self::Month => "30 jours",
            Self::Year => "12 mois",
        }
    }

    /// Start of the window ending at `now`; `Today` starts at midnight.
    pub fn since(self, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            Self::Today => now.date().and_time(chrono::NaiveTime::MIN),
            Self::Week => now - Duration::days(7),
            Self::Month => now - Duration::days(30),
            Self::Year => now - Duration::days(365),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_products: usize,
    pub visible_products: usize,
    pub added_in_range: usize,
    pub out_of_stock: usize,
    pub visits: i32,
}

impl DashboardStats {
    pub fn compute(
        store: &Store,
        products: &[Product],
        range: TimeRange,
        now: NaiveDateTime,
    ) -> Self {
        let since = range.since(now);
        Self {
            total_products: products.len(),
            visible_products: products.iter().filter(|p| p.is_visible).count(),
            added_in_range: products.iter().filter(|p| p.created_at >= since).count(),
            out_of_stock: products.iter().filter(|p| p.is_out_of_stock()).count(),
            visits: store.visit_count.get(),
        }
    }
}

/// The `limit` most recently created products, newest first.
pub fn recent_products(products: &[Product], limit: usize) -> Vec<Product> {
    let mut items = products.to_vec();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    items.truncate(limit);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{day, digital_product, physical_product, sample_store};
    use crate::domain::product::ProductKind;
    use crate::domain::types::{StockQuantity, StoreType, VisitCount};

    #[test]
    fn counts_products_by_state() {
        let mut store = sample_store(1, "awa", StoreType::Physical);
        store.visit_count = VisitCount::new(42).unwrap();

        let mut sold_out = physical_product(3, "Sac", 5000.0, false);
        if let ProductKind::Physical(details) = &mut sold_out.kind {
            details.in_stock = StockQuantity::new(0).unwrap();
        }
        let products = vec![
            physical_product(1, "Robe", 10000.0, true),
            digital_product(2, "Guide", 2000.0, true),
            sold_out,
            physical_product(40, "Pagne", 8000.0, true),
        ];

        let stats = DashboardStats::compute(&store, &products, TimeRange::Week, day(41));

        assert_eq!(stats.total_products, 4);
        assert_eq!(stats.visible_products, 3);
        assert_eq!(stats.added_in_range, 1);
        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(stats.visits, 42);
    }

    #[test]
    fn today_starts_at_midnight() {
        let now = day(10) + Duration::hours(15);
        assert_eq!(TimeRange::Today.since(now), day(10));
        assert_eq!(TimeRange::Month.since(now), now - Duration::days(30));
    }

    #[test]
    fn recent_products_are_newest_first() {
        let products: Vec<Product> = (1..=7)
            .map(|id| physical_product(id, &format!("Produit {id}"), 100.0, true))
            .collect();

        let recent = recent_products(&products, 5);

        let ids: Vec<i32> = recent.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    }
}
