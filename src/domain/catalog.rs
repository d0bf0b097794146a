//! Filtered, sorted and searchable view over a store's products.
//!
//! The view is a pure function of the product collection and a
//! [`CatalogQuery`]; it is recomputed on every request and never stored.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Restricts the catalog by `is_visible`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityFilter {
    #[default]
    Any,
    Visible,
    Hidden,
}

impl VisibilityFilter {
    pub const ALL: [Self; 3] = [Self::Any, Self::Visible, Self::Hidden];

    /// Parse a query-string value; unknown values yield `None`.
    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.as_str() == value)
    }

    pub fn matches(self, is_visible: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Visible => is_visible,
            Self::Hidden => !is_visible,
        }
    }

    /// Next state of the dashboard filter button: any → visible → hidden → any.
    pub fn cycle(self) -> Self {
        match self {
            Self::Any => Self::Visible,
            Self::Visible => Self::Hidden,
            Self::Hidden => Self::Any,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }
}

/// Product attribute the catalog can be ordered by.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Price,
    Category,
    InStock,
    IsVisible,
    #[default]
    CreatedAt,
}

impl SortField {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Price,
        Self::Category,
        Self::InStock,
        Self::IsVisible,
        Self::CreatedAt,
    ];

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == value)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Category => "category",
            Self::InStock => "in_stock",
            Self::IsVisible => "is_visible",
            Self::CreatedAt => "created_at",
        }
    }

    fn key(self, product: &Product) -> SortKey {
        match self {
            Self::Price => SortKey::Number(product.price.get()),
            Self::InStock => SortKey::Number(f64::from(product.kind.in_stock())),
            Self::Name => SortKey::Text(product.name.as_str().to_string()),
            Self::Category => SortKey::Text(
                product
                    .category
                    .as_ref()
                    .map(|c| c.as_str().to_string())
                    .unwrap_or_default(),
            ),
            // Hidden products sort as the empty string, before "true".
            Self::IsVisible => SortKey::Text(if product.is_visible {
                "true".to_string()
            } else {
                String::new()
            }),
            Self::CreatedAt => {
                SortKey::Text(product.created_at.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => collate(a, b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn from_param(value: &str) -> Option<Self> {
        [Self::Asc, Self::Desc]
            .into_iter()
            .find(|direction| direction.as_str() == value)
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Active sort column and direction; newest products first by default.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Clicking the active column flips the direction, any other column
    /// becomes active in ascending order.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.toggled())
        } else {
            Self::new(field, SortDirection::Asc)
        }
    }

    /// Total order over products; ties on the sort key fall back to the id
    /// so that both directions are exact mirrors of each other.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = self
            .field
            .key(a)
            .compare(&self.field.key(b))
            .then_with(|| a.id.cmp(&b.id));
        self.direction.apply(ordering)
    }
}

/// Inputs of the catalog view.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    pub visibility: VisibilityFilter,
    pub sort: SortState,
}

impl CatalogQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn visibility(mut self, visibility: VisibilityFilter) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort = SortState::new(field, direction);
        self
    }

    /// True when the user narrowed the list, used to pick the empty-state text.
    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || self.visibility != VisibilityFilter::Any
    }

    /// Produce the ordered view of `products` for this query.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let needle = self.search.to_lowercase();
        let mut items: Vec<Product> = products
            .iter()
            .filter(|p| needle.is_empty() || matches_search(p, &needle))
            .filter(|p| self.visibility.matches(p.is_visible))
            .cloned()
            .collect();
        items.sort_by(|a, b| self.sort.compare(a, b));
        items
    }
}

/// `needle` must already be lowercase.
fn matches_search(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Approximates a French/Latin locale collation: case and common accents are
/// ignored on the first pass, the raw strings break ties.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase).map(fold_accent);
    let folded_b = b.chars().flat_map(char::to_lowercase).map(fold_accent);
    folded_a.cmp(folded_b).then_with(|| a.cmp(b))
}

pub(crate) fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{digital_product, physical_product};
    use crate::domain::product::Product;

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    fn sample_catalog() -> Vec<Product> {
        let mut robe = physical_product(1, "Robe", 10000.0, true);
        robe.tags = vec!["wax".try_into().unwrap(), "été".try_into().unwrap()];
        let sac = physical_product(2, "Sac", 5000.0, false);
        let mut ebook = digital_product(3, "Écrire un business plan", 2500.0, true);
        ebook.description = "Guide complet pour entrepreneurs".try_into().unwrap();
        let mut collier = physical_product(4, "collier", 5000.0, true);
        collier.category = Some("Bijoux".try_into().unwrap());
        vec![robe, sac, ebook, collier]
    }

    #[test]
    fn visible_filter_with_price_sort_keeps_only_visible_items() {
        let products = vec![
            physical_product(1, "Robe", 10000.0, true),
            physical_product(2, "Sac", 5000.0, false),
        ];
        let query = CatalogQuery::default()
            .visibility(VisibilityFilter::Visible)
            .sort(SortField::Price, SortDirection::Asc);

        let view = query.apply(&products);

        assert_eq!(names(&view), vec!["Robe"]);
        assert_eq!(view[0].price, 10000.0);
    }

    #[test]
    fn search_matches_name_description_and_tags_case_insensitively() {
        let products = sample_catalog();

        let by_name = CatalogQuery::default().search("ROBE").apply(&products);
        assert_eq!(names(&by_name), vec!["Robe"]);

        let by_description = CatalogQuery::default()
            .search("entrepreneurs")
            .apply(&products);
        assert_eq!(names(&by_description), vec!["Écrire un business plan"]);

        let by_tag = CatalogQuery::default().search("WAX").apply(&products);
        assert_eq!(names(&by_tag), vec!["Robe"]);
    }

    #[test]
    fn every_search_result_contains_the_term() {
        let products = sample_catalog();
        for term in ["e", "A", "plan", "été", "zzz"] {
            let needle = term.to_lowercase();
            for product in CatalogQuery::default().search(term).apply(&products) {
                assert!(matches_search(&product, &needle), "{term} vs {}", product.name);
            }
        }
    }

    #[test]
    fn empty_search_returns_visibility_filtered_collection() {
        let products = sample_catalog();
        let all = CatalogQuery::default().apply(&products);
        assert_eq!(all.len(), products.len());

        let hidden = CatalogQuery::default()
            .visibility(VisibilityFilter::Hidden)
            .apply(&products);
        assert_eq!(names(&hidden), vec!["Sac"]);
    }

    #[test]
    fn descending_order_is_the_exact_reverse_of_ascending() {
        let products = sample_catalog();
        let fields = [
            SortField::Name,
            SortField::Price,
            SortField::Category,
            SortField::InStock,
            SortField::IsVisible,
            SortField::CreatedAt,
        ];
        for field in fields {
            let asc = CatalogQuery::default()
                .sort(field, SortDirection::Asc)
                .apply(&products);
            let mut desc = CatalogQuery::default()
                .sort(field, SortDirection::Desc)
                .apply(&products);
            desc.reverse();
            assert_eq!(names(&asc), names(&desc), "field {field}");
        }
    }

    #[test]
    fn names_sort_ignoring_case_and_accents() {
        let products = sample_catalog();
        let view = CatalogQuery::default()
            .sort(SortField::Name, SortDirection::Asc)
            .apply(&products);
        assert_eq!(
            names(&view),
            vec!["collier", "Écrire un business plan", "Robe", "Sac"]
        );
    }

    #[test]
    fn prices_sort_numerically_with_id_tiebreak() {
        let products = sample_catalog();
        let view = CatalogQuery::default()
            .sort(SortField::Price, SortDirection::Asc)
            .apply(&products);
        assert_eq!(
            names(&view),
            vec!["Écrire un business plan", "Sac", "collier", "Robe"]
        );
    }

    #[test]
    fn toggling_the_active_field_twice_restores_direction() {
        let state = SortState::new(SortField::Price, SortDirection::Asc);
        let once = state.toggle(SortField::Price);
        assert_eq!(once.direction, SortDirection::Desc);
        assert_eq!(once.toggle(SortField::Price), state);
    }

    #[test]
    fn selecting_a_new_field_starts_ascending() {
        let state = SortState::default();
        assert_eq!(state.field, SortField::CreatedAt);
        assert_eq!(state.direction, SortDirection::Desc);

        let toggled = state.toggle(SortField::Name);
        assert_eq!(toggled, SortState::new(SortField::Name, SortDirection::Asc));

        let desc_name = SortState::new(SortField::Name, SortDirection::Desc);
        assert_eq!(desc_name.toggle(SortField::Price).direction, SortDirection::Asc);
    }

    #[test]
    fn visibility_filter_cycles_through_three_states() {
        let start = VisibilityFilter::Any;
        assert_eq!(start.cycle(), VisibilityFilter::Visible);
        assert_eq!(start.cycle().cycle(), VisibilityFilter::Hidden);
        assert_eq!(start.cycle().cycle().cycle(), start);
    }

    #[test]
    fn is_filtered_reflects_search_and_visibility() {
        assert!(!CatalogQuery::default().is_filtered());
        assert!(CatalogQuery::default().search("x").is_filtered());
        assert!(
            CatalogQuery::default()
                .visibility(VisibilityFilter::Visible)
                .is_filtered()
        );
    }
}
