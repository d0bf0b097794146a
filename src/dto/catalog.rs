use serde::{Deserialize, Serialize};

use crate::domain::catalog::{
    CatalogQuery, SortDirection, SortField, SortState, VisibilityFilter,
};

/// Query string of the product list and of the catalog API.
///
/// Values are kept raw; unknown filter or sort values fall back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogParams {
    pub search: Option<String>,
    pub visibility: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl From<CatalogParams> for CatalogQuery {
    fn from(value: CatalogParams) -> Self {
        let sort = SortState::default();
        CatalogQuery::default()
            .search(value.search.unwrap_or_default())
            .visibility(
                value
                    .visibility
                    .as_deref()
                    .and_then(VisibilityFilter::from_param)
                    .unwrap_or_default(),
            )
            .sort(
                value
                    .sort
                    .as_deref()
                    .and_then(SortField::from_param)
                    .unwrap_or(sort.field),
                value
                    .direction
                    .as_deref()
                    .and_then(SortDirection::from_param)
                    .unwrap_or(sort.direction),
            )
    }
}

/// Link to `base` that reproduces `query`.
pub fn catalog_url(base: &str, query: &CatalogQuery) -> String {
    let mut params = Vec::new();
    if !query.search.is_empty() {
        params.push(format!("search={}", urlencoding::encode(&query.search)));
    }
    if query.visibility != VisibilityFilter::Any {
        params.push(format!("visibility={}", query.visibility.as_str()));
    }
    params.push(format!("sort={}", query.sort.field));
    params.push(format!("direction={}", query.sort.direction.as_str()));
    format!("{base}?{}", params.join("&"))
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SortLinkDto {
    pub field: &'static str,
    pub label: &'static str,
    pub url: String,
    pub active: bool,
    pub direction: &'static str,
}

/// Column headers and filter button state of the product list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogControls {
    pub search: String,
    pub visibility: &'static str,
    pub visibility_label: &'static str,
    /// Link that advances the visibility filter to its next state.
    pub visibility_url: String,
    pub sort: &'static str,
    pub direction: &'static str,
    pub columns: Vec<SortLinkDto>,
}

const COLUMNS: [(SortField, &str); 6] = [
    (SortField::Name, "Produit"),
    (SortField::Category, "Catégorie"),
    (SortField::Price, "Prix"),
    (SortField::InStock, "Stock"),
    (SortField::IsVisible, "Statut"),
    (SortField::CreatedAt, "Date d'ajout"),
];

fn visibility_label(filter: VisibilityFilter) -> &'static str {
    match filter {
        VisibilityFilter::Any => "Tous",
        VisibilityFilter::Visible => "Visibles",
        VisibilityFilter::Hidden => "Masqués",
    }
}

impl CatalogControls {
    pub fn new(base: &str, query: &CatalogQuery) -> Self {
        let next_visibility = query.clone().visibility(query.visibility.cycle());

        let columns = COLUMNS
            .into_iter()
            .map(|(field, label)| {
                let toggled = query.sort.toggle(field);
                SortLinkDto {
                    field: field.as_str(),
                    label,
                    url: catalog_url(base, &query.clone().sort(toggled.field, toggled.direction)),
                    active: query.sort.field == field,
                    direction: query.sort.direction.as_str(),
                }
            })
            .collect();

        Self {
            search: query.search.clone(),
            visibility: query.visibility.as_str(),
            visibility_label: visibility_label(query.visibility),
            visibility_url: catalog_url(base, &next_visibility),
            sort: query.sort.field.as_str(),
            direction: query.sort.direction.as_str(),
            columns,
        }
    }
}
