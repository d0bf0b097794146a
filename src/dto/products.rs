use serde::Serialize;

use crate::domain::product::{Product, ProductKind};
use crate::domain::store::Store;
use crate::domain::storefront::{
    ProductDetail, product_detail_url, product_image_url, storefront_url,
};

/// Format a price the way the storefront shows it: `10 000 FCFA`.
///
/// Thousands are grouped with a space and at most two decimals are kept.
pub fn format_price(price: f64) -> String {
    let cents = (price * 100.0).round() as i64;
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let fraction = cents % 100;
    if fraction == 0 {
        format!("{grouped} FCFA")
    } else {
        let decimals = format!("{fraction:02}");
        format!("{grouped},{} FCFA", decimals.trim_end_matches('0'))
    }
}

/// One product as listed in the dashboard or on the storefront grid.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductRowDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub is_digital: bool,
    pub is_visible: bool,
    pub is_out_of_stock: bool,
    pub created_at: String,
    pub edit_url: String,
    pub storefront_url: String,
}

impl ProductRowDto {
    pub fn new(product: &Product, store: &Store) -> Self {
        Self {
            id: product.id.get(),
            name: product.name.as_str().to_string(),
            description: product.description.as_str().to_string(),
            image: product.primary_image().map(|url| url.as_str().to_string()),
            category: product
                .category
                .as_ref()
                .map(|c| c.as_str().to_string())
                .unwrap_or_else(|| "Non catégorisé".to_string()),
            price: format_price(product.price.get()),
            stock: if product.is_digital() {
                "Produit digital".to_string()
            } else {
                format!("Stock: {}", product.kind.in_stock())
            },
            is_digital: product.is_digital(),
            is_visible: product.is_visible,
            is_out_of_stock: product.is_out_of_stock(),
            created_at: product.created_at.format("%d/%m/%Y").to_string(),
            edit_url: format!("/edit-product/{}", product.id),
            storefront_url: product_detail_url(&store.slug, product.id),
        }
    }
}

/// A detail field shown under the product description.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

/// Open product detail of the storefront, with carousel links.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDetailDto {
    pub product: ProductRowDto,
    pub images: Vec<String>,
    pub image_index: usize,
    pub current_image: Option<String>,
    pub previous_url: Option<String>,
    pub next_url: Option<String>,
    /// `(index, url)` of each thumbnail.
    pub thumbnails: Vec<(usize, String)>,
    pub close_url: String,
    pub availability: String,
    pub can_buy: bool,
    pub details: Vec<DetailLine>,
}

fn push_detail(details: &mut Vec<DetailLine>, label: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        details.push(DetailLine {
            label,
            value: value.to_string(),
        });
    }
}

impl ProductDetailDto {
    pub fn new(detail: &ProductDetail, store: &Store) -> Self {
        let product = &detail.product;
        let index = detail.image_index();
        let slug = &store.slug;

        let mut details = Vec::new();
        let availability = match &product.kind {
            ProductKind::Physical(physical) => {
                push_detail(
                    &mut details,
                    "Expédié depuis",
                    physical.shipping_from.as_deref(),
                );
                push_detail(
                    &mut details,
                    "Délai de livraison",
                    physical.delivery_time.as_deref(),
                );
                if physical.in_stock.get() > 0 {
                    format!("{} en stock", physical.in_stock)
                } else {
                    "Rupture de stock".to_string()
                }
            }
            ProductKind::Digital(digital) => {
                details.push(DetailLine {
                    label: "Type",
                    value: digital.digital_product_type.as_str().to_uppercase(),
                });
                push_detail(&mut details, "Taille", digital.file_size.as_deref());
                push_detail(&mut details, "Durée", digital.duration.as_deref());
                push_detail(&mut details, "Format", digital.format.as_deref());
                digital
                    .service_type
                    .as_ref()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_else(|| "Produit digital".to_string())
            }
        };

        Self {
            product: ProductRowDto::new(product, store),
            images: product
                .images
                .iter()
                .map(|url| url.as_str().to_string())
                .collect(),
            image_index: index,
            current_image: detail.current_image().map(|url| url.as_str().to_string()),
            previous_url: detail
                .has_previous()
                .then(|| product_image_url(slug, product.id, index - 1)),
            next_url: detail
                .has_next()
                .then(|| product_image_url(slug, product.id, index + 1)),
            thumbnails: (0..product.images.len())
                .map(|i| (i, product_image_url(slug, product.id, i)))
                .collect(),
            close_url: storefront_url(slug),
            availability,
            can_buy: !product.is_out_of_stock(),
            details,
        }
    }
}
