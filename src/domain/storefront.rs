//! Read-only storefront state: the product detail view and its image carousel.
//!
//! Everything here is derived from the URL (`?product=<id>&image=<index>`),
//! so browser history always agrees with what is displayed.

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::types::{ImageUrl, ProductId, StoreSlug};

/// Query string of the storefront page.
///
/// Both parameters are kept raw so a hand-edited URL still renders the store:
/// an unreadable `product` leaves the detail view closed and an unreadable
/// `image` falls back to the primary image.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorefrontQuery {
    pub product: Option<String>,
    pub image: Option<String>,
}

impl StorefrontQuery {
    pub fn open(product: ProductId) -> Self {
        Self {
            product: Some(product.to_string()),
            image: None,
        }
    }

    pub fn at_image(product: ProductId, image: usize) -> Self {
        Self {
            product: Some(product.to_string()),
            image: Some(image.to_string()),
        }
    }

    /// Product to open, if the parameter names a valid id.
    pub fn product_id(&self) -> Option<ProductId> {
        self.product
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .and_then(|id| ProductId::new(id).ok())
    }

    /// Requested carousel position, zero when absent or unreadable.
    pub fn image_index(&self) -> usize {
        self.image
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(0)
    }
}

/// Detail view of one product with a bounded carousel position.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    image_index: usize,
}

impl ProductDetail {
    /// Opening a product always starts on its primary image.
    pub fn open(product: Product) -> Self {
        Self {
            product,
            image_index: 0,
        }
    }

    /// Restore the detail view at `index`, clamped to the available images.
    pub fn at_image(product: Product, index: usize) -> Self {
        let mut detail = Self::open(product);
        detail.select(index);
        detail
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    fn last_index(&self) -> usize {
        self.product.images.len().saturating_sub(1)
    }

    pub fn current_image(&self) -> Option<&ImageUrl> {
        self.product.images.get(self.image_index)
    }

    pub fn has_previous(&self) -> bool {
        self.image_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.image_index < self.last_index()
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.image_index += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.has_previous() {
            self.image_index -= 1;
        }
    }

    pub fn select(&mut self, index: usize) {
        self.image_index = index.min(self.last_index());
    }
}

/// URL that opens `product` in the storefront of `slug`.
pub fn product_detail_url(slug: &StoreSlug, product: ProductId) -> String {
    format!("/store/{slug}?product={product}")
}

/// URL of a carousel position inside an open detail view.
pub fn product_image_url(slug: &StoreSlug, product: ProductId, image: usize) -> String {
    format!("/store/{slug}?product={product}&image={image}")
}

/// URL with the detail view closed.
pub fn storefront_url(slug: &StoreSlug) -> String {
    format!("/store/{slug}")
}
