use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryName, DetailText, DigitalProductType, DownloadUrl, ImageUrl, ProductDescription,
    ProductId, ProductName, ProductPrice, ProductTag, StockQuantity, StoreId,
};

/// Fields that only apply to goods shipped to the customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PhysicalDetails {
    pub in_stock: StockQuantity,
    pub shipping_from: Option<DetailText>,
    pub delivery_time: Option<DetailText>,
}

/// Fields that only apply to products delivered by download.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DigitalDetails {
    pub download_link: DownloadUrl,
    pub service_type: Option<DetailText>,
    pub digital_product_type: DigitalProductType,
    pub file_size: Option<DetailText>,
    pub duration: Option<DetailText>,
    pub format: Option<DetailText>,
}

/// Physical or digital half of a product.
///
/// Serialized with a `kind` tag so a payload never carries fields of both
/// branches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    Physical(PhysicalDetails),
    Digital(DigitalDetails),
}

impl ProductKind {
    pub fn is_digital(&self) -> bool {
        matches!(self, Self::Digital(_))
    }

    /// Units in stock; digital products always report zero.
    pub fn in_stock(&self) -> i32 {
        match self {
            Self::Physical(details) => details.in_stock.get(),
            Self::Digital(_) => 0,
        }
    }
}

/// A sellable item owned by a store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub name: ProductName,
    pub price: ProductPrice,
    pub description: ProductDescription,
    pub category: Option<CategoryName>,
    pub tags: Vec<ProductTag>,
    pub is_visible: bool,
    /// Ordered image URLs, the first one is the primary image.
    pub images: Vec<ImageUrl>,
    #[serde(flatten)]
    pub kind: ProductKind,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    pub fn primary_image(&self) -> Option<&ImageUrl> {
        self.images.first()
    }

    pub fn is_digital(&self) -> bool {
        self.kind.is_digital()
    }

    /// Physical products with no units left cannot be added to a cart.
    pub fn is_out_of_stock(&self) -> bool {
        !self.is_digital() && self.kind.in_stock() <= 0
    }
}

/// Validated write payload produced by the product form.
///
/// Used for both creation and update; the store provider assigns the id and
/// timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDraft {
    pub name: ProductName,
    pub price: ProductPrice,
    pub description: ProductDescription,
    pub category: Option<CategoryName>,
    pub tags: Vec<ProductTag>,
    pub is_visible: bool,
    pub images: Vec<ImageUrl>,
    #[serde(flatten)]
    pub kind: ProductKind,
}

/// Information required to create a new [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub store_id: StoreId,
    pub draft: ProductDraft,
    pub created_at: NaiveDateTime,
}
