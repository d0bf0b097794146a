//! Editable product form state and its reconciliation into a write payload.

use actix_multipart::form::{MultipartForm, text::Text};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{DigitalDetails, PhysicalDetails, Product, ProductDraft, ProductKind};
use crate::domain::store::Store;
use crate::domain::types::{
    CategoryName, DetailText, DigitalProductType, DownloadUrl, ImageUrl, ProductDescription,
    ProductName, ProductPrice, ProductTag, StockQuantity, StoreType, TypeConstraintError,
    non_blank,
};

/// Field values of the add/edit product page, kept as the user typed them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub price: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub category: String,
    /// Comma-separated tags.
    pub tags: String,
    pub is_digital: bool,
    pub in_stock: String,
    pub is_visible: bool,
    /// Image URL slots; blank slots are dropped on submit.
    pub images: Vec<String>,
    pub shipping_from: String,
    pub delivery_time: String,
    pub download_link: String,
    pub service_type: String,
    pub digital_product_type: DigitalProductType,
    pub file_size: String,
    pub duration: String,
    pub format: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            description: String::new(),
            category: String::new(),
            tags: String::new(),
            is_digital: false,
            in_stock: String::new(),
            is_visible: true,
            images: vec![String::new()],
            shipping_from: String::new(),
            delivery_time: String::new(),
            download_link: String::new(),
            service_type: String::new(),
            digital_product_type: DigitalProductType::default(),
            file_size: String::new(),
            duration: String::new(),
            format: String::new(),
        }
    }
}

fn detail_input(value: &Option<DetailText>) -> String {
    value
        .as_ref()
        .map(|v| v.as_str().to_string())
        .unwrap_or_default()
}

impl ProductForm {
    /// Blank form for a new product; digital stores start on the digital branch.
    pub fn for_store(store: &Store) -> Self {
        Self {
            is_digital: store.store_type == StoreType::Digital,
            ..Self::default()
        }
    }

    /// Editable state of an existing product.
    pub fn from_product(product: &Product) -> Self {
        let mut form = Self {
            name: product.name.as_str().to_string(),
            price: product.price.to_string(),
            description: product.description.as_str().to_string(),
            category: product
                .category
                .as_ref()
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            tags: product
                .tags
                .iter()
                .map(ProductTag::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            is_digital: product.is_digital(),
            in_stock: product.kind.in_stock().to_string(),
            is_visible: product.is_visible,
            images: product
                .images
                .iter()
                .map(|url| url.as_str().to_string())
                .collect(),
            ..Self::default()
        };

        if form.images.is_empty() {
            form.images.push(String::new());
        }

        match &product.kind {
            ProductKind::Physical(details) => {
                form.shipping_from = detail_input(&details.shipping_from);
                form.delivery_time = detail_input(&details.delivery_time);
            }
            ProductKind::Digital(details) => {
                form.download_link = details.download_link.as_str().to_string();
                form.service_type = detail_input(&details.service_type);
                form.digital_product_type = details.digital_product_type;
                form.file_size = detail_input(&details.file_size);
                form.duration = detail_input(&details.duration);
                form.format = detail_input(&details.format);
            }
        }

        form
    }

    pub fn add_image_slot(&mut self) {
        self.images.push(String::new());
    }

    /// Out-of-range indexes are ignored.
    pub fn remove_image_slot(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    pub fn set_image(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.images.get_mut(index) {
            *slot = value.into();
        }
    }

    /// Apply a non-saving form action in place.
    pub fn apply_intent(&mut self, intent: FormIntent) {
        match intent {
            FormIntent::Save => {}
            FormIntent::AddImage => self.add_image_slot(),
            FormIntent::RemoveImage(index) => self.remove_image_slot(index),
        }
    }
}

/// What the submit button of the product form asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormIntent {
    #[default]
    Save,
    AddImage,
    RemoveImage(usize),
}

impl From<&str> for FormIntent {
    /// Unknown values fall back to saving.
    fn from(value: &str) -> Self {
        match value.trim() {
            "add_image" => Self::AddImage,
            other => other
                .strip_prefix("remove_image:")
                .and_then(|index| index.parse().ok())
                .map(Self::RemoveImage)
                .unwrap_or(Self::Save),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("Product form validation failed: {0}")]
    Validation(String),
    #[error("Product form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Price must be a number")]
    InvalidPrice,
    #[error("At least one image is required")]
    MissingImage,
    #[error("A download link is required for digital products")]
    MissingDownloadLink,
}

impl From<ValidationErrors> for ProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Integer prefix of the input like a browser `parseInt`, zero when absent.
fn parse_stock(value: &str) -> StockQuantity {
    let digits: String = value
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits
        .parse::<i32>()
        .ok()
        .and_then(|count| StockQuantity::new(count).ok())
        .unwrap_or_default()
}

/// Leading decimal number of the input like a browser `parseFloat`, so
/// `"12abc"` reads as 12 and `"1 000"` as 1. `None` when nothing numeric leads.
fn parse_price(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let bytes = value.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    value[..end].parse::<f64>().ok()
}

fn optional_detail(value: &str) -> Result<Option<DetailText>, TypeConstraintError> {
    non_blank(value).map(DetailText::new).transpose()
}

impl TryFrom<ProductForm> for ProductDraft {
    type Error = ProductFormError;

    fn try_from(value: ProductForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let price = parse_price(&value.price).ok_or(ProductFormError::InvalidPrice)?;

        let tags = value
            .tags
            .split(',')
            .filter_map(non_blank)
            .map(ProductTag::new)
            .collect::<Result<Vec<_>, _>>()?;

        let images = value
            .images
            .iter()
            .filter_map(|url| non_blank(url))
            .map(ImageUrl::new)
            .collect::<Result<Vec<_>, _>>()?;
        if images.is_empty() {
            return Err(ProductFormError::MissingImage);
        }

        let kind = if value.is_digital {
            let download_link =
                non_blank(&value.download_link).ok_or(ProductFormError::MissingDownloadLink)?;
            ProductKind::Digital(DigitalDetails {
                download_link: DownloadUrl::new(download_link)?,
                service_type: optional_detail(&value.service_type)?,
                digital_product_type: value.digital_product_type,
                file_size: optional_detail(&value.file_size)?,
                duration: optional_detail(&value.duration)?,
                format: optional_detail(&value.format)?,
            })
        } else {
            ProductKind::Physical(PhysicalDetails {
                in_stock: parse_stock(&value.in_stock),
                shipping_from: optional_detail(&value.shipping_from)?,
                delivery_time: optional_detail(&value.delivery_time)?,
            })
        };

        Ok(Self {
            name: ProductName::new(value.name)?,
            price: ProductPrice::new(price)?,
            description: ProductDescription::new(value.description)?,
            category: non_blank(&value.category).map(CategoryName::new).transpose()?,
            tags,
            is_visible: value.is_visible,
            images,
            kind,
        })
    }
}

/// `multipart/form-data` body of the product page.
///
/// Repeated `images` fields keep their order; checkboxes are present only when
/// ticked.
#[derive(MultipartForm)]
pub struct ProductMultipartForm {
    pub intent: Option<Text<String>>,
    pub name: Option<Text<String>>,
    pub price: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub category: Option<Text<String>>,
    pub tags: Option<Text<String>>,
    pub is_digital: Option<Text<String>>,
    pub in_stock: Option<Text<String>>,
    pub is_visible: Option<Text<String>>,
    pub images: Vec<Text<String>>,
    pub shipping_from: Option<Text<String>>,
    pub delivery_time: Option<Text<String>>,
    pub download_link: Option<Text<String>>,
    pub service_type: Option<Text<String>>,
    pub digital_product_type: Option<Text<String>>,
    pub file_size: Option<Text<String>>,
    pub duration: Option<Text<String>>,
    pub format: Option<Text<String>>,
}

fn text(field: Option<Text<String>>) -> String {
    field.map(Text::into_inner).unwrap_or_default()
}

fn checkbox(field: Option<Text<String>>) -> bool {
    field.is_some_and(|value| !matches!(value.trim(), "" | "false" | "off" | "0"))
}

impl ProductMultipartForm {
    /// Split the body into the requested action and the form state.
    pub fn into_parts(self) -> Result<(FormIntent, ProductForm), ProductFormError> {
        let intent = self
            .intent
            .as_deref()
            .map(|intent| FormIntent::from(intent.as_str()))
            .unwrap_or_default();

        let digital_product_type = match non_blank(&text(self.digital_product_type)) {
            Some(kind) => DigitalProductType::try_from(kind.as_str())?,
            None => DigitalProductType::default(),
        };

        let form = ProductForm {
            name: text(self.name),
            price: text(self.price),
            description: text(self.description),
            category: text(self.category),
            tags: text(self.tags),
            is_digital: checkbox(self.is_digital),
            in_stock: text(self.in_stock),
            is_visible: checkbox(self.is_visible),
            images: self.images.into_iter().map(Text::into_inner).collect(),
            shipping_from: text(self.shipping_from),
            delivery_time: text(self.delivery_time),
            download_link: text(self.download_link),
            service_type: text(self.service_type),
            digital_product_type,
            file_size: text(self.file_size),
            duration: text(self.duration),
            format: text(self.format),
        };

        Ok((intent, form))
    }
}
