use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    DigitalDetails, PhysicalDetails, Product as DomainProduct, ProductDraft, ProductKind,
};
use crate::domain::types::{
    CategoryName, DetailText, DigitalProductType, DownloadUrl, ImageUrl, ProductDescription,
    ProductName, ProductPrice, ProductTag, StockQuantity, TypeConstraintError,
};

/// Diesel model representing the `products` table.
///
/// Physical and digital columns live side by side; only the branch selected by
/// `is_digital` is populated.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
    pub id: i32,
    pub store_id: i32,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: Option<String>,
    pub is_digital: bool,
    pub in_stock: i32,
    pub is_visible: bool,
    pub shipping_from: Option<String>,
    pub delivery_time: Option<String>,
    pub download_link: Option<String>,
    pub service_type: Option<String>,
    pub digital_product_type: Option<String>,
    pub file_size: Option<String>,
    pub duration: Option<String>,
    pub file_format: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Product`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub store_id: i32,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: Option<String>,
    pub is_digital: bool,
    pub in_stock: i32,
    pub is_visible: bool,
    pub shipping_from: Option<String>,
    pub delivery_time: Option<String>,
    pub download_link: Option<String>,
    pub service_type: Option<String>,
    pub digital_product_type: Option<String>,
    pub file_size: Option<String>,
    pub duration: Option<String>,
    pub file_format: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    pub fn new(store_id: i32, columns: ProductChangeset, created_at: NaiveDateTime) -> Self {
        Self {
            store_id,
            name: columns.name,
            price: columns.price,
            description: columns.description,
            category: columns.category,
            is_digital: columns.is_digital,
            in_stock: columns.in_stock,
            is_visible: columns.is_visible,
            shipping_from: columns.shipping_from,
            delivery_time: columns.delivery_time,
            download_link: columns.download_link,
            service_type: columns.service_type,
            digital_product_type: columns.digital_product_type,
            file_size: columns.file_size,
            duration: columns.duration,
            file_format: columns.file_format,
            created_at,
            updated_at: columns.updated_at,
        }
    }
}

/// Column values written on both insert and update.
///
/// `None` is written as `NULL` so switching a product between physical and
/// digital clears the columns of the previous branch.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct ProductChangeset {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: Option<String>,
    pub is_digital: bool,
    pub in_stock: i32,
    pub is_visible: bool,
    pub shipping_from: Option<String>,
    pub delivery_time: Option<String>,
    pub download_link: Option<String>,
    pub service_type: Option<String>,
    pub digital_product_type: Option<String>,
    pub file_size: Option<String>,
    pub duration: Option<String>,
    pub file_format: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl ProductChangeset {
    pub fn from_draft(draft: &ProductDraft, updated_at: NaiveDateTime) -> Self {
        let mut columns = Self {
            name: draft.name.as_str().to_string(),
            price: draft.price.get(),
            description: draft.description.as_str().to_string(),
            category: draft.category.as_ref().map(|c| c.as_str().to_string()),
            is_digital: draft.kind.is_digital(),
            in_stock: 0,
            is_visible: draft.is_visible,
            shipping_from: None,
            delivery_time: None,
            download_link: None,
            service_type: None,
            digital_product_type: None,
            file_size: None,
            duration: None,
            file_format: None,
            updated_at,
        };

        match &draft.kind {
            ProductKind::Physical(details) => {
                columns.in_stock = details.in_stock.get();
                columns.shipping_from = detail_column(&details.shipping_from);
                columns.delivery_time = detail_column(&details.delivery_time);
            }
            ProductKind::Digital(details) => {
                columns.download_link = Some(details.download_link.as_str().to_string());
                columns.service_type = detail_column(&details.service_type);
                columns.digital_product_type =
                    Some(details.digital_product_type.as_str().to_string());
                columns.file_size = detail_column(&details.file_size);
                columns.duration = detail_column(&details.duration);
                columns.file_format = detail_column(&details.format);
            }
        }

        columns
    }
}

fn detail_column(value: &Option<DetailText>) -> Option<String> {
    value.as_ref().map(|v| v.as_str().to_string())
}

/// Blank optional columns are treated as absent.
fn detail_value(value: Option<String>) -> Result<Option<DetailText>, TypeConstraintError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(DetailText::new)
        .transpose()
}

impl Product {
    /// Assemble the domain product from its row and ordered child rows.
    pub fn into_domain(
        self,
        images: Vec<String>,
        tags: Vec<String>,
    ) -> Result<DomainProduct, TypeConstraintError> {
        let kind = if self.is_digital {
            let download_link = self.download_link.ok_or_else(|| {
                TypeConstraintError::InvalidValue(format!(
                    "digital product {} has no download link",
                    self.id
                ))
            })?;
            ProductKind::Digital(DigitalDetails {
                download_link: DownloadUrl::new(download_link)?,
                service_type: detail_value(self.service_type)?,
                digital_product_type: self
                    .digital_product_type
                    .as_deref()
                    .map(DigitalProductType::try_from)
                    .transpose()?
                    .unwrap_or_default(),
                file_size: detail_value(self.file_size)?,
                duration: detail_value(self.duration)?,
                format: detail_value(self.file_format)?,
            })
        } else {
            ProductKind::Physical(PhysicalDetails {
                in_stock: StockQuantity::new(self.in_stock)?,
                shipping_from: detail_value(self.shipping_from)?,
                delivery_time: detail_value(self.delivery_time)?,
            })
        };

        Ok(DomainProduct {
            id: self.id.try_into()?,
            store_id: self.store_id.try_into()?,
            name: ProductName::new(self.name)?,
            price: ProductPrice::new(self.price)?,
            description: ProductDescription::new(self.description)?,
            category: self
                .category
                .filter(|c| !c.trim().is_empty())
                .map(CategoryName::new)
                .transpose()?,
            tags: tags
                .into_iter()
                .map(ProductTag::new)
                .collect::<Result<_, _>>()?,
            is_visible: self.is_visible,
            images: images
                .into_iter()
                .map(ImageUrl::new)
                .collect::<Result<_, _>>()?,
            kind,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{day, digital_product, physical_product};

    fn draft_of(product: &DomainProduct) -> ProductDraft {
        ProductDraft {
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            category: product.category.clone(),
            tags: product.tags.clone(),
            is_visible: product.is_visible,
            images: product.images.clone(),
            kind: product.kind.clone(),
        }
    }

    #[test]
    fn digital_draft_clears_physical_columns() {
        let draft = draft_of(&digital_product(1, "Guide", 2500.0, true));
        let columns = ProductChangeset::from_draft(&draft, day(1));

        assert!(columns.is_digital);
        assert_eq!(columns.in_stock, 0);
        assert!(columns.shipping_from.is_none());
        assert!(columns.delivery_time.is_none());
        assert_eq!(
            columns.download_link.as_deref(),
            Some("https://files.example.com/1.pdf")
        );
        assert_eq!(columns.digital_product_type.as_deref(), Some("pdf"));
    }

    #[test]
    fn physical_draft_clears_digital_columns() {
        let draft = draft_of(&physical_product(3, "Robe", 10000.0, true));
        let columns = ProductChangeset::from_draft(&draft, day(1));

        assert!(!columns.is_digital);
        assert_eq!(columns.in_stock, 6);
        assert!(columns.download_link.is_none());
        assert!(columns.digital_product_type.is_none());
        assert!(columns.file_format.is_none());
    }

    #[test]
    fn digital_row_without_link_is_rejected() {
        let row = Product {
            id: 1,
            store_id: 1,
            name: "Guide".into(),
            price: 10.0,
            description: "PDF".into(),
            category: None,
            is_digital: true,
            in_stock: 0,
            is_visible: true,
            shipping_from: None,
            delivery_time: None,
            download_link: None,
            service_type: None,
            digital_product_type: None,
            file_size: None,
            duration: None,
            file_format: None,
            created_at: day(1),
            updated_at: day(1),
        };

        assert!(row.into_domain(vec![], vec![]).is_err());
    }
}
