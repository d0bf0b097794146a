//! Sample entities shared by unit tests.

use chrono::{DateTime, NaiveDateTime};

use crate::domain::product::{DigitalDetails, PhysicalDetails, Product, ProductKind};
use crate::domain::session::SessionUser;
use crate::domain::store::Store;
use crate::domain::types::{
    AccentColor, DigitalProductType, DownloadUrl, ImageUrl, ProductDescription, ProductId,
    ProductName, ProductPrice, StockQuantity, StoreId, StoreName, StoreSlug, StoreType, UserEmail,
    UserId, UserName, VisitCount,
};

pub const OWNER_ID: &str = "123";

/// Timestamp `days` days after the epoch, so ids and creation order line up.
pub fn day(days: i64) -> NaiveDateTime {
    DateTime::from_timestamp(days * 86_400, 0)
        .unwrap()
        .naive_utc()
}

pub fn session_user(id: &str) -> SessionUser {
    SessionUser {
        id: UserId::new(id).unwrap(),
        name: UserName::new("Demo User").unwrap(),
        email: UserEmail::new("demo@example.com").unwrap(),
        avatar: None,
    }
}

pub fn sample_store(id: i32, slug: &str, store_type: StoreType) -> Store {
    Store {
        id: StoreId::new(id).unwrap(),
        owner_id: UserId::new(OWNER_ID).unwrap(),
        slug: StoreSlug::new(slug).unwrap(),
        name: StoreName::new(format!("Boutique {slug}")).unwrap(),
        slogan: None,
        description: None,
        store_type,
        accent_color: AccentColor::default(),
        logo: None,
        visit_count: VisitCount::new(0).unwrap(),
        created_at: day(0),
        updated_at: day(0),
    }
}

fn base_product(id: i32, name: &str, price: f64, is_visible: bool, kind: ProductKind) -> Product {
    Product {
        id: ProductId::new(id).unwrap(),
        store_id: StoreId::new(1).unwrap(),
        name: ProductName::new(name).unwrap(),
        price: ProductPrice::new(price).unwrap(),
        description: ProductDescription::new(format!("Description de {name}")).unwrap(),
        category: None,
        tags: vec![],
        is_visible,
        images: vec![ImageUrl::new(format!("https://img.example.com/{id}.jpg")).unwrap()],
        kind,
        created_at: day(i64::from(id)),
        updated_at: day(i64::from(id)),
    }
}

pub fn physical_product(id: i32, name: &str, price: f64, is_visible: bool) -> Product {
    base_product(
        id,
        name,
        price,
        is_visible,
        ProductKind::Physical(PhysicalDetails {
            in_stock: StockQuantity::new(id * 2).unwrap(),
            shipping_from: None,
            delivery_time: None,
        }),
    )
}

pub fn digital_product(id: i32, name: &str, price: f64, is_visible: bool) -> Product {
    base_product(
        id,
        name,
        price,
        is_visible,
        ProductKind::Digital(DigitalDetails {
            download_link: DownloadUrl::new(format!("https://files.example.com/{id}.pdf"))
                .unwrap(),
            service_type: None,
            digital_product_type: DigitalProductType::Pdf,
            file_size: None,
            duration: None,
            format: None,
        }),
    )
}
