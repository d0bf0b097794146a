use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AccentColor, ImageUrl, StoreDescription, StoreId, StoreName, StoreSlogan, StoreSlug,
    StoreType, UserId, VisitCount,
};

/// A merchant's catalog and presentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Store {
    pub id: StoreId,
    pub owner_id: UserId,
    pub slug: StoreSlug,
    pub name: StoreName,
    pub slogan: Option<StoreSlogan>,
    pub description: Option<StoreDescription>,
    pub store_type: StoreType,
    pub accent_color: AccentColor,
    pub logo: Option<ImageUrl>,
    pub visit_count: VisitCount,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Store`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewStore {
    pub owner_id: UserId,
    pub slug: StoreSlug,
    pub name: StoreName,
    pub slogan: Option<StoreSlogan>,
    pub description: Option<StoreDescription>,
    pub store_type: StoreType,
    pub accent_color: AccentColor,
    pub logo: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
}
