use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::store::{NewStore as DomainNewStore, Store as DomainStore};
use crate::domain::types::{
    AccentColor, ImageUrl, StoreDescription, StoreName, StoreSlogan, StoreSlug, StoreType,
    TypeConstraintError, UserId, VisitCount,
};

/// Diesel model representing the `stores` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::stores)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Store {
    pub id: i32,
    pub owner_id: String,
    pub slug: String,
    pub name: String,
    pub slogan: Option<String>,
    pub description: Option<String>,
    pub store_type: String,
    pub accent_color: String,
    pub logo: Option<String>,
    pub visit_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Store`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::stores)]
pub struct NewStore {
    pub owner_id: String,
    pub slug: String,
    pub name: String,
    pub slogan: Option<String>,
    pub description: Option<String>,
    pub store_type: String,
    pub accent_color: String,
    pub logo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Store> for DomainStore {
    type Error = TypeConstraintError;

    fn try_from(store: Store) -> Result<Self, Self::Error> {
        Ok(Self {
            id: store.id.try_into()?,
            owner_id: UserId::new(store.owner_id)?,
            slug: StoreSlug::new(store.slug)?,
            name: StoreName::new(store.name)?,
            slogan: store.slogan.map(StoreSlogan::new).transpose()?,
            description: store.description.map(StoreDescription::new).transpose()?,
            store_type: StoreType::try_from(store.store_type.as_str())?,
            accent_color: AccentColor::new(store.accent_color)?,
            logo: store.logo.map(ImageUrl::new).transpose()?,
            visit_count: VisitCount::new(store.visit_count)?,
            created_at: store.created_at,
            updated_at: store.updated_at,
        })
    }
}

impl From<DomainNewStore> for NewStore {
    fn from(store: DomainNewStore) -> Self {
        Self {
            owner_id: store.owner_id.into_inner(),
            slug: store.slug.into_inner(),
            name: store.name.into_inner(),
            slogan: store.slogan.map(StoreSlogan::into_inner),
            description: store.description.map(StoreDescription::into_inner),
            store_type: store.store_type.as_str().to_string(),
            accent_color: store.accent_color.into_inner(),
            logo: store.logo.map(ImageUrl::into_inner),
            created_at: store.created_at,
            updated_at: store.created_at,
        }
    }
}
