use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::store::NewStore;
use crate::domain::types::{
    AccentColor, ImageUrl, StoreDescription, StoreName, StoreSlogan, StoreSlug, StoreType,
    TypeConstraintError, UserId, non_blank,
};

#[derive(Deserialize, Validate)]
pub struct CreateStoreForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Derived from the name when left blank.
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub slogan: String,
    #[serde(default)]
    pub description: String,
    pub store_type: String,
    #[serde(default)]
    pub accent_color: String,
    #[serde(default)]
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateStoreFormPayload {
    pub name: StoreName,
    pub slug: StoreSlug,
    pub slogan: Option<StoreSlogan>,
    pub description: Option<StoreDescription>,
    pub store_type: StoreType,
    pub accent_color: AccentColor,
    pub logo: Option<ImageUrl>,
}

impl CreateStoreFormPayload {
    pub fn into_new_store(self, owner_id: UserId) -> NewStore {
        NewStore {
            owner_id,
            slug: self.slug,
            name: self.name,
            slogan: self.slogan,
            description: self.description,
            store_type: self.store_type,
            accent_color: self.accent_color,
            logo: self.logo,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateStoreFormError {
    #[error("Create store form validation failed: {0}")]
    Validation(String),
    #[error("Create store form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreateStoreFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateStoreFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateStoreForm> for CreateStoreFormPayload {
    type Error = CreateStoreFormError;

    fn try_from(value: CreateStoreForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let slug = match non_blank(&value.slug) {
            Some(slug) => StoreSlug::new(slug)?,
            None => StoreSlug::from_name(&value.name)?,
        };
        let accent_color = match non_blank(&value.accent_color) {
            Some(color) => AccentColor::new(color)?,
            None => AccentColor::default(),
        };

        Ok(Self {
            name: StoreName::new(value.name)?,
            slug,
            slogan: non_blank(&value.slogan).map(StoreSlogan::new).transpose()?,
            description: non_blank(&value.description)
                .map(StoreDescription::new)
                .transpose()?,
            store_type: StoreType::try_from(value.store_type.as_str())?,
            accent_color,
            logo: non_blank(&value.logo).map(ImageUrl::new).transpose()?,
        })
    }
}
