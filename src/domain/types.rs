//! Strongly-typed value objects used by domain entities.
//!
//! Stores, products and sessions carry these wrappers instead of raw
//! primitives so that identifiers, text values and numeric constraints are
//! enforced once, at the boundary where user input or database rows enter the
//! domain.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be non-negative was negative or not finite.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Store slugs are lowercase ASCII letters, digits and single hyphens.
    #[error("slug may only contain lowercase letters, digits and hyphens")]
    InvalidSlug,
    /// Accent colours are `#rrggbb` hex triplets.
    #[error("accent color must look like #rrggbb")]
    InvalidColor,
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Turns an optional free-text input into `None` when it is blank.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Shared trait impls for string-backed newtypes.
macro_rules! string_wrapper_impls {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }
        }

        string_wrapper_impls!($name);
    };
}

macro_rules! url_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed URL and validates its format.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if !trimmed.as_str().validate_url() {
                    return Err(TypeConstraintError::InvalidUrl($field));
                }
                Ok(Self(trimmed))
            }
        }

        string_wrapper_impls!($name);
    };
}

macro_rules! non_negative_f64_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl $name {
            /// Constructs a finite numeric value that is zero or greater.
            pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
                if value.is_finite() && value >= 0.0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

            /// Returns the raw `f64` value.
            pub const fn get(self) -> f64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<f64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }
    };
}

macro_rules! non_negative_i32_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Constructs a value that must be zero or greater.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value >= 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

            /// Returns the raw `i32` value.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

id_newtype!(StoreId, "Unique identifier for a store.", "store_id");
id_newtype!(ProductId, "Unique identifier for a product.", "product_id");

non_empty_string_newtype!(
    UserId,
    "Identifier of a session user as issued by the identity provider.",
    "user id"
);
non_empty_string_newtype!(UserName, "Display name of a session user.", "user name");
non_empty_string_newtype!(UserEmail, "Contact email of a session user.", "email");
non_empty_string_newtype!(StoreName, "Store display name.", "store name");
non_empty_string_newtype!(StoreSlogan, "Short store tagline.", "slogan");
non_empty_string_newtype!(
    StoreDescription,
    "Long-form store presentation.",
    "store description"
);
non_empty_string_newtype!(ProductName, "Product name enforcing non-empty values.", "name");
non_empty_string_newtype!(
    ProductDescription,
    "Product description enforcing non-empty values.",
    "description"
);
non_empty_string_newtype!(CategoryName, "Free-form product category.", "category");
non_empty_string_newtype!(ProductTag, "Single search tag attached to a product.", "tag");
non_empty_string_newtype!(
    DetailText,
    "Optional free-text product detail such as shipping origin or file size.",
    "detail"
);

url_string_newtype!(ImageUrl, "Product or store image URL.", "image url");
url_string_newtype!(DownloadUrl, "Delivery URL of a digital product.", "download link");

non_negative_f64_newtype!(
    ProductPrice,
    "Non-negative price value in standard currency units.",
    "price"
);

non_negative_i32_newtype!(StockQuantity, "Units of a physical product in stock.", "stock");
non_negative_i32_newtype!(VisitCount, "Number of storefront visits.", "visit count");

/// Unique, URL-safe store handle used in `/store/{slug}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct StoreSlug(String);

impl StoreSlug {
    /// Lowercases the input and validates the slug alphabet.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let slug = trim_and_require_non_empty(value, "slug")?.to_lowercase();
        let valid_chars = slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid_chars || slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
            return Err(TypeConstraintError::InvalidSlug);
        }
        Ok(Self(slug))
    }

    /// Derive a slug from a display name: accents folded, every other
    /// character run collapsed into one hyphen.
    pub fn from_name(name: &str) -> Result<Self, TypeConstraintError> {
        let mut slug = String::new();
        for c in name
            .chars()
            .flat_map(char::to_lowercase)
            .map(crate::domain::catalog::fold_accent)
        {
            if c.is_ascii_alphanumeric() {
                slug.push(c);
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        Self::new(slug.trim_end_matches('-'))
    }
}

string_wrapper_impls!(StoreSlug);

/// Store accent colour as a `#rrggbb` hex triplet.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AccentColor(String);

impl AccentColor {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let color = trim_and_require_non_empty(value, "accent color")?.to_lowercase();
        let hex = color
            .strip_prefix('#')
            .ok_or(TypeConstraintError::InvalidColor)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeConstraintError::InvalidColor);
        }
        Ok(Self(color))
    }
}

string_wrapper_impls!(AccentColor);

impl Default for AccentColor {
    fn default() -> Self {
        Self("#f97316".to_string())
    }
}

/// Whether a store sells physical goods or digital products.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    #[default]
    Physical,
    Digital,
}

impl StoreType {
    /// String representation used in persistence and forms.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Digital => "digital",
        }
    }
}

impl Display for StoreType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for StoreType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "physical" => Ok(Self::Physical),
            "digital" => Ok(Self::Digital),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "store type: {other}"
            ))),
        }
    }
}

/// Sub-kind of a digital product.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DigitalProductType {
    #[default]
    Pdf,
    Video,
    Audio,
    Ebook,
    Other,
}

impl DigitalProductType {
    pub const ALL: [Self; 5] = [Self::Pdf, Self::Video, Self::Audio, Self::Ebook, Self::Other];

    /// String representation used in persistence and forms.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Ebook => "ebook",
            Self::Other => "other",
        }
    }
}

impl Display for DigitalProductType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for DigitalProductType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value.trim())
            .ok_or_else(|| {
                TypeConstraintError::InvalidValue(format!("digital product type: {value}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_product_names() {
        let value = ProductName::new("  Robe wax  ").unwrap();
        assert_eq!(value.as_str(), "Robe wax");
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = ProductId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("product_id"));
    }

    #[test]
    fn validates_urls() {
        assert!(ImageUrl::new("https://example.com/robe.jpg").is_ok());
        let err = DownloadUrl::new("not-a-url").unwrap_err();
        assert_eq!(err, TypeConstraintError::InvalidUrl("download link"));
    }

    #[test]
    fn product_price_allows_zero() {
        assert_eq!(ProductPrice::new(0.0).unwrap().get(), 0.0);
    }

    #[test]
    fn product_price_rejects_negative_and_nan() {
        assert_eq!(
            ProductPrice::new(-0.01).unwrap_err(),
            TypeConstraintError::NegativeNumber("price")
        );
        assert!(ProductPrice::new(f64::NAN).is_err());
    }

    #[test]
    fn slugs_are_lowercased_and_checked() {
        assert_eq!(StoreSlug::new(" Chez-Awa ").unwrap().as_str(), "chez-awa");
        assert_eq!(
            StoreSlug::new("chez awa").unwrap_err(),
            TypeConstraintError::InvalidSlug
        );
        assert!(StoreSlug::new("-awa").is_err());
        assert!(StoreSlug::new("a--b").is_err());
    }

    #[test]
    fn slugs_derive_from_store_names() {
        assert_eq!(
            StoreSlug::from_name("  Chez Awa : Épicerie fine ").unwrap().as_str(),
            "chez-awa-epicerie-fine"
        );
        assert!(StoreSlug::from_name("!!!").is_err());
    }

    #[test]
    fn accent_colors_require_hex_triplets() {
        assert_eq!(AccentColor::new("#FF8800").unwrap().as_str(), "#ff8800");
        assert!(AccentColor::new("ff8800").is_err());
        assert!(AccentColor::new("#ff88").is_err());
    }

    #[test]
    fn digital_product_type_round_trips_through_str() {
        for kind in DigitalProductType::ALL {
            assert_eq!(DigitalProductType::try_from(kind.as_str()).unwrap(), kind);
        }
        assert!(DigitalProductType::try_from("podcast").is_err());
    }

    #[test]
    fn non_blank_drops_whitespace_only_input() {
        assert_eq!(non_blank("   "), None);
        assert_eq!(non_blank(" Dakar "), Some("Dakar".to_string()));
    }
}
