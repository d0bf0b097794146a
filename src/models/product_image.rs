use diesel::prelude::*;

/// Diesel model representing the `product_images` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_images)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductImage {
    pub id: i32,
    pub product_id: i32,
    pub position: i32,
    pub url: String,
}

/// Insertable form of [`ProductImage`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct NewProductImage {
    pub product_id: i32,
    pub position: i32,
    pub url: String,
}
