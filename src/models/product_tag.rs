use diesel::prelude::*;

/// Diesel model representing the `product_tags` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductTag {
    pub id: i32,
    pub product_id: i32,
    pub position: i32,
    pub tag: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::product_tags)]
pub struct NewProductTag {
    pub product_id: i32,
    pub position: i32,
    pub tag: String,
}
