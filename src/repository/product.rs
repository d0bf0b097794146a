use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::product::{NewProduct, Product, ProductDraft};
use crate::domain::types::{ProductId, StoreId};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, ProductChangeset,
};
use crate::models::product_image::{NewProductImage, ProductImage};
use crate::models::product_tag::{NewProductTag, ProductTag};
use crate::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductWriter, RepositoryError,
    RepositoryResult,
};

/// Load image URLs and tags for `ids`, grouped by product and ordered by
/// position.
fn load_children(
    conn: &mut SqliteConnection,
    ids: &[i32],
) -> RepositoryResult<(HashMap<i32, Vec<String>>, HashMap<i32, Vec<String>>)> {
    use crate::schema::{product_images, product_tags};

    let mut images: HashMap<i32, Vec<String>> = HashMap::new();
    for image in product_images::table
        .filter(product_images::product_id.eq_any(ids))
        .order((product_images::product_id.asc(), product_images::position.asc()))
        .select(ProductImage::as_select())
        .load(conn)?
    {
        images.entry(image.product_id).or_default().push(image.url);
    }

    let mut tags: HashMap<i32, Vec<String>> = HashMap::new();
    for tag in product_tags::table
        .filter(product_tags::product_id.eq_any(ids))
        .order((product_tags::product_id.asc(), product_tags::position.asc()))
        .select(ProductTag::as_select())
        .load(conn)?
    {
        tags.entry(tag.product_id).or_default().push(tag.tag);
    }

    Ok((images, tags))
}

fn assemble(conn: &mut SqliteConnection, rows: Vec<DbProduct>) -> RepositoryResult<Vec<Product>> {
    let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
    let (mut images, mut tags) = load_children(conn, &ids)?;

    rows.into_iter()
        .map(|row| {
            let row_images = images.remove(&row.id).unwrap_or_default();
            let row_tags = tags.remove(&row.id).unwrap_or_default();
            Ok(row.into_domain(row_images, row_tags)?)
        })
        .collect()
}

fn find_product(
    conn: &mut SqliteConnection,
    id: ProductId,
    store_id: StoreId,
) -> RepositoryResult<Option<Product>> {
    use crate::schema::products;

    let row = products::table
        .filter(products::id.eq(id.get()))
        .filter(products::store_id.eq(store_id.get()))
        .select(DbProduct::as_select())
        .first(conn)
        .optional()?;

    match row {
        Some(row) => Ok(assemble(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

/// Replace the image and tag rows of a product with the draft's lists.
fn write_children(
    conn: &mut SqliteConnection,
    product_id: i32,
    draft: &ProductDraft,
) -> RepositoryResult<()> {
    use crate::schema::{product_images, product_tags};

    diesel::delete(product_images::table.filter(product_images::product_id.eq(product_id)))
        .execute(conn)?;
    diesel::delete(product_tags::table.filter(product_tags::product_id.eq(product_id)))
        .execute(conn)?;

    let images: Vec<NewProductImage> = draft
        .images
        .iter()
        .zip(0..)
        .map(|(url, position)| NewProductImage {
            product_id,
            position,
            url: url.as_str().to_string(),
        })
        .collect();
    if !images.is_empty() {
        diesel::insert_into(product_images::table)
            .values(&images)
            .execute(conn)?;
    }

    let tags: Vec<NewProductTag> = draft
        .tags
        .iter()
        .zip(0..)
        .map(|(tag, position)| NewProductTag {
            product_id,
            position,
            tag: tag.as_str().to_string(),
        })
        .collect();
    if !tags.is_empty() {
        diesel::insert_into(product_tags::table)
            .values(&tags)
            .execute(conn)?;
    }

    Ok(())
}

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut items = products::table
            .filter(products::store_id.eq(query.store_id.get()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if query.visible_only {
            items = items.filter(products::is_visible.eq(true));
        }

        let rows = items
            .order(products::id.asc())
            .select(DbProduct::as_select())
            .load(&mut conn)?;

        assemble(&mut conn, rows)
    }

    fn get_product_by_id(
        &self,
        id: ProductId,
        store_id: StoreId,
    ) -> RepositoryResult<Option<Product>> {
        let mut conn = self.conn()?;
        find_product(&mut conn, id, store_id)
    }
}

impl ProductWriter for DieselRepository {
    fn add_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.transaction(|conn| {
            let columns = ProductChangeset::from_draft(&product.draft, product.created_at);
            let row = DbNewProduct::new(product.store_id.get(), columns, product.created_at);

            let product_id: i32 = diesel::insert_into(products::table)
                .values(&row)
                .returning(products::id)
                .get_result(conn)?;

            write_children(conn, product_id, &product.draft)?;

            find_product(conn, ProductId::new(product_id)?, product.store_id)?
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn update_product(
        &self,
        store_id: StoreId,
        id: ProductId,
        draft: &ProductDraft,
    ) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let columns = ProductChangeset::from_draft(draft, Utc::now().naive_utc());

        conn.transaction(|conn| {
            let affected = diesel::update(
                products::table
                    .filter(products::id.eq(id.get()))
                    .filter(products::store_id.eq(store_id.get())),
            )
            .set(&columns)
            .execute(conn)?;

            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }

            write_children(conn, id.get(), draft)?;

            find_product(conn, id, store_id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_product(&self, store_id: StoreId, id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::{product_images, product_tags, products};

        let mut conn = self.conn()?;

        conn.transaction(|conn| {
            let owned = products::table
                .filter(products::id.eq(id.get()))
                .filter(products::store_id.eq(store_id.get()))
                .select(products::id)
                .first::<i32>(conn)
                .optional()?;

            if owned.is_none() {
                return Ok(0);
            }

            diesel::delete(product_images::table.filter(product_images::product_id.eq(id.get())))
                .execute(conn)?;
            diesel::delete(product_tags::table.filter(product_tags::product_id.eq(id.get())))
                .execute(conn)?;
            let affected =
                diesel::delete(products::table.filter(products::id.eq(id.get()))).execute(conn)?;

            Ok(affected)
        })
    }
}
