use diesel::prelude::*;
use vitrine::schema::{product_images, product_tags, products, stores};

mod common;

#[test]
fn migrations_create_every_table() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().expect("should acquire connection");

    let counts: Vec<i64> = vec![
        stores::table.count().get_result(&mut conn).expect("stores"),
        products::table.count().get_result(&mut conn).expect("products"),
        product_images::table
            .count()
            .get_result(&mut conn)
            .expect("product_images"),
        product_tags::table
            .count()
            .get_result(&mut conn)
            .expect("product_tags"),
    ];

    assert_eq!(counts, vec![0, 0, 0, 0]);
}
