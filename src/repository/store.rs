use diesel::prelude::*;

use crate::domain::store::{NewStore, Store};
use crate::domain::types::{StoreId, StoreSlug, UserId};
use crate::models::store::{NewStore as DbNewStore, Store as DbStore};
use crate::repository::{DieselRepository, RepositoryResult, StoreReader, StoreWriter};

impl StoreReader for DieselRepository {
    fn list_stores(&self) -> RepositoryResult<Vec<Store>> {
        use crate::schema::stores;

        let mut conn = self.conn()?;

        let stores = stores::table
            .order(stores::id.asc())
            .select(DbStore::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Store>, _>>()?;

        Ok(stores)
    }

    fn get_store_by_id(&self, id: StoreId) -> RepositoryResult<Option<Store>> {
        use crate::schema::stores;

        let mut conn = self.conn()?;

        let store = stores::table
            .filter(stores::id.eq(id.get()))
            .select(DbStore::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(store.map(TryInto::try_into).transpose()?)
    }

    fn get_store_by_slug(&self, slug: &StoreSlug) -> RepositoryResult<Option<Store>> {
        use crate::schema::stores;

        let mut conn = self.conn()?;

        let store = stores::table
            .filter(stores::slug.eq(slug.as_str()))
            .select(DbStore::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(store.map(TryInto::try_into).transpose()?)
    }

    fn get_store_by_owner(&self, owner_id: &UserId) -> RepositoryResult<Option<Store>> {
        use crate::schema::stores;

        let mut conn = self.conn()?;

        let store = stores::table
            .filter(stores::owner_id.eq(owner_id.as_str()))
            .order(stores::id.asc())
            .select(DbStore::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(store.map(TryInto::try_into).transpose()?)
    }
}

impl StoreWriter for DieselRepository {
    fn create_store(&self, store: &NewStore) -> RepositoryResult<Store> {
        use crate::schema::stores;

        let mut conn = self.conn()?;
        let db_store: DbNewStore = store.clone().into();

        let created = diesel::insert_into(stores::table)
            .values(&db_store)
            .returning(DbStore::as_returning())
            .get_result(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn increment_visit_count(&self, id: StoreId) -> RepositoryResult<usize> {
        use crate::schema::stores;

        let mut conn = self.conn()?;

        let affected = diesel::update(stores::table.filter(stores::id.eq(id.get())))
            .set(stores::visit_count.eq(stores::visit_count + 1))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
