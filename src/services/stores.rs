use crate::domain::session::SessionUser;
use crate::domain::store::Store;
use crate::domain::types::{StoreId, StoreSlug};
use crate::forms::stores::CreateStoreFormPayload;
use crate::repository::{StoreReader, StoreWriter};

use super::{ServiceError, ServiceResult};

/// The store the dashboard works on: the first one owned by `user`.
pub fn current_store<R>(user: &SessionUser, repo: &R) -> ServiceResult<Option<Store>>
where
    R: StoreReader,
{
    repo.get_store_by_owner(&user.id).map_err(|e| {
        log::error!("Failed to get store of user {}: {e}", user.id);
        ServiceError::Internal
    })
}

/// Like [`current_store`] but a missing store is [`ServiceError::NotFound`].
pub fn require_store<R>(user: &SessionUser, repo: &R) -> ServiceResult<Store>
where
    R: StoreReader,
{
    current_store(user, repo)?.ok_or(ServiceError::NotFound)
}

/// Look a store up by numeric id first, then by slug.
pub fn resolve_store<R>(id_or_slug: &str, repo: &R) -> ServiceResult<Store>
where
    R: StoreReader,
{
    if let Some(id) = id_or_slug
        .parse::<i32>()
        .ok()
        .and_then(|id| StoreId::new(id).ok())
    {
        match repo.get_store_by_id(id) {
            Ok(Some(store)) => return Ok(store),
            Ok(None) => {}
            Err(e) => {
                log::error!("Failed to get store by id: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }

    let slug = StoreSlug::new(id_or_slug).map_err(|_| ServiceError::NotFound)?;
    match repo.get_store_by_slug(&slug) {
        Ok(Some(store)) => Ok(store),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get store by slug: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Creates a store owned by `user`.
///
/// A slug already in use is reported as a form error. Returns `Ok(false)` when
/// the store could not be saved.
pub fn create_store<R>(
    payload: CreateStoreFormPayload,
    user: &SessionUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: StoreReader + StoreWriter,
{
    match repo.get_store_by_slug(&payload.slug) {
        Ok(None) => {}
        Ok(Some(_)) => {
            return Err(ServiceError::Form(format!(
                "L'adresse « {} » est déjà utilisée.",
                payload.slug
            )));
        }
        Err(e) => {
            log::error!("Failed to check store slug: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let store = payload.into_new_store(user.id.clone());
    match repo.create_store(&store) {
        Ok(store) => {
            log::info!("Store {} created by {}", store.slug, user.id);
            Ok(true)
        }
        Err(e) => {
            log::error!("Failed to create store: {e}");
            Ok(false)
        }
    }
}
