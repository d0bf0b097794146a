use actix_web::{HttpResponse, Responder, get, web};

use crate::domain::catalog::CatalogQuery;
use crate::dto::catalog::CatalogParams;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::storefront::list_store_products;

/// Visible products of a store as JSON; `visibility` is ignored.
#[get("/v1/stores/{id_or_slug}/products")]
pub async fn api_v1_store_products(
    id_or_slug: web::Path<String>,
    params: web::Query<CatalogParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query = CatalogQuery::from(params.into_inner());

    match list_store_products(&id_or_slug, query, repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to list store products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
