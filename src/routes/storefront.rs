use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::storefront::StorefrontQuery;
use crate::repository::DieselRepository;
use crate::routes::{auth_session, base_context, render_not_found, render_template};
use crate::services::ServiceError;
use crate::services::storefront::show_storefront as show_storefront_service;

#[get("/store/{id_or_slug}")]
pub async fn show_storefront(
    id_or_slug: web::Path<String>,
    query: web::Query<StorefrontQuery>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_storefront_service(&id_or_slug, query.into_inner(), repo.get_ref()) {
        Ok(view) => {
            let auth = auth_session(session);
            let mut context = base_context(&flash_messages, auth.user(), "store");
            context.insert("view", &view);
            render_template(&tera, "store/index.html", &context)
        }
        Err(ServiceError::NotFound) => {
            let context = base_context(&flash_messages, None, "store");
            render_not_found(&tera, "store/not_found.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render storefront: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
