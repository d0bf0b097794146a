use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::session::SessionUser;
use crate::domain::types::{AccentColor, StoreType};
use crate::forms::stores::{CreateStoreForm, CreateStoreFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::stores::create_store as create_store_service;

#[get("/create-store")]
pub async fn new_store(
    user: SessionUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "create_store");
    context.insert(
        "store_types",
        &[StoreType::Physical.as_str(), StoreType::Digital.as_str()],
    );
    context.insert("default_accent_color", AccentColor::default().as_str());
    render_template(&tera, "stores/create.html", &context)
}

#[post("/create-store")]
pub async fn create_store(
    user: SessionUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<CreateStoreForm>,
) -> impl Responder {
    let payload: CreateStoreFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/create-store");
        }
    };

    match create_store_service(payload, &user, repo.get_ref()) {
        Ok(true) => {
            FlashMessage::success("Boutique créée.").send();
            redirect("/dashboard")
        }
        Ok(false) => {
            FlashMessage::error("Erreur lors de la création de la boutique.").send();
            redirect("/create-store")
        }
        Err(ServiceError::Unauthorized) => redirect("/login"),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/create-store")
        }
        Err(err) => {
            log::error!("Failed to create store: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
