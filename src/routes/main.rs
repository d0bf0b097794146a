use actix_session::Session;
use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::routes::{auth_session, base_context, redirect, render_not_found};

#[get("/")]
pub async fn index(session: Session) -> impl Responder {
    if auth_session(session).is_authenticated() {
        redirect("/dashboard")
    } else {
        redirect("/login")
    }
}

pub async fn not_found(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let auth = auth_session(session);
    let context = base_context(&flash_messages, auth.user(), "not_found");
    render_not_found(&tera, "main/not_found.html", &context)
}
