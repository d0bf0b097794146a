use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::session::SessionUser;
use crate::forms::auth::{
    LoginForm, LoginFormPayload, OtpForm, OtpFormPayload, RegisterForm, RegisterFormPayload,
};
use crate::routes::{auth_session, base_context, redirect, render_template};
use crate::services::{ServiceError, ServiceResult};

fn signed_in(result: ServiceResult<&SessionUser>) -> HttpResponse {
    match result {
        Ok(user) => {
            FlashMessage::success(format!("Bienvenue, {} !", user.name)).send();
            redirect("/dashboard")
        }
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            redirect("/login")
        }
    }
}

#[get("/login")]
pub async fn show_login(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if auth_session(session).is_authenticated() {
        return redirect("/dashboard");
    }

    let context = base_context(&flash_messages, None, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(session: Session, web::Form(form): web::Form<LoginForm>) -> impl Responder {
    let payload: LoginFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/login");
        }
    };

    let mut auth = auth_session(session);
    signed_in(auth.login(payload))
}

#[post("/register")]
pub async fn register(
    session: Session,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    let payload: RegisterFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/login");
        }
    };

    let mut auth = auth_session(session);
    signed_in(auth.register(payload))
}

#[post("/login/google")]
pub async fn login_with_google(session: Session) -> impl Responder {
    let mut auth = auth_session(session);
    signed_in(auth.login_with_google())
}

#[post("/login/otp")]
pub async fn login_with_otp(
    session: Session,
    web::Form(form): web::Form<OtpForm>,
) -> impl Responder {
    let payload: OtpFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/login");
        }
    };

    let mut auth = auth_session(session);
    signed_in(auth.login_with_otp(payload))
}

#[post("/logout")]
pub async fn logout(session: Session) -> impl Responder {
    let mut auth = auth_session(session);
    auth.logout();
    auth.teardown();
    redirect("/login")
}
