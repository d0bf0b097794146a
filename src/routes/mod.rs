use std::future::{Ready, ready};

use actix_session::{Session, SessionExt};
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::session::SessionUser;
use crate::services::auth::{AuthSession, SessionStorage, SessionStorageError};

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod main;
pub mod products;
pub mod storefront;
pub mod stores;

const SESSION_USER_KEY: &str = "user";

/// [`SessionStorage`] backed by the signed cookie session.
pub struct CookieSessionStorage(Session);

impl CookieSessionStorage {
    pub fn new(session: Session) -> Self {
        Self(session)
    }
}

impl SessionStorage for CookieSessionStorage {
    fn load_user(&self) -> Result<Option<SessionUser>, SessionStorageError> {
        self.0
            .get::<SessionUser>(SESSION_USER_KEY)
            .map_err(|e| SessionStorageError(e.to_string()))
    }

    fn save_user(&self, user: &SessionUser) -> Result<(), SessionStorageError> {
        self.0.renew();
        self.0
            .insert(SESSION_USER_KEY, user)
            .map_err(|e| SessionStorageError(e.to_string()))
    }

    fn clear_user(&self) {
        self.0.purge();
    }
}

pub fn auth_session(session: Session) -> AuthSession<CookieSessionStorage> {
    AuthSession::init(CookieSessionStorage::new(session))
}

/// Signed-in merchant; anonymous requests are redirected to the login page.
impl FromRequest for SessionUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let auth = auth_session(req.get_session());
        ready(match auth.user() {
            Some(user) => Ok(user.clone()),
            None => Err(InternalError::from_response("unauthorized", redirect("/login")).into()),
        })
    }
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    HttpResponse::Ok().body(tera.render(template, context).unwrap_or_else(|e| {
        log::error!("Failed to render template '{template}': {e}");
        String::new()
    }))
}

pub fn render_not_found(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    let mut response = render_template(tera, template, context);
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&SessionUser>,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert("current_page", current_page);
    context
}
