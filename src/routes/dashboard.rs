use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Utc;
use serde::Deserialize;
use tera::Tera;

use crate::domain::dashboard::TimeRange;
use crate::domain::session::SessionUser;
use crate::domain::storefront::storefront_url;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::dashboard::show_dashboard as show_dashboard_service;

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    range: Option<TimeRange>,
}

#[get("/dashboard")]
pub async fn show_dashboard(
    params: web::Query<DashboardParams>,
    user: SessionUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let range = params.range.unwrap_or_default();

    match show_dashboard_service(range, Utc::now().naive_utc(), &user, repo.get_ref()) {
        Ok(view) => {
            let mut context = base_context(&flash_messages, Some(&user), "dashboard");
            if let Some(view) = &view {
                context.insert("storefront_url", &storefront_url(&view.store.slug));
            }
            context.insert("view", &view);
            context.insert("range", range.as_str());
            context.insert(
                "ranges",
                &TimeRange::ALL
                    .iter()
                    .map(|r| (r.as_str(), r.label()))
                    .collect::<Vec<_>>(),
            );
            render_template(&tera, "dashboard/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/login"),
        Err(err) => {
            log::error!("Failed to render dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
