use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::catalog::CatalogQuery;
use crate::domain::session::SessionUser;
use crate::domain::types::DigitalProductType;
use crate::dto::catalog::{CatalogControls, CatalogParams};
use crate::forms::products::{FormIntent, ProductMultipartForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::products::{
    ProductFormView, delete_product as delete_product_service,
    load_product_form as load_product_form_service, save_product as save_product_service,
    show_products as show_products_service,
};
use crate::services::stores::require_store;

const PRODUCTS_URL: &str = "/dashboard/products";

#[get("/dashboard/products")]
pub async fn show_products(
    params: web::Query<CatalogParams>,
    user: SessionUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = CatalogQuery::from(params.into_inner());

    match show_products_service(query, &user, repo.get_ref()) {
        Ok(view) => {
            let mut context = base_context(&flash_messages, Some(&user), "products");
            context.insert("controls", &CatalogControls::new(PRODUCTS_URL, &view.query));
            context.insert("is_filtered", &view.query.is_filtered());
            context.insert("view", &view);
            render_template(&tera, "products/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/login"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Créez d'abord votre boutique.").send();
            redirect("/dashboard")
        }
        Err(err) => {
            log::error!("Failed to render products page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn render_product_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    user: &SessionUser,
    view: &ProductFormView,
    error: Option<&str>,
) -> HttpResponse {
    let mut context = base_context(flash_messages, Some(user), "products");
    context.insert("view", view);
    context.insert("error", &error);
    context.insert(
        "digital_product_types",
        &DigitalProductType::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>(),
    );
    let action = match view.product_id {
        Some(id) => format!("/edit-product/{id}"),
        None => "/add-product".to_string(),
    };
    context.insert("action", &action);
    render_template(tera, "products/form.html", &context)
}

fn show_product_form(
    product_id: Option<i32>,
    user: &SessionUser,
    flash_messages: &IncomingFlashMessages,
    repo: &DieselRepository,
    tera: &Tera,
) -> HttpResponse {
    match load_product_form_service(product_id, user, repo) {
        Ok(view) => render_product_form(tera, flash_messages, user, &view, None),
        Err(ServiceError::Unauthorized) => redirect("/login"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Produit introuvable.").send();
            redirect(PRODUCTS_URL)
        }
        Err(err) => {
            log::error!("Failed to load product form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Handles every submit button of the product page.
///
/// Image slot buttons re-render the edited form without saving; the save
/// button reconciles and persists it.
fn submit_product_form(
    product_id: Option<i32>,
    form: ProductMultipartForm,
    user: &SessionUser,
    flash_messages: &IncomingFlashMessages,
    repo: &DieselRepository,
    tera: &Tera,
) -> HttpResponse {
    let back = match product_id {
        Some(id) => format!("/edit-product/{id}"),
        None => "/add-product".to_string(),
    };

    let (intent, mut form) = match form.into_parts() {
        Ok(parts) => parts,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&back);
        }
    };

    let store = match require_store(user, repo) {
        Ok(store) => store,
        Err(ServiceError::NotFound) => return redirect("/dashboard"),
        Err(err) => {
            log::error!("Failed to load store for product form: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if intent != FormIntent::Save {
        form.apply_intent(intent);
        let view = ProductFormView {
            store,
            product_id,
            form,
        };
        return render_product_form(tera, flash_messages, user, &view, None);
    }

    match save_product_service(product_id, form.clone(), user, repo) {
        Ok(true) => {
            FlashMessage::success("Produit enregistré.").send();
            redirect(PRODUCTS_URL)
        }
        Ok(false) => {
            let view = ProductFormView {
                store,
                product_id,
                form,
            };
            render_product_form(
                tera,
                flash_messages,
                user,
                &view,
                Some("Erreur lors de l'enregistrement du produit."),
            )
        }
        Err(ServiceError::Unauthorized) => redirect("/login"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Produit introuvable.").send();
            redirect(PRODUCTS_URL)
        }
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            let view = ProductFormView {
                store,
                product_id,
                form,
            };
            render_product_form(tera, flash_messages, user, &view, Some(&message))
        }
        Err(err) => {
            log::error!("Failed to save product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/add-product")]
pub async fn new_product(
    user: SessionUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    show_product_form(None, &user, &flash_messages, repo.get_ref(), &tera)
}

#[get("/edit-product/{product_id}")]
pub async fn edit_product(
    product_id: web::Path<i32>,
    user: SessionUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    show_product_form(
        Some(product_id.into_inner()),
        &user,
        &flash_messages,
        repo.get_ref(),
        &tera,
    )
}

#[post("/add-product")]
pub async fn add_product(
    user: SessionUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<ProductMultipartForm>,
) -> impl Responder {
    submit_product_form(None, form, &user, &flash_messages, repo.get_ref(), &tera)
}

#[post("/edit-product/{product_id}")]
pub async fn update_product(
    product_id: web::Path<i32>,
    user: SessionUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<ProductMultipartForm>,
) -> impl Responder {
    submit_product_form(
        Some(product_id.into_inner()),
        form,
        &user,
        &flash_messages,
        repo.get_ref(),
        &tera,
    )
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    user: SessionUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_product_service(product_id.into_inner(), &user, repo.get_ref()) {
        Ok(true) => FlashMessage::success("Produit supprimé.").send(),
        Ok(false) => FlashMessage::error("Erreur lors de la suppression du produit.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/login"),
        Err(ServiceError::NotFound) => FlashMessage::error("Produit introuvable.").send(),
        Err(err) => {
            log::error!("Failed to delete product: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(PRODUCTS_URL)
}
