use std::env;

use actix_files::Files;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use config::{Config, Environment, File};
use dotenvy::dotenv;
use tera::Tera;

use vitrine::db::establish_connection_pool;
use vitrine::models::config::ServerConfig;
use vitrine::repository::DieselRepository;
use vitrine::routes::api::api_v1_store_products;
use vitrine::routes::auth::{
    login, login_with_google, login_with_otp, logout, register, show_login,
};
use vitrine::routes::dashboard::show_dashboard;
use vitrine::routes::main::{index, not_found};
use vitrine::routes::products::{
    add_product, delete_product, edit_product, new_product, show_products, update_product,
};
use vitrine::routes::storefront::show_storefront;
use vitrine::routes::stores::{create_store, new_store};

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(File::with_name("config/default"))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

fn signing_key(secret: &str) -> Key {
    match Key::try_from(secret.as_bytes()) {
        Ok(key) => key,
        Err(_) => {
            log::warn!("secret_key is shorter than 64 bytes, sessions will not survive a restart");
            Key::generate()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = match load_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let tera = match Tera::new(&server_config.templates_dir) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    let secret_key = signing_key(&server_config.secret_key);
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let address = server_config.address.clone();
    let port = server_config.port;
    log::info!("Starting server at http://{address}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .service(Files::new("/assets", &server_config.static_dir))
            .service(web::scope("/api").service(api_v1_store_products))
            .service(index)
            .service(show_login)
            .service(login)
            .service(register)
            .service(login_with_google)
            .service(login_with_otp)
            .service(logout)
            .service(show_dashboard)
            .service(show_products)
            .service(new_product)
            .service(add_product)
            .service(edit_product)
            .service(update_product)
            .service(delete_product)
            .service(new_store)
            .service(create_store)
            .service(show_storefront)
            .default_service(web::route().to(not_found))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
