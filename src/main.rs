use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;
use pushkind_common::middleware::RedirectUnauthorized;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{logout, not_assigned};
use tera::Tera;

use price_catalog::config::AppConfig;
use price_catalog::repository::DieselRepository;
use price_catalog::routes::brands::{add_brand, delete_brand, edit_brand, show_brands};
use price_catalog::routes::catalog::{api_v1_catalog, show_catalog};
use price_catalog::routes::categories::{
    add_category, delete_category, edit_category, show_categories,
};
use price_catalog::routes::export::export_prices;
use price_catalog::routes::history::{export_history, show_history};
use price_catalog::routes::main::show_dashboard;
use price_catalog::routes::products::{
    add_product, api_v1_bulk_prices, delete_product, edit_product, show_product, show_products,
    toggle_product,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let app_config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Starting {} catalog ({} environment, database {})",
        app_config.store_name,
        app_config.environment,
        app_config.database_url
    );

    let secret_key = match &app_config.secret {
        Some(key) => Key::from(key.as_bytes()),
        None => Key::generate(),
    };

    let common_config = CommonServerConfig {
        secret: app_config.secret.clone().unwrap_or_default(),
        auth_service_url: app_config.auth_service_url.clone(),
    };

    let database_dir = std::path::Path::new(&app_config.database_url)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = database_dir {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create database directory {}: {e}", parent.display());
            std::process::exit(1);
        }
    }

    let pool = match establish_connection_pool(&app_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    let address = app_config.address.clone();
    let port = app_config.port;
    let domain = app_config.domain.clone();
    let secure_cookies = app_config.is_production();

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(secure_cookies)
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(show_catalog)
            .service(api_v1_catalog)
            .service(
                web::scope("/admin")
                    .wrap(RedirectUnauthorized)
                    .service(show_dashboard)
                    .service(show_categories)
                    .service(add_category)
                    .service(edit_category)
                    .service(delete_category)
                    .service(show_brands)
                    .service(add_brand)
                    .service(edit_brand)
                    .service(delete_brand)
                    .service(show_products)
                    .service(add_product)
                    .service(edit_product)
                    .service(toggle_product)
                    .service(delete_product)
                    .service(show_product)
                    .service(api_v1_bulk_prices)
                    .service(show_history)
                    .service(export_history)
                    .service(export_prices)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(common_config.clone()))
            .app_data(web::Data::new(app_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
