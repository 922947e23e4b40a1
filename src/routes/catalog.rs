use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use pushkind_common::routes::render_template;
use tera::{Context, Tera};

use crate::config::AppConfig;
use crate::repository::DieselRepository;
use crate::services::catalog::{CatalogQuery, load_catalog_json, load_catalog_page};

/// Public storefront. Repeated `toggle_category`/`toggle_brand` keys are
/// parsed with `serde_html_form`; a malformed query renders the default view.
#[get("/")]
pub async fn show_catalog(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    app_config: web::Data<AppConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query: CatalogQuery = match serde_html_form::from_str(req.query_string()) {
        Ok(query) => query,
        Err(err) => {
            log::debug!("Ignoring malformed catalog query `{}`: {err}", req.query_string());
            CatalogQuery::default()
        }
    };

    let data = load_catalog_page(repo.get_ref(), query);

    let mut context = Context::new();
    context.insert("store_name", &app_config.store_name);
    context.insert("search", &data.search);
    context.insert("is_searching", &data.is_searching);
    context.insert("sections", &data.sections);
    context.insert("results", &data.results);
    context.insert("collapsed", &data.collapsed);
    context.insert("expanded_categories", &data.expanded_categories);
    context.insert("expanded_brands", &data.expanded_brands);
    context.insert("error", &data.error);
    render_template(&tera, "catalog/index.html", &context)
}

#[get("/api/v1/catalog")]
/// Public JSON snapshot of the catalog with formatted primary prices.
pub async fn api_v1_catalog(repo: web::Data<DieselRepository>) -> impl Responder {
    match load_catalog_json(repo.get_ref()) {
        Ok(catalog) => HttpResponse::Ok().json(catalog),
        Err(err) => {
            log::error!("Failed to load catalog snapshot: {err}");
            HttpResponse::ServiceUnavailable().finish()
        }
    }
}
