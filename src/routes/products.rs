use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use serde_json::json;
use tera::Tera;

use crate::forms::products::{
    AddProductForm, BulkPriceUpdateForm, EditProductForm, ToggleAvailabilityForm,
};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, products};

const PRODUCTS_PAGE: &str = "/admin/products";

#[get("/products")]
pub async fn show_products(
    params: web::Query<products::ProductsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match products::load_products_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "products",
                &server_config.auth_service_url,
            );
            let has_active_filters = data.category_id.is_some()
                || data.brand_id.is_some()
                || data
                    .search
                    .as_ref()
                    .is_some_and(|value| !value.trim().is_empty());
            context.insert("products", &data.products);
            context.insert("search", &data.search);
            context.insert("category_id", &data.category_id);
            context.insert("brand_id", &data.brand_id);
            context.insert("categories", &data.categories);
            context.insert("brands", &data.brands);
            context.insert("has_active_filters", &has_active_filters);
            render_template(&tera, "admin/products.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::load_product_detail(repo.get_ref(), &user, product_id) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "products",
                &server_config.auth_service_url,
            );
            context.insert("product", &data.product);
            context.insert("prices_json", &data.prices_json);
            context.insert("categories", &data.categories);
            context.insert("brands", &data.brands);
            context.insert("history", &data.history);
            render_template(&tera, "admin/product.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("El producto no existe.").send();
            redirect(PRODUCTS_PAGE)
        }
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/add")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddProductForm>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), &user, form.into_inner()) {
        Ok(product) => {
            FlashMessage::success(format!("Producto «{}» creado.", product.name)).send();
            redirect(PRODUCTS_PAGE)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(PRODUCTS_PAGE)
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            FlashMessage::error("No se pudo crear el producto.").send();
            redirect(PRODUCTS_PAGE)
        }
    }
}

#[post("/products/edit")]
pub async fn edit_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<EditProductForm>,
) -> impl Responder {
    let product_page = format!("{PRODUCTS_PAGE}/{}", form.product_id);

    match products::modify_product(repo.get_ref(), &user, form.into_inner()) {
        Ok(product) => {
            FlashMessage::success(format!("Producto «{}» actualizado.", product.name)).send();
            redirect(&product_page)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&product_page)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("El producto no existe.").send();
            redirect(PRODUCTS_PAGE)
        }
        Err(err) => {
            log::error!("Failed to change product: {err}");
            FlashMessage::error("No se pudo actualizar el producto.").send();
            redirect(&product_page)
        }
    }
}

#[post("/products/toggle")]
pub async fn toggle_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<ToggleAvailabilityForm>,
) -> impl Responder {
    let product_id = form.product_id;

    match products::toggle_availability(repo.get_ref(), &user, product_id) {
        Ok(product) => {
            let message = if product.is_available {
                format!("«{}» ahora está disponible.", product.name)
            } else {
                format!("«{}» ya no se muestra en el catálogo.", product.name)
            };
            FlashMessage::success(message).send();
            redirect(PRODUCTS_PAGE)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("El producto no existe.").send();
            redirect(PRODUCTS_PAGE)
        }
        Err(err) => {
            log::error!("Failed to toggle product {product_id}: {err}");
            FlashMessage::error("No se pudo cambiar la disponibilidad.").send();
            redirect(PRODUCTS_PAGE)
        }
    }
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::remove_product(repo.get_ref(), &user, product_id) {
        Ok(()) => {
            FlashMessage::success("Producto eliminado.").send();
            redirect(PRODUCTS_PAGE)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("El producto no existe o ya fue eliminado.").send();
            redirect(PRODUCTS_PAGE)
        }
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            FlashMessage::error("No se pudo eliminar el producto.").send();
            redirect(PRODUCTS_PAGE)
        }
    }
}

#[post("/api/v1/products/prices")]
/// Apply several price lists at once. Responds with the number of products
/// whose prices changed.
pub async fn api_v1_bulk_prices(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Json<BulkPriceUpdateForm>,
) -> impl Responder {
    match products::bulk_update_prices(repo.get_ref(), &user, body.into_inner()) {
        Ok(updated) => HttpResponse::Ok().json(json!({ "updated": updated })),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        Err(err) => {
            log::error!("Failed to bulk update prices: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
