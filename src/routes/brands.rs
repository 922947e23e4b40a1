use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::brands::{AddBrandForm, EditBrandForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::brands::{
    BrandsQuery, create_brand, load_brands, modify_brand, remove_brand,
};

const BRANDS_PAGE: &str = "/admin/brands";

#[get("/brands")]
pub async fn show_brands(
    params: web::Query<BrandsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_brands(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "brands",
                &server_config.auth_service_url,
            );
            context.insert("brands", &data.brands);
            context.insert("search", &data.search);
            render_template(&tera, "admin/brands.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list brands: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/brands/add")]
pub async fn add_brand(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddBrandForm>,
) -> impl Responder {
    match create_brand(repo.get_ref(), &user, form.into_inner()) {
        Ok(brand) => {
            FlashMessage::success(format!("Marca «{}» creada.", brand.name)).send();
            redirect(BRANDS_PAGE)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(BRANDS_PAGE)
        }
        Err(err) => {
            log::error!("Failed to create brand: {err}");
            FlashMessage::error("No se pudo crear la marca.").send();
            redirect(BRANDS_PAGE)
        }
    }
}

#[post("/brands/edit")]
pub async fn edit_brand(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<EditBrandForm>,
) -> impl Responder {
    match modify_brand(repo.get_ref(), &user, form.into_inner()) {
        Ok(brand) => {
            FlashMessage::success(format!("Marca «{}» actualizada.", brand.name)).send();
            redirect(BRANDS_PAGE)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(BRANDS_PAGE)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("La marca no existe.").send();
            redirect(BRANDS_PAGE)
        }
        Err(err) => {
            log::error!("Failed to change brand: {err}");
            FlashMessage::error("No se pudo actualizar la marca.").send();
            redirect(BRANDS_PAGE)
        }
    }
}

#[post("/brands/{brand_id}/delete")]
pub async fn delete_brand(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let brand_id = path.into_inner();

    match remove_brand(repo.get_ref(), &user, brand_id) {
        Ok(()) => {
            FlashMessage::success("Marca eliminada.").send();
            redirect(BRANDS_PAGE)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("No se puede eliminar: hay productos en esta marca.").send();
            redirect(BRANDS_PAGE)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("La marca no existe o ya fue eliminada.").send();
            redirect(BRANDS_PAGE)
        }
        Err(err) => {
            log::error!("Failed to delete brand {brand_id}: {err}");
            FlashMessage::error("No se pudo eliminar la marca.").send();
            redirect(BRANDS_PAGE)
        }
    }
}
