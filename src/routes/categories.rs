use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::categories::{
    CategoriesQuery, create_category, load_categories, modify_category, remove_category,
};

const CATEGORIES_PAGE: &str = "/admin/categories";

#[get("/categories")]
pub async fn show_categories(
    params: web::Query<CategoriesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_categories(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "categories",
                &server_config.auth_service_url,
            );
            context.insert("categories", &data.categories);
            context.insert("search", &data.search);
            render_template(&tera, "admin/categories.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list categories: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/categories/add")]
pub async fn add_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddCategoryForm>,
) -> impl Responder {
    match create_category(repo.get_ref(), &user, form.into_inner()) {
        Ok(category) => {
            FlashMessage::success(format!("Categoría «{}» creada.", category.name)).send();
            redirect(CATEGORIES_PAGE)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(CATEGORIES_PAGE)
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Ya existe una categoría con ese identificador.").send();
            redirect(CATEGORIES_PAGE)
        }
        Err(err) => {
            log::error!("Failed to create category: {err}");
            FlashMessage::error("No se pudo crear la categoría.").send();
            redirect(CATEGORIES_PAGE)
        }
    }
}

#[post("/categories/edit")]
pub async fn edit_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<EditCategoryForm>,
) -> impl Responder {
    match modify_category(repo.get_ref(), &user, form.into_inner()) {
        Ok(category) => {
            FlashMessage::success(format!("Categoría «{}» actualizada.", category.name)).send();
            redirect(CATEGORIES_PAGE)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(CATEGORIES_PAGE)
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Ya existe una categoría con ese identificador.").send();
            redirect(CATEGORIES_PAGE)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("La categoría no existe.").send();
            redirect(CATEGORIES_PAGE)
        }
        Err(err) => {
            log::error!("Failed to change category: {err}");
            FlashMessage::error("No se pudo actualizar la categoría.").send();
            redirect(CATEGORIES_PAGE)
        }
    }
}

#[post("/categories/{category_id}/delete")]
pub async fn delete_category(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = path.into_inner();

    match remove_category(repo.get_ref(), &user, category_id) {
        Ok(()) => {
            FlashMessage::success("Categoría eliminada.").send();
            redirect(CATEGORIES_PAGE)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("No se puede eliminar: hay productos en esta categoría.").send();
            redirect(CATEGORIES_PAGE)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("La categoría no existe o ya fue eliminada.").send();
            redirect(CATEGORIES_PAGE)
        }
        Err(err) => {
            log::error!("Failed to delete category {category_id}: {err}");
            FlashMessage::error("No se pudo eliminar la categoría.").send();
            redirect(CATEGORIES_PAGE)
        }
    }
}
