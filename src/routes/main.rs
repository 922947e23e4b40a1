use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::repository::DieselRepository;
use crate::services::{ServiceError, main as main_service};

#[get("")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match main_service::load_dashboard(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "dashboard",
                &server_config.auth_service_url,
            );
            context.insert("stats", &data.stats);
            context.insert("recent_changes", &data.recent_changes);
            render_template(&tera, "admin/dashboard.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
