use actix_web::http::header::{self, ContentDisposition};
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::history::{HistoryQuery, export_history_csv, load_history};

pub(crate) const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

#[get("/history")]
pub async fn show_history(
    params: web::Query<HistoryQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_history(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "history",
                &server_config.auth_service_url,
            );
            context.insert("changes", &data.changes);
            context.insert("product_id", &data.product_id);
            context.insert("days", &data.days);
            render_template(&tera, "admin/history.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list price history: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/history/export")]
pub async fn export_history(
    params: web::Query<HistoryQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match export_history_csv(repo.get_ref(), &user, params.into_inner()) {
        Ok(bytes) => HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, CSV_CONTENT_TYPE))
            .insert_header(ContentDisposition::attachment("historial-de-precios.csv"))
            .body(bytes),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to export price history: {err}");
            FlashMessage::error("No se pudo exportar el historial.").send();
            redirect("/admin/history")
        }
    }
}

