use actix_web::http::header::{self, ContentDisposition};
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::FlashMessage;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::redirect;

use crate::config::AppConfig;
use crate::repository::DieselRepository;
use crate::routes::history::CSV_CONTENT_TYPE;
use crate::services::ServiceError;
use crate::services::export::export_price_list;

#[get("/export/prices")]
pub async fn export_prices(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    app_config: web::Data<AppConfig>,
) -> impl Responder {
    match export_price_list(repo.get_ref(), &user, &app_config.store_name) {
        Ok(export) => HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, CSV_CONTENT_TYPE))
            .insert_header(ContentDisposition::attachment(export.file_name))
            .body(export.bytes),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tenés permisos para el panel.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to export price list: {err}");
            FlashMessage::error("No se pudo exportar la lista de precios.").send();
            redirect("/admin")
        }
    }
}
