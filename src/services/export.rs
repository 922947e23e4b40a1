//! CSV price list of the public catalog, grouped like the storefront.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::price::{UNKNOWN_PRICE_DISPLAY, get_price_display};
use crate::repository::{BrandReader, CategoryReader, ProductReader};
use crate::services::{ServiceError, ServiceResult};
use crate::store::catalog::{CatalogStore, fetch_snapshot};

const HEADER: [&str; 6] = [
    "categoria",
    "marca",
    "producto",
    "tipo",
    "precio",
    "disponible",
];

/// Rendered export with the file name to offer for download.
pub struct PriceListExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Price list of active categories/brands and available products in
/// catalog order, one row per product with every price joined by ` | `.
pub fn export_price_list<R>(
    repo: &R,
    user: &AuthenticatedUser,
    store_name: &str,
) -> ServiceResult<PriceListExport>
where
    R: CategoryReader + BrandReader + ProductReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let snapshot = fetch_snapshot(repo)?;
    let mut store = CatalogStore::new();
    let ticket = store.begin_load();
    store.finish_load(ticket, Ok(snapshot));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER).map_err(csv_failure)?;

    for section in store.sections() {
        for brand_section in &section.brands {
            for product in &brand_section.products {
                let prices = if product.prices.is_empty() {
                    UNKNOWN_PRICE_DISPLAY.to_string()
                } else {
                    product
                        .prices
                        .iter()
                        .map(get_price_display)
                        .collect::<Vec<_>>()
                        .join(" | ")
                };
                let kind = product
                    .primary_price()
                    .map(|price| price.type_label())
                    .unwrap_or(UNKNOWN_PRICE_DISPLAY);
                let available = if product.is_available { "si" } else { "no" };

                writer
                    .write_record([
                        section.category.name.as_str(),
                        brand_section.brand.name.as_str(),
                        product.name.as_str(),
                        kind,
                        prices.as_str(),
                        available,
                    ])
                    .map_err(csv_failure)?;
            }
        }
    }

    let bytes = writer.into_inner().map_err(|err| {
        log::error!("Failed to flush price list CSV: {err}");
        ServiceError::Form("No se pudo generar el archivo".to_string())
    })?;

    let date = chrono::Local::now().format("%Y-%m-%d");
    let file_name = format!(
        "lista-de-precios-{}-{date}.csv",
        crate::domain::search::slugify(store_name)
    );

    Ok(PriceListExport { file_name, bytes })
}

fn csv_failure(err: csv::Error) -> ServiceError {
    log::error!("Failed to write price list CSV: {err}");
    ServiceError::Form("No se pudo generar el archivo".to_string())
}
