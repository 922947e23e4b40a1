use chrono::{Local, NaiveDateTime};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::{Deserialize, Serialize};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::price::{Price, get_price_display};
use crate::domain::price_change::{
    DEFAULT_HISTORY_LIMIT, DEFAULT_RECENT_DAYS, PriceChangeListQuery, PriceChangeLog,
    format_relative_time,
};
use crate::repository::PriceChangeReader;
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the history page.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub product_id: Option<i32>,
    /// Restrict the list to the last N days.
    pub days: Option<i64>,
    pub limit: Option<usize>,
}

/// A history entry ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct PriceChangeView {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub previous_display: Vec<String>,
    pub new_display: Vec<String>,
    pub changed_by: String,
    pub changed_at: NaiveDateTime,
    pub changed_ago: String,
    pub reason: Option<String>,
}

impl PriceChangeView {
    pub fn new(log: PriceChangeLog, now: NaiveDateTime) -> Self {
        Self {
            id: log.id,
            product_id: log.product_id,
            previous_display: displays(&log.previous_prices),
            new_display: displays(&log.new_prices),
            changed_ago: format_relative_time(log.changed_at, now),
            product_name: log.product_name,
            changed_by: log.changed_by,
            changed_at: log.changed_at,
            reason: log.reason,
        }
    }
}

fn displays(prices: &[Price]) -> Vec<String> {
    prices.iter().map(get_price_display).collect()
}

pub struct HistoryPageData {
    pub changes: Vec<PriceChangeView>,
    pub product_id: Option<i32>,
    pub days: Option<i64>,
}

fn query_for(params: &HistoryQuery) -> PriceChangeListQuery {
    let mut query =
        PriceChangeListQuery::new().limit(params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT));
    if let Some(product_id) = params.product_id {
        query = query.product(product_id);
    }
    if let Some(days) = params.days.filter(|days| *days > 0) {
        query = query.recent_days(days);
    }
    query
}

fn to_views(logs: Vec<PriceChangeLog>) -> Vec<PriceChangeView> {
    let now = Local::now().naive_utc();
    logs.into_iter()
        .map(|log| PriceChangeView::new(log, now))
        .collect()
}

/// Newest-first price history, optionally for one product or a recent window.
pub fn load_history<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: HistoryQuery,
) -> ServiceResult<HistoryPageData>
where
    R: PriceChangeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let logs = repo
        .list_price_changes(query_for(&params))
        .map_err(ServiceError::from)?;

    Ok(HistoryPageData {
        changes: to_views(logs),
        product_id: params.product_id,
        days: params.days,
    })
}

/// History of a single product, newest first.
pub fn product_history<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<Vec<PriceChangeView>>
where
    R: PriceChangeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let logs = repo
        .list_price_changes(PriceChangeListQuery::new().product(product_id))
        .map_err(ServiceError::from)?;

    Ok(to_views(logs))
}

/// Changes from the last [`DEFAULT_RECENT_DAYS`] days.
pub fn recent_changes<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<PriceChangeView>>
where
    R: PriceChangeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let logs = repo
        .list_price_changes(PriceChangeListQuery::new().recent_days(DEFAULT_RECENT_DAYS))
        .map_err(ServiceError::from)?;

    Ok(to_views(logs))
}

/// Full history as CSV, newest first, honouring the same filters as the page
/// but without the default limit.
pub fn export_history_csv<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: HistoryQuery,
) -> ServiceResult<Vec<u8>>
where
    R: PriceChangeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut query = query_for(&params).unlimited();
    if let Some(limit) = params.limit {
        query = query.limit(limit);
    }

    let logs = repo.list_price_changes(query).map_err(ServiceError::from)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    let header = [
        "fecha",
        "producto",
        "precio_anterior",
        "precio_nuevo",
        "usuario",
        "motivo",
    ];
    writer
        .write_record(header)
        .map_err(|err| csv_failure(&err))?;

    for log in &logs {
        let record = [
            log.changed_at.format("%d/%m/%Y %H:%M").to_string(),
            log.product_name.clone(),
            displays(&log.previous_prices).join(" | "),
            displays(&log.new_prices).join(" | "),
            log.changed_by.clone(),
            log.reason.clone().unwrap_or_default(),
        ];
        writer
            .write_record(&record)
            .map_err(|err| csv_failure(&err))?;
    }

    writer.into_inner().map_err(|err| {
        log::error!("Failed to flush history CSV: {err}");
        ServiceError::Form("No se pudo generar el archivo".to_string())
    })
}

fn csv_failure(err: &csv::Error) -> ServiceError {
    log::error!("Failed to write history CSV: {err}");
    ServiceError::Form("No se pudo generar el archivo".to_string())
}
