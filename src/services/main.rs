use chrono::Local;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::Serialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::brand::BrandListQuery;
use crate::domain::category::CategoryListQuery;
use crate::domain::price_change::{DEFAULT_RECENT_DAYS, PriceChangeListQuery};
use crate::domain::product::ProductListQuery;
use crate::repository::{BrandReader, CategoryReader, PriceChangeReader, ProductReader};
use crate::services::history::PriceChangeView;
use crate::services::{ServiceError, ServiceResult};

/// Number of recent price changes shown on the dashboard.
const DASHBOARD_RECENT_CHANGES: usize = 10;

/// Totals shown on the admin dashboard.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub categories: usize,
    pub brands: usize,
    pub products: usize,
    pub available_products: usize,
    pub unavailable_products: usize,
    /// Price changes in the last [`DEFAULT_RECENT_DAYS`] days.
    pub recent_changes: usize,
}

/// Data required to render the dashboard template.
pub struct DashboardData {
    pub stats: DashboardStats,
    pub recent_changes: Vec<PriceChangeView>,
}

/// Loads the admin dashboard.
pub fn load_dashboard<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DashboardData>
where
    R: CategoryReader + BrandReader + ProductReader + PriceChangeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let categories = repo
        .list_categories(CategoryListQuery::new())
        .map_err(ServiceError::from)?;
    let brands = repo
        .list_brands(BrandListQuery::new())
        .map_err(ServiceError::from)?;
    let (_, products) = repo
        .list_products(ProductListQuery::new())
        .map_err(ServiceError::from)?;
    let recent = repo
        .list_price_changes(
            PriceChangeListQuery::new()
                .recent_days(DEFAULT_RECENT_DAYS)
                .unlimited(),
        )
        .map_err(ServiceError::from)?;

    let available_products = products.iter().filter(|product| product.is_available).count();

    let stats = DashboardStats {
        categories: categories.len(),
        brands: brands.len(),
        products: products.len(),
        available_products,
        unavailable_products: products.len() - available_products,
        recent_changes: recent.len(),
    };

    let now = Local::now().naive_utc();
    let recent_changes = recent
        .into_iter()
        .take(DASHBOARD_RECENT_CHANGES)
        .map(|log| PriceChangeView::new(log, now))
        .collect();

    Ok(DashboardData {
        stats,
        recent_changes,
    })
}
