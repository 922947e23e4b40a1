use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::brand::{Brand, BrandListQuery, NewBrand, UpdateBrand};
use crate::domain::category::{Category, CategoryListQuery, NewCategory, UpdateCategory};
use crate::domain::price_change::{NewPriceChange, PriceChangeListQuery, PriceChangeLog};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};

pub mod brand;
pub mod category;
pub mod price_change;
pub mod product;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over category records.
pub trait CategoryReader {
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
}

/// Write operations over category records.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over brand records.
pub trait BrandReader {
    fn list_brands(&self, query: BrandListQuery) -> RepositoryResult<Vec<Brand>>;
    fn get_brand_by_id(&self, id: i32) -> RepositoryResult<Option<Brand>>;
}

/// Write operations over brand records.
pub trait BrandWriter {
    fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<Brand>;
    fn update_brand(&self, brand_id: i32, updates: &UpdateBrand) -> RepositoryResult<Brand>;
    fn delete_brand(&self, brand_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    /// Apply `updates` and, when given, record `price_change` atomically with it.
    fn update_product(
        &self,
        product_id: i32,
        updates: &UpdateProduct,
        price_change: Option<NewPriceChange>,
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Read-only access to the price history.
pub trait PriceChangeReader {
    fn list_price_changes(
        &self,
        query: PriceChangeListQuery,
    ) -> RepositoryResult<Vec<PriceChangeLog>>;
}
