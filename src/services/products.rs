use std::collections::HashMap;

use chrono::NaiveDateTime;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::{Deserialize, Serialize};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::brand::{Brand, BrandListQuery};
use crate::domain::category::{Category, CategoryListQuery};
use crate::domain::price::{UNKNOWN_PRICE_DISPLAY, get_price_display};
use crate::domain::price_change::{NewPriceChange, PriceChangeListQuery};
use crate::domain::product::{Product, ProductListQuery, UpdateProduct};
use crate::forms::products::{AddProductForm, BulkPriceUpdateForm, EditProductForm};
use crate::repository::{
    BrandReader, CategoryReader, PriceChangeReader, ProductReader, ProductWriter,
};
use crate::services::history::PriceChangeView;
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the products index page.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Page requested by the UI (1-based).
    pub page: Option<usize>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
}

/// View model exposed to the products index template.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub brand_id: i32,
    pub brand_name: Option<String>,
    pub category_id: i32,
    pub category_name: Option<String>,
    pub is_available: bool,
    pub tags: Vec<String>,
    pub price_display: String,
    pub price_type: &'static str,
    pub updated_at: NaiveDateTime,
    pub last_modified_by: Option<String>,
}

impl ProductView {
    fn from_product(
        product: Product,
        brands: &HashMap<i32, &Brand>,
        categories: &HashMap<i32, &Category>,
    ) -> Self {
        let (price_display, price_type) = match product.primary_price() {
            Some(price) => (get_price_display(price), price.type_label()),
            None => (UNKNOWN_PRICE_DISPLAY.to_string(), UNKNOWN_PRICE_DISPLAY),
        };

        Self {
            brand_name: brands.get(&product.brand_id).map(|brand| brand.name.clone()),
            category_name: categories
                .get(&product.category_id)
                .map(|category| category.name.clone()),
            price_display,
            price_type,
            id: product.id,
            name: product.name,
            brand_id: product.brand_id,
            category_id: product.category_id,
            is_available: product.is_available,
            tags: product.tags,
            updated_at: product.updated_at,
            last_modified_by: product.last_modified_by,
        }
    }
}

/// Data required to render the products index template.
pub struct ProductsPageData {
    pub products: Paginated<ProductView>,
    pub search: Option<String>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    /// All categories and brands, for filters and the "Add product" form.
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
}

fn load_lookups<R>(repo: &R) -> ServiceResult<(Vec<Category>, Vec<Brand>)>
where
    R: CategoryReader + BrandReader + ?Sized,
{
    let categories = repo
        .list_categories(CategoryListQuery::new())
        .map_err(ServiceError::from)?;
    let brands = repo
        .list_brands(BrandListQuery::new())
        .map_err(ServiceError::from)?;
    Ok((categories, brands))
}

/// Loads the products overview page.
pub fn load_products_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ProductsQuery,
) -> ServiceResult<ProductsPageData>
where
    R: ProductReader + CategoryReader + BrandReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let ProductsQuery {
        search,
        page,
        category_id,
        brand_id,
    } = query;

    let page = page.unwrap_or(1);
    let mut list_query = ProductListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(search_term) = search.as_deref().filter(|value| !value.trim().is_empty()) {
        list_query = list_query.search(search_term.trim());
    }
    if let Some(category_id) = category_id {
        list_query = list_query.category(category_id);
    }
    if let Some(brand_id) = brand_id {
        list_query = list_query.brand(brand_id);
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;
    let (categories, brands) = load_lookups(repo)?;

    let brand_lookup: HashMap<i32, &Brand> = brands.iter().map(|brand| (brand.id, brand)).collect();
    let category_lookup: HashMap<i32, &Category> = categories
        .iter()
        .map(|category| (category.id, category))
        .collect();

    let views: Vec<ProductView> = items
        .into_iter()
        .map(|product| ProductView::from_product(product, &brand_lookup, &category_lookup))
        .collect();

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let products = Paginated::new(views, page, total_pages);

    Ok(ProductsPageData {
        products,
        search,
        category_id,
        brand_id,
        categories,
        brands,
    })
}

/// Data required to render the product edit page.
pub struct ProductDetailData {
    pub product: Product,
    /// Price list serialized for the price editor.
    pub prices_json: String,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub history: Vec<PriceChangeView>,
}

/// Loads a product with everything the edit page shows.
pub fn load_product_detail<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<ProductDetailData>
where
    R: ProductReader + CategoryReader + BrandReader + PriceChangeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;
    let (categories, brands) = load_lookups(repo)?;

    let now = chrono::Local::now().naive_utc();
    let history = repo
        .list_price_changes(PriceChangeListQuery::new().product(product_id))
        .map_err(ServiceError::from)?
        .into_iter()
        .map(|log| PriceChangeView::new(log, now))
        .collect();

    let prices_json = serde_json::to_string_pretty(&product.prices)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    Ok(ProductDetailData {
        product,
        prices_json,
        categories,
        brands,
        history,
    })
}

fn ensure_references<R>(repo: &R, brand_id: i32, category_id: i32) -> ServiceResult<()>
where
    R: CategoryReader + BrandReader + ?Sized,
{
    if repo
        .get_brand_by_id(brand_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::Form(format!("La marca {brand_id} no existe")));
    }
    if repo
        .get_category_by_id(category_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::Form(format!(
            "La categoría {category_id} no existe"
        )));
    }
    Ok(())
}

/// Creates a new product after checking its brand and category exist.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + CategoryReader + BrandReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_product = form
        .into_new_product(&user.email)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_references(repo, new_product.brand_id, new_product.category_id)?;

    repo.create_product(&new_product)
        .map_err(ServiceError::from)
}

/// Updates a product. A price list that differs from the stored one is
/// recorded in the history with the editor's email and optional reason.
pub fn modify_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + CategoryReader + BrandReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let payload = form
        .into_update_product(&user.email)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let current = repo
        .get_product_by_id(payload.product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let brand_id = payload.update.brand_id.unwrap_or(current.brand_id);
    let category_id = payload.update.category_id.unwrap_or(current.category_id);
    ensure_references(repo, brand_id, category_id)?;

    let price_change = payload.update.prices.as_deref().and_then(|prices| {
        NewPriceChange::between(&current, prices, user.email.as_str())
            .map(|change| change.with_reason(payload.reason.clone()))
    });

    repo.update_product(current.id, &payload.update, price_change)
        .map_err(ServiceError::from)
}

/// Flips whether a product is shown in the public catalog.
pub fn toggle_availability<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let current = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let update = UpdateProduct::new()
        .available(!current.is_available)
        .modified_by(user.email.as_str());

    repo.update_product(current.id, &update, None)
        .map_err(ServiceError::from)
}

/// Applies several price lists at once and returns how many products
/// changed. Each changed product gets its own history entry; missing
/// products and unchanged price lists are skipped.
pub fn bulk_update_prices<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: BulkPriceUpdateForm,
) -> ServiceResult<usize>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (entries, reason) = form
        .into_entries()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let mut updated = 0usize;
    for entry in entries {
        let Some(current) = repo
            .get_product_by_id(entry.product_id)
            .map_err(ServiceError::from)?
        else {
            log::warn!("Skipping bulk price update for missing product {}", entry.product_id);
            continue;
        };

        let Some(change) = NewPriceChange::between(&current, &entry.prices, user.email.as_str())
        else {
            continue;
        };

        let update = UpdateProduct::new()
            .prices(entry.prices)
            .modified_by(user.email.as_str());

        repo.update_product(current.id, &update, Some(change.with_reason(reason.clone())))
            .map_err(ServiceError::from)?;
        updated += 1;
    }

    Ok(updated)
}

/// Deletes a product. Its history is kept.
pub fn remove_product<R>(repo: &R, user: &AuthenticatedUser, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_product(product_id).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::price::{Price, UnitPrice, WeightPrice};
    use crate::domain::price_change::PriceChangeLog;
    use crate::domain::product::NewProduct;
    use crate::forms::products::BulkPriceEntry;
    use crate::repository::mock::{
        MockBrandReader, MockCategoryReader, MockPriceChangeReader, MockProductReader,
        MockProductWriter,
    };
    use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    struct MockProductRepo {
        reader: MockProductReader,
        writer: MockProductWriter,
        categories: MockCategoryReader,
        brands: MockBrandReader,
        history: MockPriceChangeReader,
    }

    impl MockProductRepo {
        fn new() -> Self {
            Self {
                reader: MockProductReader::new(),
                writer: MockProductWriter::new(),
                categories: MockCategoryReader::new(),
                brands: MockBrandReader::new(),
                history: MockPriceChangeReader::new(),
            }
        }

        fn with_references(mut self) -> Self {
            self.brands
                .expect_get_brand_by_id()
                .returning(|id| Ok(Some(sample_brand(id))));
            self.categories
                .expect_get_category_by_id()
                .returning(|id| Ok(Some(sample_category(id))));
            self
        }
    }

    impl ProductReader for MockProductRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
            self.reader.get_product_by_id(id)
        }

        fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)> {
            self.reader.list_products(query)
        }
    }

    impl ProductWriter for MockProductRepo {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
            self.writer.create_product(new_product)
        }

        fn update_product(
            &self,
            product_id: i32,
            updates: &UpdateProduct,
            price_change: Option<NewPriceChange>,
        ) -> RepositoryResult<Product> {
            self.writer.update_product(product_id, updates, price_change)
        }

        fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
            self.writer.delete_product(product_id)
        }
    }

    impl CategoryReader for MockProductRepo {
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>> {
            self.categories.list_categories(query)
        }

        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>> {
            self.categories.get_category_by_id(id)
        }

        fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>> {
            self.categories.get_category_by_slug(slug)
        }
    }

    impl BrandReader for MockProductRepo {
        fn list_brands(&self, query: BrandListQuery) -> RepositoryResult<Vec<Brand>> {
            self.brands.list_brands(query)
        }

        fn get_brand_by_id(&self, id: i32) -> RepositoryResult<Option<Brand>> {
            self.brands.get_brand_by_id(id)
        }
    }

    impl PriceChangeReader for MockProductRepo {
        fn list_price_changes(
            &self,
            query: PriceChangeListQuery,
        ) -> RepositoryResult<Vec<PriceChangeLog>> {
            self.history.list_price_changes(query)
        }
    }

    fn user_with_role(role: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user".to_string(),
            email: "user@example.com".to_string(),
            hub_id: 11,
            name: "User".to_string(),
            roles: vec![role.to_string()],
            exp: 0,
        }
    }

    fn unit(price: i64) -> Price {
        Price::Unit(UnitPrice {
            price,
            unit_label: "unidad".to_string(),
        })
    }

    fn sample_product(id: i32, prices: Vec<Price>) -> Product {
        Product {
            id,
            name: format!("Producto {id}"),
            brand_id: 1,
            category_id: 2,
            description: None,
            image_url: None,
            prices,
            is_available: true,
            tags: Vec::new(),
            created_by: None,
            last_modified_by: None,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn sample_brand(id: i32) -> Brand {
        Brand {
            id,
            name: format!("Marca {id}"),
            description: None,
            logo_url: None,
            is_active: true,
            sort_order: 0,
            created_by: None,
            last_modified_by: None,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn sample_category(id: i32) -> Category {
        Category {
            id,
            name: format!("Categoría {id}"),
            slug: format!("categoria-{id}"),
            description: None,
            icon_name: None,
            image_url: None,
            is_active: true,
            sort_order: 0,
            created_by: None,
            last_modified_by: None,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn edit_form(product_id: i32, prices: &str) -> EditProductForm {
        EditProductForm {
            product_id,
            name: format!("Producto {product_id}"),
            brand_id: 1,
            category_id: 2,
            description: None,
            image_url: None,
            prices: prices.to_string(),
            tags: String::new(),
            is_available: true,
            reason: Some("ajuste".to_string()),
        }
    }

    #[test]
    fn load_products_page_requires_role() {
        let repo = MockProductRepo::new();
        let user = user_with_role("viewer");

        let result = load_products_page(&repo, &user, ProductsQuery::default());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn load_products_page_returns_views() {
        let mut repo = MockProductRepo::new();
        let user = user_with_role(SERVICE_ACCESS_ROLE);

        repo.reader
            .expect_list_products()
            .times(1)
            .returning(|query| {
                assert_eq!(query.category_id, Some(2));
                assert_eq!(query.search.as_deref(), Some("queso"));
                assert!(!query.available_only);
                let pagination = query.pagination.expect("paginated");
                assert_eq!(pagination.page, 1);
                Ok((1, vec![sample_product(5, vec![unit(2500)])]))
            });
        repo.categories
            .expect_list_categories()
            .returning(|_| Ok(vec![sample_category(2)]));
        repo.brands
            .expect_list_brands()
            .returning(|_| Ok(vec![sample_brand(1)]));

        let query = ProductsQuery {
            search: Some(" queso ".to_string()),
            page: None,
            category_id: Some(2),
            brand_id: None,
        };

        let data = load_products_page(&repo, &user, query).expect("expected success");
        let value = serde_json::to_value(&data.products).expect("serialize");
        let items = value["items"].as_array().expect("items array");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["price_display"], "$2.500 / unidad");
        assert_eq!(items[0]["price_type"], "Por unidad");
        assert_eq!(items[0]["brand_name"], "Marca 1");
        assert_eq!(items[0]["category_name"], "Categoría 2");
    }

    #[test]
    fn create_product_rejects_unknown_brand() {
        let mut repo = MockProductRepo::new();
        let user = user_with_role(SERVICE_ACCESS_ROLE);

        repo.brands.expect_get_brand_by_id().returning(|_| Ok(None));
        repo.writer.expect_create_product().times(0);

        let form = AddProductForm {
            name: "Yerba".to_string(),
            brand_id: 99,
            category_id: 2,
            description: None,
            image_url: None,
            prices: r#"[{"type":"unit","price":3000,"unitLabel":"kg"}]"#.to_string(),
            tags: String::new(),
            is_available: true,
        };

        let result = create_product(&repo, &user, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn create_product_persists_product() {
        let mut repo = MockProductRepo::new().with_references();
        let user = user_with_role(SERVICE_ACCESS_ROLE);

        repo.writer
            .expect_create_product()
            .times(1)
            .withf(|new_product| {
                new_product.name == "Yerba"
                    && new_product.prices.len() == 1
                    && new_product.created_by.as_deref() == Some("user@example.com")
            })
            .returning(|_| Ok(sample_product(7, vec![unit(3000)])));

        let form = AddProductForm {
            name: "Yerba".to_string(),
            brand_id: 1,
            category_id: 2,
            description: None,
            image_url: None,
            prices: r#"[{"type":"unit","price":3000,"unitLabel":"kg"}]"#.to_string(),
            tags: "mate".to_string(),
            is_available: true,
        };

        let created = create_product(&repo, &user, form).expect("expected success");

        assert_eq!(created.id, 7);
    }

    #[test]
    fn modify_product_records_price_change() {
        let mut repo = MockProductRepo::new().with_references();
        let user = user_with_role(SERVICE_ACCESS_ROLE);

        repo.reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, vec![unit(1000)]))));
        repo.writer
            .expect_update_product()
            .times(1)
            .withf(|product_id, updates, price_change| {
                let change = price_change.as_ref().expect("history entry");
                *product_id == 3
                    && updates.prices == Some(vec![unit(1500)])
                    && change.previous_prices == vec![unit(1000)]
                    && change.new_prices == vec![unit(1500)]
                    && change.changed_by == "user@example.com"
                    && change.reason.as_deref() == Some("ajuste")
            })
            .returning(|id, _, _| Ok(sample_product(id, vec![unit(1500)])));

        let form = edit_form(3, r#"[{"type":"unit","price":1500,"unitLabel":"unidad"}]"#);

        let updated = modify_product(&repo, &user, form).expect("expected success");

        assert_eq!(updated.prices, vec![unit(1500)]);
    }

    #[test]
    fn modify_product_without_price_change_skips_history() {
        let mut repo = MockProductRepo::new().with_references();
        let user = user_with_role(SERVICE_ACCESS_ROLE);

        repo.reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, vec![unit(1000)]))));
        repo.writer
            .expect_update_product()
            .times(1)
            .withf(|_, _, price_change| price_change.is_none())
            .returning(|id, _, _| Ok(sample_product(id, vec![unit(1000)])));

        let form = edit_form(3, r#"[{"type":"unit","price":1000,"unitLabel":"unidad"}]"#);

        assert!(modify_product(&repo, &user, form).is_ok());
    }

    #[test]
    fn modify_product_reports_missing_product() {
        let mut repo = MockProductRepo::new();
        let user = user_with_role(SERVICE_ACCESS_ROLE);

        repo.reader.expect_get_product_by_id().returning(|_| Ok(None));

        let form = edit_form(3, r#"[{"type":"unit","price":1000,"unitLabel":"unidad"}]"#);

        assert!(matches!(
            modify_product(&repo, &user, form),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn toggle_availability_flips_flag() {
        let mut repo = MockProductRepo::new();
        let user = user_with_role(SERVICE_ACCESS_ROLE);

        repo.reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, vec![unit(1000)]))));
        repo.writer
            .expect_update_product()
            .times(1)
            .withf(|_, updates, price_change| {
                updates.is_available == Some(false)
                    && updates.prices.is_none()
                    && price_change.is_none()
            })
            .returning(|id, _, _| {
                let mut product = sample_product(id, vec![unit(1000)]);
                product.is_available = false;
                Ok(product)
            });

        let product = toggle_availability(&repo, &user, 4).expect("expected success");

        assert!(!product.is_available);
    }

    #[test]
    fn bulk_update_counts_changed_products_only() {
        let mut repo = MockProductRepo::new();
        let user = user_with_role(SERVICE_ACCESS_ROLE);

        repo.reader.expect_get_product_by_id().returning(|id| match id {
            1 => Ok(Some(sample_product(1, vec![unit(1000)]))),
            2 => Ok(Some(sample_product(2, vec![unit(2000)]))),
            _ => Ok(None),
        });
        repo.writer
            .expect_update_product()
            .times(1)
            .withf(|product_id, _, price_change| *product_id == 1 && price_change.is_some())
            .returning(|id, _, _| Ok(sample_product(id, vec![unit(1100)])));

        let form = BulkPriceUpdateForm {
            updates: vec![
                BulkPriceEntry {
                    product_id: 1,
                    prices: vec![unit(1100)],
                },
                BulkPriceEntry {
                    product_id: 2,
                    prices: vec![unit(2000)],
                },
                BulkPriceEntry {
                    product_id: 3,
                    prices: vec![Price::Weight(WeightPrice {
                        price_per_kg: 9000,
                        available_weights: vec![500],
                    })],
                },
            ],
            reason: Some("lista nueva".to_string()),
        };

        let updated = bulk_update_prices(&repo, &user, form).expect("expected success");

        assert_eq!(updated, 1);
    }

    #[test]
    fn remove_product_propagates_not_found() {
        let mut repo = MockProductRepo::new();
        let user = user_with_role(SERVICE_ACCESS_ROLE);

        repo.writer
            .expect_delete_product()
            .returning(|_| Err(RepositoryError::NotFound));

        assert!(matches!(
            remove_product(&repo, &user, 1),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn load_product_detail_serializes_prices_for_editor() {
        let mut repo = MockProductRepo::new();
        let user = user_with_role(SERVICE_ACCESS_ROLE);

        repo.reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, vec![unit(1000)]))));
        repo.categories.expect_list_categories().returning(|_| Ok(Vec::new()));
        repo.brands.expect_list_brands().returning(|_| Ok(Vec::new()));
        repo.history
            .expect_list_price_changes()
            .withf(|query| query.product_id == Some(8))
            .returning(|_| Ok(Vec::new()));

        let detail = load_product_detail(&repo, &user, 8).expect("expected success");

        assert!(detail.prices_json.contains("\"unitLabel\": \"unidad\""));
        assert!(detail.history.is_empty());
    }
}
