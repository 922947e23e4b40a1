use std::collections::HashMap;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::{Deserialize, Serialize};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::brand::{Brand, BrandListQuery};
use crate::domain::integrity::ensure_brand_unreferenced;
use crate::domain::product::ProductListQuery;
use crate::forms::brands::{AddBrandForm, EditBrandForm};
use crate::repository::{BrandReader, BrandWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the brands admin page.
#[derive(Debug, Default, Deserialize)]
pub struct BrandsQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BrandRow {
    #[serde(flatten)]
    pub brand: Brand,
    pub product_count: usize,
}

pub struct BrandsPageData {
    pub brands: Vec<BrandRow>,
    pub search: Option<String>,
}

/// Loads every brand with its product count.
pub fn load_brands<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: BrandsQuery,
) -> ServiceResult<BrandsPageData>
where
    R: BrandReader + ProductReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut list_query = BrandListQuery::new();
    if let Some(search) = query.search.as_deref().filter(|value| !value.trim().is_empty()) {
        list_query = list_query.search(search.trim());
    }

    let brands = repo.list_brands(list_query).map_err(ServiceError::from)?;
    let (_, products) = repo
        .list_products(ProductListQuery::new())
        .map_err(ServiceError::from)?;

    let mut counts: HashMap<i32, usize> = HashMap::new();
    for product in &products {
        *counts.entry(product.brand_id).or_default() += 1;
    }

    let brands = brands
        .into_iter()
        .map(|brand| BrandRow {
            product_count: counts.get(&brand.id).copied().unwrap_or_default(),
            brand,
        })
        .collect();

    Ok(BrandsPageData {
        brands,
        search: query.search,
    })
}

pub fn create_brand<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddBrandForm,
) -> ServiceResult<Brand>
where
    R: BrandWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_brand = form
        .into_new_brand(&user.email)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_brand(&new_brand).map_err(ServiceError::from)
}

pub fn modify_brand<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditBrandForm,
) -> ServiceResult<Brand>
where
    R: BrandWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let payload = form
        .into_update_brand(&user.email)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_brand(payload.brand_id, &payload.update)
        .map_err(ServiceError::from)
}

/// Deletes a brand no product references; otherwise `Conflict`.
pub fn remove_brand<R>(repo: &R, user: &AuthenticatedUser, brand_id: i32) -> ServiceResult<()>
where
    R: BrandWriter + ProductReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (_, products) = repo
        .list_products(ProductListQuery::new())
        .map_err(ServiceError::from)?;

    if let Err(err) = ensure_brand_unreferenced(&products, brand_id) {
        log::info!("Refusing to delete brand {brand_id}: {err}");
        return Err(ServiceError::Conflict);
    }

    repo.delete_brand(brand_id).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::domain::brand::{NewBrand, UpdateBrand};
    use crate::domain::product::Product;
    use crate::repository::mock::{MockBrandReader, MockBrandWriter, MockProductReader};
    use pushkind_common::repository::errors::RepositoryResult;

    struct MockBrandRepo {
        reader: MockBrandReader,
        writer: MockBrandWriter,
        products: MockProductReader,
    }

    impl MockBrandRepo {
        fn new() -> Self {
            Self {
                reader: MockBrandReader::new(),
                writer: MockBrandWriter::new(),
                products: MockProductReader::new(),
            }
        }
    }

    impl BrandReader for MockBrandRepo {
        fn list_brands(&self, query: BrandListQuery) -> RepositoryResult<Vec<Brand>> {
            self.reader.list_brands(query)
        }

        fn get_brand_by_id(&self, id: i32) -> RepositoryResult<Option<Brand>> {
            self.reader.get_brand_by_id(id)
        }
    }

    impl BrandWriter for MockBrandRepo {
        fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<Brand> {
            self.writer.create_brand(new_brand)
        }

        fn update_brand(&self, brand_id: i32, updates: &UpdateBrand) -> RepositoryResult<Brand> {
            self.writer.update_brand(brand_id, updates)
        }

        fn delete_brand(&self, brand_id: i32) -> RepositoryResult<()> {
            self.writer.delete_brand(brand_id)
        }
    }

    impl ProductReader for MockBrandRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
            self.products.get_product_by_id(id)
        }

        fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)> {
            self.products.list_products(query)
        }
    }

    fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".to_string(),
            email: "user@example.com".to_string(),
            hub_id: 9,
            name: "Tester".to_string(),
            roles: roles.iter().map(|role| (*role).to_string()).collect(),
            exp: 0,
        }
    }

    fn sample_brand(id: i32, name: &str) -> Brand {
        Brand {
            id,
            name: name.to_string(),
            description: None,
            logo_url: None,
            is_active: true,
            sort_order: 0,
            created_by: None,
            last_modified_by: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn sample_product(id: i32, brand_id: i32) -> Product {
        Product {
            id,
            name: format!("Producto {id}"),
            brand_id,
            category_id: 1,
            description: None,
            image_url: None,
            prices: Vec::new(),
            is_available: true,
            tags: Vec::new(),
            created_by: None,
            last_modified_by: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn load_brands_counts_products() {
        let mut repo = MockBrandRepo::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.reader
            .expect_list_brands()
            .returning(|_| Ok(vec![sample_brand(1, "Paladini"), sample_brand(2, "Sancor")]));
        repo.products
            .expect_list_products()
            .returning(|_| Ok((2, vec![sample_product(1, 2), sample_product(2, 2)])));

        let data = load_brands(&repo, &user, BrandsQuery::default()).expect("expected success");

        assert_eq!(data.brands[0].product_count, 0);
        assert_eq!(data.brands[1].product_count, 2);
    }

    #[test]
    fn create_brand_requires_role() {
        let repo = MockBrandRepo::new();
        let user = user_with_roles(&["viewer"]);
        let form = AddBrandForm {
            name: "Sancor".to_string(),
            description: None,
            logo_url: None,
            sort_order: 0,
            is_active: true,
        };

        let result = create_brand(&repo, &user, form);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn create_brand_stamps_creator() {
        let mut repo = MockBrandRepo::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.writer
            .expect_create_brand()
            .times(1)
            .withf(|new_brand| {
                new_brand.name == "Sancor"
                    && new_brand.created_by.as_deref() == Some("user@example.com")
            })
            .returning(|_| Ok(sample_brand(3, "Sancor")));

        let form = AddBrandForm {
            name: " Sancor ".to_string(),
            description: None,
            logo_url: None,
            sort_order: 0,
            is_active: true,
        };

        let brand = create_brand(&repo, &user, form).expect("expected success");

        assert_eq!(brand.id, 3);
    }

    #[test]
    fn modify_brand_validates_form() {
        let repo = MockBrandRepo::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);
        let form = EditBrandForm {
            brand_id: 3,
            name: "  ".to_string(),
            description: None,
            logo_url: None,
            sort_order: 0,
            is_active: true,
        };

        let result = modify_brand(&repo, &user, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn remove_brand_refuses_referenced_brand() {
        let mut repo = MockBrandRepo::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.products
            .expect_list_products()
            .returning(|_| Ok((1, vec![sample_product(1, 4)])));
        repo.writer.expect_delete_brand().times(0);

        let result = remove_brand(&repo, &user, 4);

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn remove_brand_deletes_unreferenced_brand() {
        let mut repo = MockBrandRepo::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.products
            .expect_list_products()
            .returning(|_| Ok((0, Vec::new())));
        repo.writer
            .expect_delete_brand()
            .times(1)
            .returning(|_| Ok(()));

        assert!(remove_brand(&repo, &user, 4).is_ok());
    }
}
