use std::collections::HashMap;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::{Deserialize, Serialize};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::category::{Category, CategoryListQuery};
use crate::domain::integrity::ensure_category_unreferenced;
use crate::domain::product::ProductListQuery;
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the categories admin page.
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesQuery {
    pub search: Option<String>,
}

/// A category row with the number of products filed under it.
#[derive(Debug, Serialize)]
pub struct CategoryRow {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: usize,
}

/// Data required to render the categories admin template.
pub struct CategoriesPageData {
    pub categories: Vec<CategoryRow>,
    pub search: Option<String>,
}

/// Loads every category, active or not, with its product count.
pub fn load_categories<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: CategoriesQuery,
) -> ServiceResult<CategoriesPageData>
where
    R: CategoryReader + ProductReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut list_query = CategoryListQuery::new();
    if let Some(search) = query.search.as_deref().filter(|value| !value.trim().is_empty()) {
        list_query = list_query.search(search.trim());
    }

    let categories = repo.list_categories(list_query).map_err(ServiceError::from)?;
    let (_, products) = repo
        .list_products(ProductListQuery::new())
        .map_err(ServiceError::from)?;

    let mut counts: HashMap<i32, usize> = HashMap::new();
    for product in &products {
        *counts.entry(product.category_id).or_default() += 1;
    }

    let categories = categories
        .into_iter()
        .map(|category| CategoryRow {
            product_count: counts.get(&category.id).copied().unwrap_or_default(),
            category,
        })
        .collect();

    Ok(CategoriesPageData {
        categories,
        search: query.search,
    })
}

/// Creates a new category; a taken slug yields `Conflict`.
pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_category = form
        .into_new_category(&user.email)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_category_by_slug(&new_category.slug)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::Conflict);
    }

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}

/// Updates an existing category; the slug may not collide with another one.
pub fn modify_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let payload = form
        .into_update_category(&user.email)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_category_by_id(payload.category_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let taken = repo
        .get_category_by_slug(&payload.update.slug)
        .map_err(ServiceError::from)?
        .is_some_and(|existing| existing.id != payload.category_id);
    if taken {
        return Err(ServiceError::Conflict);
    }

    repo.update_category(payload.category_id, &payload.update)
        .map_err(ServiceError::from)
}

/// Deletes a category nobody references. Referenced categories yield
/// `Conflict` and are left untouched.
pub fn remove_category<R>(repo: &R, user: &AuthenticatedUser, category_id: i32) -> ServiceResult<()>
where
    R: CategoryWriter + ProductReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (_, products) = repo
        .list_products(ProductListQuery::new())
        .map_err(ServiceError::from)?;

    if let Err(err) = ensure_category_unreferenced(&products, category_id) {
        log::info!("Refusing to delete category {category_id}: {err}");
        return Err(ServiceError::Conflict);
    }

    repo.delete_category(category_id).map_err(ServiceError::from)
}
