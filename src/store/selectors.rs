//! Pure projections of a [`CatalogState`] used to render the catalog.
//!
//! Nothing here is cached: every call recomputes from the current state.

use std::collections::{HashMap, HashSet};

use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::search::SearchNeedle;
use crate::store::catalog::CatalogState;

/// True when the trimmed search query is non-empty.
pub fn is_searching(state: &CatalogState) -> bool {
    !state.search_query.trim().is_empty()
}

/// Products matching the search query by name, brand, category or tag.
///
/// Without a query every product is returned; order is always preserved.
pub fn filtered_products(state: &CatalogState) -> Vec<&Product> {
    let needle = SearchNeedle::new(&state.search_query);
    if needle.is_empty() {
        return state.products.iter().collect();
    }

    let brand_names: HashMap<i32, &str> = state
        .brands
        .iter()
        .map(|brand| (brand.id, brand.name.as_str()))
        .collect();
    let category_names: HashMap<i32, &str> = state
        .categories
        .iter()
        .map(|category| (category.id, category.name.as_str()))
        .collect();

    state
        .products
        .iter()
        .filter(|product| {
            needle.matches(&product.name)
                || brand_names
                    .get(&product.brand_id)
                    .is_some_and(|name| needle.matches(name))
                || category_names
                    .get(&product.category_id)
                    .is_some_and(|name| needle.matches(name))
                || product.tags.iter().any(|tag| needle.matches(tag))
        })
        .collect()
}

pub fn products_by_category(state: &CatalogState, category_id: i32) -> Vec<&Product> {
    state
        .products
        .iter()
        .filter(|product| product.category_id == category_id)
        .collect()
}

pub fn products_by_brand(state: &CatalogState, brand_id: i32) -> Vec<&Product> {
    state
        .products
        .iter()
        .filter(|product| product.brand_id == brand_id)
        .collect()
}

pub fn products_by_category_and_brand(
    state: &CatalogState,
    category_id: i32,
    brand_id: i32,
) -> Vec<&Product> {
    state
        .products
        .iter()
        .filter(|product| product.category_id == category_id && product.brand_id == brand_id)
        .collect()
}

/// Brands with at least one product in `category_id`, in brand order.
pub fn brands_by_category(state: &CatalogState, category_id: i32) -> Vec<&Brand> {
    let brand_ids: HashSet<i32> = state
        .products
        .iter()
        .filter(|product| product.category_id == category_id)
        .map(|product| product.brand_id)
        .collect();

    state
        .brands
        .iter()
        .filter(|brand| brand_ids.contains(&brand.id))
        .collect()
}

pub fn is_category_expanded(state: &CatalogState, category_id: i32) -> bool {
    state.expanded_categories.contains(&category_id)
}

pub fn is_brand_expanded(state: &CatalogState, brand_id: i32) -> bool {
    state.expanded_brands.contains(&brand_id)
}

/// A brand and its products inside one category section.
#[derive(Debug)]
pub struct BrandSection<'a> {
    pub brand: &'a Brand,
    pub products: Vec<&'a Product>,
    pub expanded: bool,
}

/// One accordion entry of the grouped catalog.
#[derive(Debug)]
pub struct CategorySection<'a> {
    pub category: &'a Category,
    pub brands: Vec<BrandSection<'a>>,
    pub product_count: usize,
    pub expanded: bool,
}

/// Categories → brands → products, as rendered when not searching.
pub fn catalog_sections(state: &CatalogState) -> Vec<CategorySection<'_>> {
    state
        .categories
        .iter()
        .map(|category| {
            let brands: Vec<BrandSection<'_>> = brands_by_category(state, category.id)
                .into_iter()
                .map(|brand| BrandSection {
                    brand,
                    products: products_by_category_and_brand(state, category.id, brand.id),
                    expanded: is_brand_expanded(state, brand.id),
                })
                .collect();
            let product_count = brands.iter().map(|brand| brand.products.len()).sum();

            CategorySection {
                category,
                brands,
                product_count,
                expanded: is_category_expanded(state, category.id),
            }
        })
        .collect()
}
