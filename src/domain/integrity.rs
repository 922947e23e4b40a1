//! Delete guards for categories and brands still referenced by products.
//!
//! The store has no foreign keys between products and their brand/category,
//! so callers must run these checks before deleting. They are advisory: two
//! admins editing concurrently can still race past them.

use thiserror::Error;

use crate::domain::product::Product;

/// A delete refused because products still reference the target.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("cannot delete: {products} products exist in this category")]
    CategoryInUse { category_id: i32, products: usize },
    #[error("cannot delete: {products} products exist in this brand")]
    BrandInUse { brand_id: i32, products: usize },
}

pub fn ensure_category_unreferenced(
    products: &[Product],
    category_id: i32,
) -> Result<(), IntegrityError> {
    let count = products
        .iter()
        .filter(|product| product.category_id == category_id)
        .count();

    if count > 0 {
        return Err(IntegrityError::CategoryInUse {
            category_id,
            products: count,
        });
    }

    Ok(())
}

pub fn ensure_brand_unreferenced(
    products: &[Product],
    brand_id: i32,
) -> Result<(), IntegrityError> {
    let count = products
        .iter()
        .filter(|product| product.brand_id == brand_id)
        .count();

    if count > 0 {
        return Err(IntegrityError::BrandInUse {
            brand_id,
            products: count,
        });
    }

    Ok(())
}
