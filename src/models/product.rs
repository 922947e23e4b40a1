use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::price::Price;
use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};
use crate::models::{decode_json, encode_json};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub brand_id: i32,
    pub category_id: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// JSON array of price documents.
    pub prices: String,
    pub is_available: bool,
    /// JSON array of strings.
    pub tags: String,
    pub created_by: Option<String>,
    pub last_modified_by: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub brand_id: i32,
    pub category_id: i32,
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub prices: String,
    pub is_available: bool,
    pub tags: String,
    pub created_by: Option<&'a str>,
    pub last_modified_by: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Only the `Some` fields are written.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: Option<&'a str>,
    pub brand_id: Option<i32>,
    pub category_id: Option<i32>,
    pub description: Option<Option<&'a str>>,
    pub image_url: Option<Option<&'a str>>,
    pub prices: Option<String>,
    pub is_available: Option<bool>,
    pub tags: Option<String>,
    pub last_modified_by: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Decodes a stored price list entry by entry.
///
/// A malformed entry becomes [`Price::Unknown`] ("Consultar") without
/// affecting its neighbours; an unreadable column becomes a single unknown
/// price.
pub fn decode_prices(raw: &str) -> Vec<Price> {
    let entries: Vec<serde_json::Value> = decode_json(raw, || vec![serde_json::Value::Null]);

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry).unwrap_or_else(|err| {
                log::warn!("Failed to decode price #{}: {err}", index + 1);
                Price::Unknown
            })
        })
        .collect()
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            name: value.name,
            brand_id: value.brand_id,
            category_id: value.category_id,
            description: value.description,
            image_url: value.image_url,
            prices: decode_prices(&value.prices),
            is_available: value.is_available,
            tags: decode_json(&value.tags, Vec::new),
            created_by: value.created_by,
            last_modified_by: value.last_modified_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            name: value.name.as_str(),
            brand_id: value.brand_id,
            category_id: value.category_id,
            description: value.description.as_deref(),
            image_url: value.image_url.as_deref(),
            prices: encode_json(&value.prices),
            is_available: value.is_available,
            tags: encode_json(&value.tags),
            created_by: value.created_by.as_deref(),
            last_modified_by: value.created_by.as_deref(),
            created_at: value.updated_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            name: value.name.as_deref(),
            brand_id: value.brand_id,
            category_id: value.category_id,
            description: value.description.as_ref().map(|inner| inner.as_deref()),
            image_url: value.image_url.as_ref().map(|inner| inner.as_deref()),
            prices: value.prices.as_ref().map(|prices| encode_json(prices)),
            is_available: value.is_available,
            tags: value.tags.as_ref().map(|tags| encode_json(tags)),
            last_modified_by: value.last_modified_by.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
