use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::price::Price;
use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{optional_inline, optional_multiline, sanitize_inline_text};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = 4096;
const URL_MAX_LEN_VALIDATOR: u64 = 512;
const REASON_MAX_LEN_VALIDATOR: u64 = 512;

/// Maximum length of a single tag after sanitization.
const TAG_MAX_LEN: usize = 48;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// Brand or category identifiers must be positive.
    #[error("invalid {field} identifier `{value}`")]
    InvalidIdentifier { field: &'static str, value: i32 },
    /// The price list is empty.
    #[error("a product needs at least one price")]
    EmptyPrices,
    /// The price list is not a JSON array of price documents.
    #[error("invalid prices: {0}")]
    InvalidPrices(String),
    /// A price document has no recognised `type`.
    #[error("price #{position} has an unknown type")]
    UnknownPriceType { position: usize },
    /// Amounts must be non-negative.
    #[error("price #{position} has a negative amount")]
    NegativeAmount { position: usize },
    /// Unit and fraction labels are required.
    #[error("price #{position} is missing its label")]
    EmptyLabel { position: usize },
    /// Weight prices need at least one break-point.
    #[error("price #{position} has no available weights")]
    EmptyWeights { position: usize },
    /// Weight break-points must be positive.
    #[error("price #{position} has a zero weight")]
    InvalidWeight { position: usize },
}

/// Parse the JSON price list submitted by the admin editor and validate it.
pub fn parse_prices(raw: &str) -> ProductFormResult<Vec<Price>> {
    let prices: Vec<Price> = serde_json::from_str(raw.trim())
        .map_err(|err| ProductFormError::InvalidPrices(err.to_string()))?;

    validate_prices(prices)
}

/// Check every price in order and normalize it for storage.
///
/// Positions in errors are 1-based, matching the editor rows. Weight
/// break-points are sorted ascending and deduplicated.
pub fn validate_prices(prices: Vec<Price>) -> ProductFormResult<Vec<Price>> {
    if prices.is_empty() {
        return Err(ProductFormError::EmptyPrices);
    }

    prices
        .into_iter()
        .enumerate()
        .map(|(index, price)| validate_price(index + 1, price))
        .collect()
}

fn validate_price(position: usize, price: Price) -> ProductFormResult<Price> {
    match price {
        Price::Unit(mut unit) => {
            if unit.price < 0 {
                return Err(ProductFormError::NegativeAmount { position });
            }
            unit.unit_label = sanitize_inline_text(&unit.unit_label);
            if unit.unit_label.is_empty() {
                return Err(ProductFormError::EmptyLabel { position });
            }
            Ok(Price::Unit(unit))
        }
        Price::Weight(mut weight) => {
            if weight.price_per_kg < 0 {
                return Err(ProductFormError::NegativeAmount { position });
            }
            if weight.available_weights.is_empty() {
                return Err(ProductFormError::EmptyWeights { position });
            }
            if weight.available_weights.contains(&0) {
                return Err(ProductFormError::InvalidWeight { position });
            }
            weight.available_weights.sort_unstable();
            weight.available_weights.dedup();
            Ok(Price::Weight(weight))
        }
        Price::Fraction(mut fraction) => {
            let amounts = &fraction.prices;
            let negative = amounts.whole < 0
                || amounts.half.is_some_and(|half| half < 0)
                || amounts.quarter.is_some_and(|quarter| quarter < 0);
            if negative {
                return Err(ProductFormError::NegativeAmount { position });
            }
            fraction.fraction_label = sanitize_inline_text(&fraction.fraction_label);
            if fraction.fraction_label.is_empty() {
                return Err(ProductFormError::EmptyLabel { position });
            }
            // A zero fraction means "not sold" and is stored as absent.
            fraction.prices.half = fraction.prices.half.filter(|half| *half > 0);
            fraction.prices.quarter = fraction.prices.quarter.filter(|quarter| *quarter > 0);
            Ok(Price::Fraction(fraction))
        }
        Price::Unknown => Err(ProductFormError::UnknownPriceType { position }),
    }
}

/// Split a comma separated tag list, dropping blanks and duplicates.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',') {
        let tag: String = sanitize_inline_text(tag).chars().take(TAG_MAX_LEN).collect();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

fn ensure_identifier(field: &'static str, value: i32) -> ProductFormResult<i32> {
    if value <= 0 {
        return Err(ProductFormError::InvalidIdentifier { field, value });
    }
    Ok(value)
}

/// Form payload emitted when submitting the "Add product" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    pub brand_id: i32,
    pub category_id: i32,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(max = URL_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub image_url: Option<String>,
    /// JSON array of price documents produced by the price editor.
    pub prices: String,
    /// Comma separated tags.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub is_available: bool,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self, created_by: &str) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let brand_id = ensure_identifier("brand", self.brand_id)?;
        let category_id = ensure_identifier("category", self.category_id)?;
        let prices = parse_prices(&self.prices)?;

        let mut new_product = NewProduct::new(name, brand_id, category_id, prices)
            .with_tags(parse_tags(&self.tags))
            .created_by(created_by);

        if let Some(description) = optional_multiline(self.description.as_deref()) {
            new_product = new_product.with_description(description);
        }
        if let Some(image_url) = optional_inline(self.image_url.as_deref()) {
            new_product = new_product.with_image_url(image_url);
        }
        if !self.is_available {
            new_product = new_product.unavailable();
        }

        Ok(new_product)
    }
}

/// Normalized payload produced by the "Edit product" form.
#[derive(Debug)]
pub struct EditProductPayload {
    pub product_id: i32,
    pub update: UpdateProduct,
    /// Optional note stored with the price history entry.
    pub reason: Option<String>,
}

/// Form payload emitted when editing an existing product.
#[derive(Debug, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    pub brand_id: i32,
    pub category_id: i32,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(max = URL_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub image_url: Option<String>,
    pub prices: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub is_available: bool,
    #[validate(length(max = REASON_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub reason: Option<String>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a full `UpdateProduct` patch.
    pub fn into_update_product(self, modified_by: &str) -> ProductFormResult<EditProductPayload> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let brand_id = ensure_identifier("brand", self.brand_id)?;
        let category_id = ensure_identifier("category", self.category_id)?;
        let prices = parse_prices(&self.prices)?;

        let update = UpdateProduct::new()
            .name(name)
            .brand_id(brand_id)
            .category_id(category_id)
            .description(optional_multiline(self.description.as_deref()))
            .image_url(optional_inline(self.image_url.as_deref()))
            .prices(prices)
            .available(self.is_available)
            .tags(parse_tags(&self.tags))
            .modified_by(modified_by);

        Ok(EditProductPayload {
            product_id: self.product_id,
            update,
            reason: optional_inline(self.reason.as_deref()),
        })
    }
}

/// Form payload for flipping a product's availability.
#[derive(Debug, Deserialize)]
pub struct ToggleAvailabilityForm {
    pub product_id: i32,
}

/// One entry of a bulk price update.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkPriceEntry {
    pub product_id: i32,
    pub prices: Vec<Price>,
}

/// JSON body accepted by the bulk price update endpoint.
#[derive(Debug, Deserialize)]
pub struct BulkPriceUpdateForm {
    pub updates: Vec<BulkPriceEntry>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl BulkPriceUpdateForm {
    /// Validate every entry; the first invalid entry rejects the whole batch.
    pub fn into_entries(self) -> ProductFormResult<(Vec<BulkPriceEntry>, Option<String>)> {
        let entries = self
            .updates
            .into_iter()
            .map(|entry| {
                let product_id = ensure_identifier("product", entry.product_id)?;
                let prices = validate_prices(entry.prices)?;
                Ok(BulkPriceEntry { product_id, prices })
            })
            .collect::<ProductFormResult<Vec<_>>>()?;

        Ok((entries, optional_inline(self.reason.as_deref())))
    }
}
