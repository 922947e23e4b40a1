use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::brand::{NewBrand, UpdateBrand};
use crate::forms::{optional_inline, optional_multiline, sanitize_inline_text};

const NAME_MAX_LEN_VALIDATOR: u64 = 128;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = 2048;
const URL_MAX_LEN_VALIDATOR: u64 = 512;

pub type BrandFormResult<T> = Result<T, BrandFormError>;

#[derive(Debug, Error)]
pub enum BrandFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("brand name cannot be empty")]
    EmptyName,
}

/// Form payload emitted when submitting the "Add brand" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddBrandForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(max = URL_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_active: bool,
}

impl AddBrandForm {
    pub fn into_new_brand(self, created_by: &str) -> BrandFormResult<NewBrand> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(BrandFormError::EmptyName);
        }

        let mut new_brand = NewBrand::new(name)
            .with_sort_order(self.sort_order)
            .created_by(created_by);
        if let Some(description) = optional_multiline(self.description.as_deref()) {
            new_brand = new_brand.with_description(description);
        }
        if let Some(logo_url) = optional_inline(self.logo_url.as_deref()) {
            new_brand = new_brand.with_logo_url(logo_url);
        }
        if !self.is_active {
            new_brand = new_brand.inactive();
        }

        Ok(new_brand)
    }
}

#[derive(Debug)]
pub struct EditBrandPayload {
    pub brand_id: i32,
    pub update: UpdateBrand,
}

/// Form payload emitted when editing an existing brand.
#[derive(Debug, Deserialize, Validate)]
pub struct EditBrandForm {
    #[validate(range(min = 1))]
    pub brand_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(max = URL_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_active: bool,
}

impl EditBrandForm {
    pub fn into_update_brand(self, modified_by: &str) -> BrandFormResult<EditBrandPayload> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(BrandFormError::EmptyName);
        }

        let update = UpdateBrand::new(name, self.is_active)
            .with_description(optional_multiline(self.description.as_deref()))
            .with_logo_url(optional_inline(self.logo_url.as_deref()))
            .with_sort_order(self.sort_order)
            .modified_by(modified_by);

        Ok(EditBrandPayload {
            brand_id: self.brand_id,
            update,
        })
    }
}
