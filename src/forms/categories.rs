use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::domain::search::slugify;
use crate::forms::{optional_inline, optional_multiline, sanitize_inline_text};

/// Maximum length allowed for a category name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum length allowed for a category description.
const DESCRIPTION_MAX_LEN: usize = 2048;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

const URL_MAX_LEN_VALIDATOR: u64 = 512;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("category name cannot be empty")]
    EmptyName,
    /// Neither the slug nor the name yield any URL-safe character.
    #[error("category slug cannot be empty")]
    EmptySlug,
}

/// Form payload emitted when submitting the "Add category" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional explicit slug; derived from the name when blank.
    #[serde(default)]
    pub slug: Option<String>,
    /// Optional description for the category.
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_name: Option<String>,
    #[validate(length(max = URL_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_active: bool,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self, created_by: &str) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        let slug = resolve_slug(self.slug.as_deref(), &name)?;

        let mut new_category = NewCategory::new(name, slug)
            .with_sort_order(self.sort_order)
            .created_by(created_by);
        if let Some(description) = optional_multiline(self.description.as_deref()) {
            new_category = new_category.with_description(description);
        }
        if let Some(icon_name) = optional_inline(self.icon_name.as_deref()) {
            new_category = new_category.with_icon_name(icon_name);
        }
        if let Some(image_url) = optional_inline(self.image_url.as_deref()) {
            new_category = new_category.with_image_url(image_url);
        }
        if !self.is_active {
            new_category = new_category.inactive();
        }

        Ok(new_category)
    }
}

/// Normalized payload produced by the "Edit category" form.
#[derive(Debug)]
pub struct EditCategoryPayload {
    /// Identifier of the category to update.
    pub category_id: i32,
    /// Replacement values for the category.
    pub update: UpdateCategory,
}

/// Form payload emitted when editing an existing category.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCategoryForm {
    /// Identifier of the category to update.
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_name: Option<String>,
    #[validate(length(max = URL_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_active: bool,
}

impl EditCategoryForm {
    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(
        self,
        modified_by: &str,
    ) -> CategoryFormResult<EditCategoryPayload> {
        self.validate()?;

        let EditCategoryForm {
            category_id,
            name,
            slug,
            description,
            icon_name,
            image_url,
            sort_order,
            is_active,
        } = self;

        let name = sanitize_inline_text(&name);
        if name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        let slug = resolve_slug(slug.as_deref(), &name)?;

        let update = UpdateCategory::new(name, slug, is_active)
            .with_description(optional_multiline(description.as_deref()))
            .with_icon_name(optional_inline(icon_name.as_deref()))
            .with_image_url(optional_inline(image_url.as_deref()))
            .with_sort_order(sort_order)
            .modified_by(modified_by);

        Ok(EditCategoryPayload {
            category_id,
            update,
        })
    }
}

/// An explicit slug is normalized too, so hand-typed values stay URL-safe.
fn resolve_slug(explicit: Option<&str>, name: &str) -> CategoryFormResult<String> {
    let source = match explicit.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => name,
    };

    let slug = slugify(source);
    if slug.is_empty() {
        return Err(CategoryFormError::EmptySlug);
    }

    Ok(slug)
}
