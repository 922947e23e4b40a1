use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Top-level grouping of products ("rubro"), e.g. "Fiambres" or "Quesos".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Human-readable name of the category.
    pub name: String,
    /// URL-safe unique identifier derived from the name.
    pub slug: String,
    /// Optional description that expands upon the category name.
    pub description: Option<String>,
    /// Optional icon reference used by the catalog header.
    pub icon_name: Option<String>,
    /// Optional illustrative image.
    pub image_url: Option<String>,
    /// Inactive categories are hidden from the public catalog.
    pub is_active: bool,
    /// Display order, ascending.
    pub sort_order: i32,
    /// Identity of the admin that created the record.
    pub created_by: Option<String>,
    /// Identity of the admin that last changed the record.
    pub last_modified_by: Option<String>,
    /// Timestamp for when the category record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the category record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon_name: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_by: Option<String>,
    /// Timestamp captured when the category payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewCategory {
    /// Build an active category payload with the current timestamp.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            description: None,
            icon_name: None,
            image_url: None,
            is_active: true,
            sort_order: 0,
            created_by: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon_name(mut self, icon_name: impl Into<String>) -> Self {
        self.icon_name = Some(icon_name.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn created_by(mut self, user: impl Into<String>) -> Self {
        self.created_by = Some(user.into());
        self
    }
}

/// Full replacement of the editable category fields.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    pub name: String,
    pub slug: String,
    /// New description value; `None` clears the description.
    pub description: Option<String>,
    pub icon_name: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub last_modified_by: Option<String>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateCategory {
    pub fn new(name: impl Into<String>, slug: impl Into<String>, is_active: bool) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            description: None,
            icon_name: None,
            image_url: None,
            is_active,
            sort_order: 0,
            last_modified_by: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_icon_name(mut self, icon_name: Option<String>) -> Self {
        self.icon_name = icon_name;
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn modified_by(mut self, user: impl Into<String>) -> Self {
        self.last_modified_by = Some(user.into());
        self
    }
}

/// Query definition used to list categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Restrict the results to active categories.
    pub active_only: bool,
    /// Optional case-insensitive substring search applied to the name.
    pub search: Option<String>,
}

impl CategoryListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only return categories visible in the public catalog.
    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.search = Some(value.into());
        self
    }
}
