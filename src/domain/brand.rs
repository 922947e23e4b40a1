use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Manufacturer or label grouping products inside a category ("marca").
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Brand {
    /// Unique identifier of the brand.
    pub id: i32,
    /// Human-readable name of the brand.
    pub name: String,
    /// Optional description of the brand.
    pub description: Option<String>,
    /// Optional logo reference.
    pub logo_url: Option<String>,
    /// Inactive brands are hidden from the public catalog.
    pub is_active: bool,
    /// Display order, ascending.
    pub sort_order: i32,
    pub created_by: Option<String>,
    pub last_modified_by: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new brand.
#[derive(Debug, Clone)]
pub struct NewBrand {
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_by: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewBrand {
    /// Build an active brand payload with the current timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            logo_url: None,
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

    pub fn with_logo_url(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = Some(logo_url.into());
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

/// Full replacement of the editable brand fields.
#[derive(Debug, Clone)]
pub struct UpdateBrand {
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub last_modified_by: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl UpdateBrand {
    pub fn new(name: impl Into<String>, is_active: bool) -> Self {
        Self {
            name: name.into(),
            description: None,
            logo_url: None,
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

    pub fn with_logo_url(mut self, logo_url: Option<String>) -> Self {
        self.logo_url = logo_url;
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

/// Query definition used to list brands.
#[derive(Debug, Clone, Default)]
pub struct BrandListQuery {
    pub active_only: bool,
    pub search: Option<String>,
}

impl BrandListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.search = Some(value.into());
        self
    }
}
