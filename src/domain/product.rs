use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::price::{Price, primary_price};

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Brand the product belongs to.
    pub brand_id: i32,
    /// Category the product is listed under.
    pub category_id: i32,
    /// Optional longer description shown to shoppers.
    pub description: Option<String>,
    /// Optional product picture.
    pub image_url: Option<String>,
    /// Ordered price list; the first entry is shown in summaries.
    pub prices: Vec<Price>,
    /// Unavailable products are hidden from the public catalog.
    pub is_available: bool,
    /// Free-text tags matched by the catalog search.
    pub tags: Vec<String>,
    pub created_by: Option<String>,
    pub last_modified_by: Option<String>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// The price shown on product cards and in exports.
    pub fn primary_price(&self) -> Option<&Price> {
        primary_price(&self.prices)
    }
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub brand_id: i32,
    pub category_id: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub prices: Vec<Price>,
    pub is_available: bool,
    pub tags: Vec<String>,
    pub created_by: Option<String>,
    /// Timestamp captured when the product payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build an available product payload with the supplied details and current timestamp.
    pub fn new(
        name: impl Into<String>,
        brand_id: i32,
        category_id: i32,
        prices: Vec<Price>,
    ) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: name.into(),
            brand_id,
            category_id,
            description: None,
            image_url: None,
            prices,
            is_available: true,
            tags: Vec::new(),
            created_by: None,
            updated_at: now,
        }
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }

    pub fn created_by(mut self, user: impl Into<String>) -> Self {
        self.created_by = Some(user.into());
        self
    }
}

/// Patch data applied when updating an existing product.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// Optional name update.
    pub name: Option<String>,
    pub brand_id: Option<i32>,
    pub category_id: Option<i32>,
    /// Optional description update; the inner `None` clears it.
    pub description: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    /// Replacement price list.
    pub prices: Option<Vec<Price>>,
    pub is_available: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub last_modified_by: Option<String>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: None,
            brand_id: None,
            category_id: None,
            description: None,
            image_url: None,
            prices: None,
            is_available: None,
            tags: None,
            last_modified_by: None,
            updated_at: now,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn brand_id(mut self, brand_id: i32) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    pub fn category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Update the product description, using `None` to clear an existing value.
    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(|value| value.into()));
        self
    }

    pub fn image_url(mut self, image_url: Option<impl Into<String>>) -> Self {
        self.image_url = Some(image_url.map(|value| value.into()));
        self
    }

    pub fn prices(mut self, prices: Vec<Price>) -> Self {
        self.prices = Some(prices);
        self
    }

    pub fn available(mut self, is_available: bool) -> Self {
        self.is_available = Some(is_available);
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn modified_by(mut self, user: impl Into<String>) -> Self {
        self.last_modified_by = Some(user.into());
        self
    }

    /// Apply the patch on top of `product`, producing the stored result.
    pub fn apply_to(&self, product: &Product) -> Product {
        let mut next = product.clone();
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(brand_id) = self.brand_id {
            next.brand_id = brand_id;
        }
        if let Some(category_id) = self.category_id {
            next.category_id = category_id;
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(image_url) = &self.image_url {
            next.image_url = image_url.clone();
        }
        if let Some(prices) = &self.prices {
            next.prices = prices.clone();
        }
        if let Some(is_available) = self.is_available {
            next.is_available = is_available;
        }
        if let Some(tags) = &self.tags {
            next.tags = tags.clone();
        }
        if self.last_modified_by.is_some() {
            next.last_modified_by = self.last_modified_by.clone();
        }
        next.updated_at = self.updated_at;
        next
    }
}

/// Query definition used to list products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Optional category filter.
    pub category_id: Option<i32>,
    /// Optional brand filter.
    pub brand_id: Option<i32>,
    /// Restrict the results to products shown in the public catalog.
    pub available_only: bool,
    /// Optional name or description search term.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn brand(mut self, brand_id: i32) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    pub fn available_only(mut self) -> Self {
        self.available_only = true;
        self
    }

    /// Filter the results by a search term applied to the name or description.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
