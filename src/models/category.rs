use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon_name: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_by: Option<String>,
    pub last_modified_by: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub description: Option<&'a str>,
    pub icon_name: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_by: Option<&'a str>,
    pub last_modified_by: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCategory<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub description: Option<&'a str>,
    pub icon_name: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub is_active: bool,
    pub sort_order: i32,
    pub last_modified_by: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Category> for DomainCategory {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            name: value.name,
            slug: value.slug,
            description: value.description,
            icon_name: value.icon_name,
            image_url: value.image_url,
            is_active: value.is_active,
            sort_order: value.sort_order,
            created_by: value.created_by,
            last_modified_by: value.last_modified_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewCategory> for NewCategory<'a> {
    fn from(value: &'a DomainNewCategory) -> Self {
        Self {
            name: value.name.as_str(),
            slug: value.slug.as_str(),
            description: value.description.as_deref(),
            icon_name: value.icon_name.as_deref(),
            image_url: value.image_url.as_deref(),
            is_active: value.is_active,
            sort_order: value.sort_order,
            created_by: value.created_by.as_deref(),
            last_modified_by: value.created_by.as_deref(),
            created_at: value.updated_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateCategory> for UpdateCategory<'a> {
    fn from(value: &'a DomainUpdateCategory) -> Self {
        Self {
            name: value.name.as_str(),
            slug: value.slug.as_str(),
            description: value.description.as_deref(),
            icon_name: value.icon_name.as_deref(),
            image_url: value.image_url.as_deref(),
            is_active: value.is_active,
            sort_order: value.sort_order,
            last_modified_by: value.last_modified_by.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
