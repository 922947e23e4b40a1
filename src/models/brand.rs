use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::brand::{
    Brand as DomainBrand, NewBrand as DomainNewBrand, UpdateBrand as DomainUpdateBrand,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::brands)]
pub struct Brand {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_by: Option<String>,
    pub last_modified_by: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::brands)]
pub struct NewBrand<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub logo_url: Option<&'a str>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_by: Option<&'a str>,
    pub last_modified_by: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::brands)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateBrand<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub logo_url: Option<&'a str>,
    pub is_active: bool,
    pub sort_order: i32,
    pub last_modified_by: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Brand> for DomainBrand {
    fn from(value: Brand) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            logo_url: value.logo_url,
            is_active: value.is_active,
            sort_order: value.sort_order,
            created_by: value.created_by,
            last_modified_by: value.last_modified_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewBrand> for NewBrand<'a> {
    fn from(value: &'a DomainNewBrand) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_deref(),
            logo_url: value.logo_url.as_deref(),
            is_active: value.is_active,
            sort_order: value.sort_order,
            created_by: value.created_by.as_deref(),
            last_modified_by: value.created_by.as_deref(),
            created_at: value.updated_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateBrand> for UpdateBrand<'a> {
    fn from(value: &'a DomainUpdateBrand) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_deref(),
            logo_url: value.logo_url.as_deref(),
            is_active: value.is_active,
            sort_order: value.sort_order,
            last_modified_by: value.last_modified_by.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
