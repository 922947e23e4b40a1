use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::price_change::{
    NewPriceChange as DomainNewPriceChange, PriceChangeLog as DomainPriceChangeLog,
};
use crate::models::encode_json;
use crate::models::product::decode_prices;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::price_changes)]
pub struct PriceChange {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub previous_prices: String,
    pub new_prices: String,
    pub changed_by: String,
    pub changed_at: NaiveDateTime,
    pub reason: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::price_changes)]
pub struct NewPriceChange<'a> {
    pub product_id: i32,
    pub product_name: &'a str,
    pub previous_prices: String,
    pub new_prices: String,
    pub changed_by: &'a str,
    pub changed_at: NaiveDateTime,
    pub reason: Option<&'a str>,
}

impl From<PriceChange> for DomainPriceChangeLog {
    fn from(value: PriceChange) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id,
            product_name: value.product_name,
            previous_prices: decode_prices(&value.previous_prices),
            new_prices: decode_prices(&value.new_prices),
            changed_by: value.changed_by,
            changed_at: value.changed_at,
            reason: value.reason,
        }
    }
}

impl<'a> From<&'a DomainNewPriceChange> for NewPriceChange<'a> {
    fn from(value: &'a DomainNewPriceChange) -> Self {
        Self {
            product_id: value.product_id,
            product_name: value.product_name.as_str(),
            previous_prices: encode_json(&value.previous_prices),
            new_prices: encode_json(&value.new_prices),
            changed_by: value.changed_by.as_str(),
            changed_at: value.changed_at,
            reason: value.reason.as_deref(),
        }
    }
}
