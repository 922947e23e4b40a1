use chrono::{Duration, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::price::{Price, prices_differ};
use crate::domain::product::Product;

/// Default number of history entries returned by list queries.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Default window, in days, for "recent changes".
pub const DEFAULT_RECENT_DAYS: i64 = 7;

/// Immutable audit record of a product's prices before and after an edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceChangeLog {
    pub id: i32,
    pub product_id: i32,
    /// Product name at the time of the change, kept after the product is deleted.
    pub product_name: String,
    pub previous_prices: Vec<Price>,
    pub new_prices: Vec<Price>,
    /// Identity of the admin that made the change.
    pub changed_by: String,
    pub changed_at: NaiveDateTime,
    pub reason: Option<String>,
}

/// Payload recorded alongside a product update whose prices changed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPriceChange {
    pub product_id: i32,
    pub product_name: String,
    pub previous_prices: Vec<Price>,
    pub new_prices: Vec<Price>,
    pub changed_by: String,
    pub changed_at: NaiveDateTime,
    pub reason: Option<String>,
}

impl NewPriceChange {
    /// Snapshot a change from `product` to `new_prices`, or `None` when the
    /// serialized price lists are identical.
    pub fn between(
        product: &Product,
        new_prices: &[Price],
        changed_by: impl Into<String>,
    ) -> Option<Self> {
        if !prices_differ(&product.prices, new_prices) {
            return None;
        }

        Some(Self {
            product_id: product.id,
            product_name: product.name.clone(),
            previous_prices: product.prices.clone(),
            new_prices: new_prices.to_vec(),
            changed_by: changed_by.into(),
            changed_at: Local::now().naive_utc(),
            reason: None,
        })
    }

    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }
}

/// Query definition used to list price history entries, newest first.
#[derive(Debug, Clone)]
pub struct PriceChangeListQuery {
    /// Restrict the history to one product.
    pub product_id: Option<i32>,
    /// Only entries changed at or after this instant.
    pub since: Option<NaiveDateTime>,
    /// Maximum number of entries; `None` returns everything.
    pub limit: Option<usize>,
}

impl Default for PriceChangeListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceChangeListQuery {
    /// Latest [`DEFAULT_HISTORY_LIMIT`] entries across all products.
    pub fn new() -> Self {
        Self {
            product_id: None,
            since: None,
            limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }

    pub fn product(mut self, product_id: i32) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn since(mut self, since: NaiveDateTime) -> Self {
        self.since = Some(since);
        self
    }

    /// Entries from the last `days` days.
    pub fn recent_days(self, days: i64) -> Self {
        let cutoff = Local::now().naive_utc() - Duration::days(days);
        self.since(cutoff)
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn unlimited(mut self) -> Self {
        self.limit = None;
        self
    }
}

/// Spanish relative time for history listings, falling back to the date.
pub fn format_relative_time(at: NaiveDateTime, now: NaiveDateTime) -> String {
    let seconds = (now - at).num_seconds();

    match seconds {
        s if s < 60 => "hace un momento".to_string(),
        s if s < 3_600 => format!("hace {} min", s / 60),
        s if s < 86_400 => format!("hace {} h", s / 3_600),
        s if s < 604_800 => format!("hace {} días", s / 86_400),
        _ => at.format("%d/%m/%Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::price::UnitPrice;

    fn datetime(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .unwrap_or_default()
    }

    fn unit(price: i64) -> Price {
        Price::Unit(UnitPrice {
            price,
            unit_label: "unidad".to_string(),
        })
    }

    fn product_with_prices(prices: Vec<Price>) -> Product {
        Product {
            id: 4,
            name: "Dulce de leche".to_string(),
            brand_id: 1,
            category_id: 2,
            description: None,
            image_url: None,
            prices,
            is_available: true,
            tags: Vec::new(),
            created_by: None,
            last_modified_by: None,
            created_at: datetime(8, 0),
            updated_at: datetime(8, 0),
        }
    }

    #[test]
    fn between_skips_identical_prices() {
        let product = product_with_prices(vec![unit(1500)]);

        assert!(NewPriceChange::between(&product, &[unit(1500)], "admin@example.com").is_none());
    }

    #[test]
    fn between_snapshots_full_price_lists() {
        let product = product_with_prices(vec![unit(1500)]);

        let change = NewPriceChange::between(&product, &[unit(1700)], "admin@example.com")
            .expect("prices changed");

        assert_eq!(change.product_id, 4);
        assert_eq!(change.product_name, "Dulce de leche");
        assert_eq!(change.previous_prices, vec![unit(1500)]);
        assert_eq!(change.new_prices, vec![unit(1700)]);
        assert_eq!(change.changed_by, "admin@example.com");
    }

    #[test]
    fn relative_time_buckets() {
        let now = datetime(12, 0);

        assert_eq!(format_relative_time(datetime(11, 59), now), "hace 1 min");
        assert_eq!(format_relative_time(now, now), "hace un momento");
        assert_eq!(format_relative_time(datetime(9, 0), now), "hace 3 h");
        assert_eq!(
            format_relative_time(now - Duration::days(2), now),
            "hace 2 días"
        );
        assert_eq!(
            format_relative_time(now - Duration::days(30), now),
            "09/02/2024"
        );
    }
}
