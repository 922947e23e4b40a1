use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::price_change::{PriceChangeListQuery, PriceChangeLog as DomainPriceChangeLog};
use crate::models::price_change::PriceChange as DbPriceChange;
use crate::repository::{DieselRepository, PriceChangeReader};

impl PriceChangeReader for DieselRepository {
    fn list_price_changes(
        &self,
        query: PriceChangeListQuery,
    ) -> RepositoryResult<Vec<DomainPriceChangeLog>> {
        use crate::schema::price_changes;

        let mut conn = self.conn()?;

        let mut items = price_changes::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(product_id) = query.product_id {
            items = items.filter(price_changes::product_id.eq(product_id));
        }

        if let Some(since) = query.since {
            items = items.filter(price_changes::changed_at.ge(since));
        }

        items = items.order((price_changes::changed_at.desc(), price_changes::id.desc()));

        if let Some(limit) = query.limit {
            items = items.limit(limit as i64);
        }

        let changes = items.load::<DbPriceChange>(&mut conn)?;

        Ok(changes.into_iter().map(DomainPriceChangeLog::from).collect())
    }
}
