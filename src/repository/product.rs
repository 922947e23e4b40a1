use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::price_change::NewPriceChange as DomainNewPriceChange,
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct,
    },
    models::price_change::NewPriceChange as DbNewPriceChange,
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(DomainProduct::from))
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut count_query = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            count_query = count_query.filter(products::category_id.eq(category_id));
        }

        if let Some(brand_id) = query.brand_id {
            count_query = count_query.filter(products::brand_id.eq(brand_id));
        }

        if query.available_only {
            count_query = count_query.filter(products::is_available.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term.trim());
            count_query = count_query.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::description.like(pattern)),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            items = items.filter(products::category_id.eq(category_id));
        }

        if let Some(brand_id) = query.brand_id {
            items = items.filter(products::brand_id.eq(brand_id));
        }

        if query.available_only {
            items = items.filter(products::is_available.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term.trim());
            items = items.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::description.like(pattern)),
            );
        }

        items = items.order((products::name.asc(), products::id.asc()));

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;
        let products = db_products.into_iter().map(DomainProduct::from).collect();

        Ok((total, products))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
        price_change: Option<DomainNewPriceChange>,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::{price_changes, products};

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;

            if let Some(change) = price_change.as_ref() {
                diesel::insert_into(price_changes::table)
                    .values(&DbNewPriceChange::from(change))
                    .execute(conn)?;
            }

            Ok(updated.into())
        })
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
            .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
