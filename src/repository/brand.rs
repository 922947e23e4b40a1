use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::brand::{
    Brand as DomainBrand, BrandListQuery, NewBrand as DomainNewBrand,
    UpdateBrand as DomainUpdateBrand,
};
use crate::models::brand::{Brand as DbBrand, NewBrand as DbNewBrand, UpdateBrand};
use crate::repository::{BrandReader, BrandWriter, DieselRepository};

impl BrandReader for DieselRepository {
    fn list_brands(&self, query: BrandListQuery) -> RepositoryResult<Vec<DomainBrand>> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let mut items_query = brands::table.into_boxed::<diesel::sqlite::Sqlite>();

        if query.active_only {
            items_query = items_query.filter(brands::is_active.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term.trim());
            items_query = items_query.filter(
                brands::name
                    .like(pattern.clone())
                    .or(brands::description.like(pattern)),
            );
        }

        let brands = items_query
            .order((brands::sort_order.asc(), brands::name.asc()))
            .load::<DbBrand>(&mut conn)?;

        Ok(brands.into_iter().map(DomainBrand::from).collect())
    }

    fn get_brand_by_id(&self, brand_id: i32) -> RepositoryResult<Option<DomainBrand>> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let brand = brands::table
            .filter(brands::id.eq(brand_id))
            .first::<DbBrand>(&mut conn)
            .optional()?;

        Ok(brand.map(DomainBrand::from))
    }
}

impl BrandWriter for DieselRepository {
    fn create_brand(&self, new_brand: &DomainNewBrand) -> RepositoryResult<DomainBrand> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(brands::table)
            .values(&DbNewBrand::from(new_brand))
            .get_result::<DbBrand>(&mut conn)?;

        Ok(created.into())
    }

    fn update_brand(
        &self,
        brand_id: i32,
        updates: &DomainUpdateBrand,
    ) -> RepositoryResult<DomainBrand> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let updated = diesel::update(brands::table.filter(brands::id.eq(brand_id)))
            .set(&UpdateBrand::from(updates))
            .get_result::<DbBrand>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_brand(&self, brand_id: i32) -> RepositoryResult<()> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(brands::table.filter(brands::id.eq(brand_id))).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
