use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::category::{
    Category as DomainCategory, CategoryListQuery, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::models::category::{
    Category as DbCategory, NewCategory as DbNewCategory, UpdateCategory,
};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let mut items_query = categories::table.into_boxed::<diesel::sqlite::Sqlite>();

        if query.active_only {
            items_query = items_query.filter(categories::is_active.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term.trim());
            items_query = items_query.filter(
                categories::name
                    .like(pattern.clone())
                    .or(categories::slug.like(pattern)),
            );
        }

        let categories = items_query
            .order((categories::sort_order.asc(), categories::name.asc()))
            .load::<DbCategory>(&mut conn)?;

        Ok(categories.into_iter().map(DomainCategory::from).collect())
    }

    fn get_category_by_id(&self, category_id: i32) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(category_id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(DomainCategory::from))
    }

    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::slug.eq(slug))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(DomainCategory::from))
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let insertable = DbNewCategory::from(new_category);

        let created = diesel::insert_into(categories::table)
            .values(&insertable)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.into())
    }

    fn update_category(
        &self,
        category_id: i32,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let db_updates = UpdateCategory::from(updates);

        let updated = diesel::update(categories::table.filter(categories::id.eq(category_id)))
            .set(&db_updates)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_category(&self, category_id: i32) -> RepositoryResult<()> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(categories::table.filter(categories::id.eq(category_id)))
            .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
