use mockall::mock;

use super::{
    BrandReader, BrandWriter, CategoryReader, CategoryWriter, PriceChangeReader, ProductReader,
    ProductWriter,
};
use crate::domain::{
    brand::{Brand, BrandListQuery, NewBrand, UpdateBrand},
    category::{Category, CategoryListQuery, NewCategory, UpdateCategory},
    price_change::{NewPriceChange, PriceChangeListQuery, PriceChangeLog},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
        fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(
            &self,
            category_id: i32,
            updates: &UpdateCategory,
        ) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub BrandReader {}

    impl BrandReader for BrandReader {
        fn list_brands(&self, query: BrandListQuery) -> RepositoryResult<Vec<Brand>>;
        fn get_brand_by_id(&self, id: i32) -> RepositoryResult<Option<Brand>>;
    }
}

mock! {
    pub BrandWriter {}

    impl BrandWriter for BrandWriter {
        fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<Brand>;
        fn update_brand(&self, brand_id: i32, updates: &UpdateBrand) -> RepositoryResult<Brand>;
        fn delete_brand(&self, brand_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(
            &self,
            product_id: i32,
            updates: &UpdateProduct,
            price_change: Option<NewPriceChange>,
        ) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub PriceChangeReader {}

    impl PriceChangeReader for PriceChangeReader {
        fn list_price_changes(
            &self,
            query: PriceChangeListQuery,
        ) -> RepositoryResult<Vec<PriceChangeLog>>;
    }
}
