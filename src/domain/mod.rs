pub mod brand;
pub mod category;
pub mod integrity;
pub mod price;
pub mod price_change;
pub mod product;
pub mod search;
