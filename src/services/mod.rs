pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

pub mod brands;
pub mod catalog;
pub mod categories;
pub mod export;
pub mod history;
pub mod main;
pub mod products;
