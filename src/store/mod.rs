pub mod catalog;
pub mod selectors;
