// Service exports
pub mod catalog;
pub mod postgres;

pub use catalog::{CatalogError, InMemoryCatalog, ServiceCatalog};
pub use postgres::PostgresCatalog;
