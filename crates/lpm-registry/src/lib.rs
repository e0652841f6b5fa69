pub mod cache;
pub mod catalog;
pub mod fetch;

pub use cache::IndexCache;
pub use catalog::{Catalog, CatalogEntry};
pub use fetch::IndexFetcher;
