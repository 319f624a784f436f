mod models;
mod schema;
mod store;
mod trait_def;
pub mod validation;

pub use models::{Artist, Artwork, ArtworkStatus, ParseStatusError};
pub use schema::CATALOG_SCHEMA;
pub use store::SqliteCatalogStore;
pub use trait_def::{CatalogError, CatalogResult, CatalogStore};
