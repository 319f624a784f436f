//! Art Catalog Manager Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog_store;
pub mod cli_style;
pub mod config;
pub mod console;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use catalog_store::{
    Artist, Artwork, ArtworkStatus, CatalogError, CatalogStore, SqliteCatalogStore,
};
pub use config::{AppConfig, FileConfig};
pub use console::{run_menu, FlowOutcome, LineReader, RustylineReader, ScriptedReader};
