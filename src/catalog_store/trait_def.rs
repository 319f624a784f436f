//! CatalogStore trait definition and the typed error it speaks.
//!
//! The console workflows only see this trait, so tests can drive them
//! against any backend and the SQLite implementation stays swappable.

use super::models::{Artist, Artwork, ArtworkStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The referenced artist row does not exist.
    #[error("artist id {artist_id} not found")]
    ArtistNotFound { artist_id: i64 },

    /// No artwork matches the (title, artist) pair.
    #[error("artwork '{title}' not found for artist id {artist_id}")]
    ArtworkNotFound { artist_id: i64, title: String },

    /// An artist with the same (name, email) pair already exists.
    #[error("artist '{name}' <{email}> is already in the catalog")]
    DuplicateArtist { name: String, email: String },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Storage backend for the catalog.
///
/// Lookup misses are `Ok(None)`; mutations that target a missing row
/// return the matching not-found error. No operation panics on a
/// storage failure, errors surface as `CatalogError::Storage`.
pub trait CatalogStore: Send + Sync {
    /// Exact-match lookup by canonical artist name. When several artists
    /// share a name (same name, different email), the earliest row wins.
    fn find_artist(&self, name: &str) -> CatalogResult<Option<Artist>>;

    /// Insert a new artist. The name is canonicalized before comparison
    /// and storage; a duplicate (name, email) pair refuses the insert.
    fn add_artist(&self, name: &str, email: &str) -> CatalogResult<Artist>;

    /// Exact match on the (title, artist) pair.
    fn find_artwork(&self, artist_id: i64, title: &str) -> CatalogResult<Option<Artwork>>;

    /// Catalog-wide title lookup, used by the add-artwork precheck:
    /// titles are unique across all artists, not per artist.
    fn title_exists(&self, title: &str) -> CatalogResult<bool>;

    /// Insert a new artwork for an existing artist, denormalizing the
    /// artist's stored name onto the row. Title uniqueness is the
    /// caller's precheck, not enforced here.
    fn add_artwork(
        &self,
        artist_id: i64,
        title: &str,
        status: ArtworkStatus,
        price: i64,
    ) -> CatalogResult<Artwork>;

    /// All artworks of an artist matching either of the two given
    /// statuses, ordered by id ascending (insertion order). Pass
    /// `[Available, Sold]` for everything, `[Available, Available]` for
    /// available-only.
    fn list_artworks(
        &self,
        artist_id: i64,
        statuses: [ArtworkStatus; 2],
    ) -> CatalogResult<Vec<Artwork>>;

    /// Delete the artwork matching the (title, artist) pair.
    fn delete_artwork(&self, artist_id: i64, title: &str) -> CatalogResult<()>;

    /// Unconditional overwrite of the status field of the matching row.
    fn update_artwork_status(
        &self,
        artist_id: i64,
        title: &str,
        new_status: ArtworkStatus,
    ) -> CatalogResult<()>;

    fn artist_count(&self) -> CatalogResult<i64>;

    fn artwork_count(&self) -> CatalogResult<i64>;
}
