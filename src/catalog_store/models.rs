//! Catalog entities backed by the SQLite store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A person or entity who creates artworks. Identified by a surrogate id
/// assigned by the store; the name is kept in canonical uppercase form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A single catalog item owned by exactly one artist.
///
/// `artist_name` is a snapshot of the owning artist's stored name taken at
/// creation time. It is intentionally not kept in sync with the artists
/// table afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: i64,
    pub artist_name: String,
    pub title: String,
    /// Whole currency units.
    pub price: i64,
    pub status: ArtworkStatus,
    pub artist_id: i64,
}

/// Sale status of an artwork.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtworkStatus {
    Available,
    Sold,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized artwork status '{0}', expected 'AVAILABLE' or 'SOLD'")]
pub struct ParseStatusError(pub String);

impl ArtworkStatus {
    /// Database string representation.
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ArtworkStatus::Available => "AVAILABLE",
            ArtworkStatus::Sold => "SOLD",
        }
    }

    /// The opposite sale state.
    pub fn toggled(&self) -> Self {
        match self {
            ArtworkStatus::Available => ArtworkStatus::Sold,
            ArtworkStatus::Sold => ArtworkStatus::Available,
        }
    }
}

impl FromStr for ArtworkStatus {
    type Err = ParseStatusError;

    /// Case-sensitive: only the canonical uppercase forms are accepted,
    /// callers canonicalize user input first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(ArtworkStatus::Available),
            "SOLD" => Ok(ArtworkStatus::Sold),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl fmt::Display for ArtworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
