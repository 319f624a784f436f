//! SQLite-backed catalog store.
//!
//! One connection behind a mutex; every operation locks, runs its single
//! statement (plus any precheck) inside that scope and releases on all
//! exit paths. Single-writer usage keeps the duplicate-artist and
//! title-uniqueness prechecks race-free.

use super::models::{Artist, Artwork, ArtworkStatus};
use super::schema::CATALOG_SCHEMA;
use super::trait_def::{CatalogError, CatalogResult, CatalogStore};
use super::validation::canonical;
use anyhow::{Context, Result};
use rusqlite::{params, types::Type, Connection};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogStore {
    /// Open the catalog database at `db_path`, creating the schema when
    /// the database is empty and validating it otherwise. Foreign-key
    /// enforcement is turned on for the connection in both cases.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path.as_ref())
            .with_context(|| format!("Failed to open catalog database {:?}", db_path.as_ref()))?;
        conn.execute("PRAGMA foreign_keys = ON;", params![])?;

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
                [],
                |r| r.get(0),
            )
            .unwrap_or(0);

        if table_count == 0 {
            info!("Creating art catalog schema at {:?}", db_path.as_ref());
            CATALOG_SCHEMA
                .create(&conn)
                .context("Failed to create catalog schema")?;
        } else {
            CATALOG_SCHEMA
                .validate(&conn)
                .context("Catalog schema validation failed")?;
        }

        let store = SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        };

        info!(
            "Opened art catalog: {} artists, {} artworks",
            store.artist_count()?,
            store.artwork_count()?
        );

        Ok(store)
    }

    fn parse_artist_row(row: &rusqlite::Row) -> rusqlite::Result<Artist> {
        Ok(Artist {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        })
    }

    fn parse_artwork_row(row: &rusqlite::Row) -> rusqlite::Result<Artwork> {
        let status_str: String = row.get(4)?;
        let status = ArtworkStatus::from_str(&status_str)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
        Ok(Artwork {
            id: row.get(0)?,
            artist_name: row.get(1)?,
            title: row.get(2)?,
            price: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
            status,
            artist_id: row.get(5)?,
        })
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn find_artist(&self, name: &str) -> CatalogResult<Option<Artist>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "SELECT id, name, email FROM artists WHERE name = ?1 ORDER BY id ASC LIMIT 1",
        )?;
        match stmt.query_row(params![canonical(name)], Self::parse_artist_row) {
            Ok(artist) => Ok(Some(artist)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn add_artist(&self, name: &str, email: &str) -> CatalogResult<Artist> {
        let name = canonical(name);
        let conn = self.conn.lock().unwrap();

        let existing: i64 = conn.query_row(
            "SELECT COUNT(*) FROM artists WHERE name = ?1 AND email = ?2",
            params![name, email],
            |r| r.get(0),
        )?;
        if existing > 0 {
            return Err(CatalogError::DuplicateArtist {
                name,
                email: email.to_string(),
            });
        }

        conn.execute(
            "INSERT INTO artists (name, email) VALUES (?1, ?2)",
            params![name, email],
        )?;
        Ok(Artist {
            id: conn.last_insert_rowid(),
            name,
            email: email.to_string(),
        })
    }

    fn find_artwork(&self, artist_id: i64, title: &str) -> CatalogResult<Option<Artwork>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "SELECT id, artist_name, title, price, status, artist_id
             FROM artwork WHERE title = ?1 AND artist_id = ?2",
        )?;
        match stmt.query_row(params![canonical(title), artist_id], Self::parse_artwork_row) {
            Ok(artwork) => Ok(Some(artwork)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn title_exists(&self, title: &str) -> CatalogResult<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM artwork WHERE title = ?1",
            params![canonical(title)],
            |r| r.get(0),
        )?;
        Ok(count > 0)
    }

    fn add_artwork(
        &self,
        artist_id: i64,
        title: &str,
        status: ArtworkStatus,
        price: i64,
    ) -> CatalogResult<Artwork> {
        let title = canonical(title);
        let conn = self.conn.lock().unwrap();

        // Snapshot the stored name, so a later rename of the artist row
        // would not retroactively change this artwork.
        let artist_name: String = match conn.query_row(
            "SELECT name FROM artists WHERE id = ?1",
            params![artist_id],
            |r| r.get(0),
        ) {
            Ok(name) => name,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(CatalogError::ArtistNotFound { artist_id })
            }
            Err(e) => return Err(e.into()),
        };

        conn.execute(
            "INSERT INTO artwork (artist_name, title, price, status, artist_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![artist_name, title, price, status.to_db_str(), artist_id],
        )?;
        Ok(Artwork {
            id: conn.last_insert_rowid(),
            artist_name,
            title,
            price,
            status,
            artist_id,
        })
    }

    fn list_artworks(
        &self,
        artist_id: i64,
        statuses: [ArtworkStatus; 2],
    ) -> CatalogResult<Vec<Artwork>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "SELECT id, artist_name, title, price, status, artist_id
             FROM artwork
             WHERE artist_id = ?1 AND (status = ?2 OR status = ?3)
             ORDER BY id ASC",
        )?;
        let artworks = stmt
            .query_map(
                params![artist_id, statuses[0].to_db_str(), statuses[1].to_db_str()],
                Self::parse_artwork_row,
            )?
            .collect::<Result<Vec<Artwork>, _>>()?;
        Ok(artworks)
    }

    fn delete_artwork(&self, artist_id: i64, title: &str) -> CatalogResult<()> {
        let title = canonical(title);
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            "DELETE FROM artwork WHERE title = ?1 AND artist_id = ?2",
            params![title, artist_id],
        )?;
        if deleted == 0 {
            return Err(CatalogError::ArtworkNotFound { artist_id, title });
        }
        Ok(())
    }

    fn update_artwork_status(
        &self,
        artist_id: i64,
        title: &str,
        new_status: ArtworkStatus,
    ) -> CatalogResult<()> {
        let title = canonical(title);
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE artwork SET status = ?1 WHERE title = ?2 AND artist_id = ?3",
            params![new_status.to_db_str(), title, artist_id],
        )?;
        if updated == 0 {
            return Err(CatalogError::ArtworkNotFound { artist_id, title });
        }
        Ok(())
    }

    fn artist_count(&self) -> CatalogResult<i64> {
        let conn = self.conn.lock().unwrap();
        Ok(conn.query_row("SELECT COUNT(*) FROM artists", [], |r| r.get(0))?)
    }

    fn artwork_count(&self) -> CatalogResult<i64> {
        let conn = self.conn.lock().unwrap();
        Ok(conn.query_row("SELECT COUNT(*) FROM artwork", [], |r| r.get(0))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_tmp_store() -> (SqliteCatalogStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let temp_file_path = temp_dir.path().join("test_catalog.db");
        let store = SqliteCatalogStore::new(&temp_file_path).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn add_and_find_artist_round_trips_through_canonical_name() {
        let (store, _temp_dir) = create_tmp_store();

        let created = store.add_artist("Jane Doe", "jane@x.com").unwrap();
        assert_eq!(created.name, "JANE DOE");

        let found = store.find_artist("JANE DOE").unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.email, "jane@x.com");

        // Lookup canonicalizes too
        let found_again = store.find_artist("jane doe").unwrap().unwrap();
        assert_eq!(found_again.id, created.id);
    }

    #[test]
    fn find_artist_misses_return_none() {
        let (store, _temp_dir) = create_tmp_store();
        assert!(store.find_artist("NOBODY HERE").unwrap().is_none());
    }

    #[test]
    fn duplicate_artist_pair_is_refused_once_only() {
        let (store, _temp_dir) = create_tmp_store();

        store.add_artist("JANE DOE", "jane@x.com").unwrap();
        let second = store.add_artist("JANE DOE", "jane@x.com");
        assert!(matches!(
            second,
            Err(CatalogError::DuplicateArtist { .. })
        ));
        assert_eq!(store.artist_count().unwrap(), 1);
    }

    #[test]
    fn same_name_with_different_email_makes_a_second_artist() {
        let (store, _temp_dir) = create_tmp_store();

        let first = store.add_artist("JANE DOE", "jane@x.com").unwrap();
        let second = store.add_artist("JANE DOE", "jane@other.com").unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.artist_count().unwrap(), 2);

        // Name resolution picks the earliest row
        let resolved = store.find_artist("JANE DOE").unwrap().unwrap();
        assert_eq!(resolved.id, first.id);
    }

    #[test]
    fn add_artwork_snapshots_the_stored_artist_name() {
        let (store, _temp_dir) = create_tmp_store();

        let artist = store.add_artist("Ada Lovelace", "ada@math.org").unwrap();
        let artwork = store
            .add_artwork(artist.id, "Engine Sketch", ArtworkStatus::Available, 500)
            .unwrap();

        assert_eq!(artwork.artist_name, "ADA LOVELACE");
        assert_eq!(artwork.title, "ENGINE SKETCH");
        assert_eq!(artwork.price, 500);
        assert_eq!(artwork.artist_id, artist.id);
    }

    #[test]
    fn add_artwork_for_unknown_artist_is_refused() {
        let (store, _temp_dir) = create_tmp_store();

        let result = store.add_artwork(7, "ORPHAN", ArtworkStatus::Available, 10);
        assert!(matches!(
            result,
            Err(CatalogError::ArtistNotFound { artist_id: 7 })
        ));
        assert_eq!(store.artwork_count().unwrap(), 0);
    }

    #[test]
    fn status_filter_pairs_select_all_or_available_only() {
        let (store, _temp_dir) = create_tmp_store();

        let artist = store.add_artist("ADA LOVELACE", "ada@math.org").unwrap();
        store
            .add_artwork(artist.id, "ENGINE SKETCH", ArtworkStatus::Available, 500)
            .unwrap();

        let available = store
            .list_artworks(
                artist.id,
                [ArtworkStatus::Available, ArtworkStatus::Available],
            )
            .unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].title, "ENGINE SKETCH");
        assert_eq!(available[0].price, 500);

        store
            .update_artwork_status(artist.id, "ENGINE SKETCH", ArtworkStatus::Sold)
            .unwrap();

        let available = store
            .list_artworks(
                artist.id,
                [ArtworkStatus::Available, ArtworkStatus::Available],
            )
            .unwrap();
        assert!(available.is_empty());

        let all = store
            .list_artworks(artist.id, [ArtworkStatus::Available, ArtworkStatus::Sold])
            .unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, ArtworkStatus::Sold);
    }

    #[test]
    fn list_artworks_orders_by_insertion() {
        let (store, _temp_dir) = create_tmp_store();

        let artist = store.add_artist("MC ESCHER", "mc@tessellation.nl").unwrap();
        for (title, status) in [
            ("RELATIVITY", ArtworkStatus::Available),
            ("WATERFALL", ArtworkStatus::Sold),
            ("DRAWING HANDS", ArtworkStatus::Available),
        ] {
            store.add_artwork(artist.id, title, status, 1000).unwrap();
        }

        let all = store
            .list_artworks(artist.id, [ArtworkStatus::Available, ArtworkStatus::Sold])
            .unwrap();
        let titles: Vec<&str> = all.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["RELATIVITY", "WATERFALL", "DRAWING HANDS"]);
    }

    #[test]
    fn list_artworks_is_scoped_to_the_artist() {
        let (store, _temp_dir) = create_tmp_store();

        let first = store.add_artist("JANE DOE", "jane@x.com").unwrap();
        let second = store.add_artist("JOHN ROE", "john@x.com").unwrap();
        store
            .add_artwork(first.id, "HERS", ArtworkStatus::Available, 10)
            .unwrap();
        store
            .add_artwork(second.id, "HIS", ArtworkStatus::Available, 20)
            .unwrap();

        let hers = store
            .list_artworks(first.id, [ArtworkStatus::Available, ArtworkStatus::Sold])
            .unwrap();
        assert_eq!(hers.len(), 1);
        assert_eq!(hers[0].title, "HERS");
    }

    #[test]
    fn title_exists_is_catalog_wide() {
        let (store, _temp_dir) = create_tmp_store();

        let first = store.add_artist("JANE DOE", "jane@x.com").unwrap();
        store.add_artist("JOHN ROE", "john@x.com").unwrap();
        store
            .add_artwork(first.id, "SHARED TITLE", ArtworkStatus::Available, 10)
            .unwrap();

        // The title is taken no matter which artist asks
        assert!(store.title_exists("SHARED TITLE").unwrap());
        assert!(store.title_exists("shared title").unwrap());
        assert!(!store.title_exists("FREE TITLE").unwrap());
    }

    #[test]
    fn delete_artwork_removes_exactly_the_pair() {
        let (store, _temp_dir) = create_tmp_store();

        let artist = store.add_artist("JANE DOE", "jane@x.com").unwrap();
        store
            .add_artwork(artist.id, "KEEP", ArtworkStatus::Available, 10)
            .unwrap();
        store
            .add_artwork(artist.id, "DROP", ArtworkStatus::Available, 20)
            .unwrap();

        store.delete_artwork(artist.id, "DROP").unwrap();
        assert_eq!(store.artwork_count().unwrap(), 1);
        assert!(store.find_artwork(artist.id, "KEEP").unwrap().is_some());
        assert!(store.find_artwork(artist.id, "DROP").unwrap().is_none());
    }

    #[test]
    fn delete_of_missing_artwork_reports_not_found() {
        let (store, _temp_dir) = create_tmp_store();

        let artist = store.add_artist("JANE DOE", "jane@x.com").unwrap();
        let result = store.delete_artwork(artist.id, "NEVER EXISTED");
        assert!(matches!(
            result,
            Err(CatalogError::ArtworkNotFound { .. })
        ));
        assert_eq!(store.artwork_count().unwrap(), 0);
    }

    #[test]
    fn update_status_of_missing_artwork_reports_not_found() {
        let (store, _temp_dir) = create_tmp_store();

        let artist = store.add_artist("JANE DOE", "jane@x.com").unwrap();
        let result = store.update_artwork_status(artist.id, "NOWHERE", ArtworkStatus::Sold);
        assert!(matches!(
            result,
            Err(CatalogError::ArtworkNotFound { .. })
        ));
    }

    #[test]
    fn reopening_an_existing_database_validates_and_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_catalog.db");

        {
            let store = SqliteCatalogStore::new(&db_path).unwrap();
            store.add_artist("JANE DOE", "jane@x.com").unwrap();
        }

        let reopened = SqliteCatalogStore::new(&db_path).unwrap();
        assert_eq!(reopened.artist_count().unwrap(), 1);
        assert!(reopened.find_artist("JANE DOE").unwrap().is_some());
    }

    #[test]
    fn reopening_refuses_a_foreign_database() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("not_a_catalog.db");

        {
            let conn = Connection::open(&db_path).unwrap();
            conn.execute("CREATE TABLE artists (wrong TEXT)", []).unwrap();
        }

        assert!(SqliteCatalogStore::new(&db_path).is_err());
    }
}
