//! SQLite schema for the art catalog database.
//!
//! Two tables: artists and the artwork they own. Artwork rows carry a
//! denormalized artist_name snapshot next to the enforced artist_id
//! foreign key. Title uniqueness is deliberately not a storage
//! constraint; the workflow layer prechecks it before insert under the
//! single-writer assumption.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, ForeignKey, ForeignKeyOnChange, Schema, SqlType, Table};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            autoincrement = true
        ),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("email", &SqlType::Text),
    ],
    indices: &[("idx_artists_name", "name")],
};

const ARTWORK_ARTIST_FK: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const ARTWORK_TABLE: Table = Table {
    name: "artwork",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            autoincrement = true
        ),
        sqlite_column!("artist_name", &SqlType::Text, non_null = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("price", &SqlType::Integer),
        sqlite_column!("status", &SqlType::Text, non_null = true),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ARTWORK_ARTIST_FK)
        ),
    ],
    indices: &[
        ("idx_artwork_artist", "artist_id"),
        ("idx_artwork_title", "title"),
    ],
};

pub const CATALOG_SCHEMA: Schema = Schema {
    tables: &[ARTISTS_TABLE, ARTWORK_TABLE],
};

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::{params, Connection};

    #[test]
    fn schema_creates_and_validates() {
        let conn = Connection::open_in_memory().unwrap();
        CATALOG_SCHEMA.create(&conn).unwrap();
        CATALOG_SCHEMA.validate(&conn).unwrap();
    }

    #[test]
    fn artwork_requires_existing_artist() {
        let conn = Connection::open_in_memory().unwrap();
        CATALOG_SCHEMA.create(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO artwork (artist_name, title, price, status, artist_id)
             VALUES ('NOBODY', 'GHOST PIECE', 100, 'AVAILABLE', 99)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn artwork_ids_follow_insertion_order() {
        let conn = Connection::open_in_memory().unwrap();
        CATALOG_SCHEMA.create(&conn).unwrap();

        conn.execute(
            "INSERT INTO artists (name, email) VALUES ('ADA LOVELACE', 'ada@math.org')",
            [],
        )
        .unwrap();
        let artist_id = conn.last_insert_rowid();

        for title in ["FIRST", "SECOND", "THIRD"] {
            conn.execute(
                "INSERT INTO artwork (artist_name, title, price, status, artist_id)
                 VALUES ('ADA LOVELACE', ?1, 10, 'AVAILABLE', ?2)",
                params![title, artist_id],
            )
            .unwrap();
        }

        let mut stmt = conn
            .prepare("SELECT title FROM artwork WHERE artist_id = ?1 ORDER BY id ASC")
            .unwrap();
        let titles: Vec<String> = stmt
            .query_map(params![artist_id], |r| r.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(titles, vec!["FIRST", "SECOND", "THIRD"]);
    }
}
