//! In-memory bulk loader.
//!
//! Mirrors what `LOAD DATA ... IGNORE` does against the real schema: ids are
//! auto-incremented from 1 after a truncate, and rows that are malformed,
//! repeat a unique key or reference a missing row are skipped.

use crate::loader::BulkLoader;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use listen80_types::{ExistingPlaylist, Table, DELIMITER};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Default)]
struct MemoryTable {
    /// Accepted rows; row `i` has id `i + 1`.
    rows: Vec<Vec<String>>,
    unique_keys: HashSet<String>,
}

impl MemoryTable {
    fn has_id(&self, id: &str) -> bool {
        id.parse::<usize>()
            .map(|id| id >= 1 && id <= self.rows.len())
            .unwrap_or(false)
    }
}

/// A [`BulkLoader`] that keeps every table in memory.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    tables: HashMap<Table, MemoryTable>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently in `table`.
    pub fn row_count(&self, table: Table) -> usize {
        self.tables.get(&table).map_or(0, |t| t.rows.len())
    }

    /// All rows of `table`, as field lists in [`Table::columns`] order.
    pub fn rows(&self, table: Table) -> &[Vec<String>] {
        self.tables
            .get(&table)
            .map(|t| t.rows.as_slice())
            .unwrap_or_default()
    }

    fn table(&self, table: Table) -> Option<&MemoryTable> {
        self.tables.get(&table)
    }

    fn exists(&self, table: Table, id: &str) -> bool {
        self.table(table).is_some_and(|t| t.has_id(id))
    }

    fn user_exists(&self, account: &str) -> bool {
        self.table(Table::User)
            .is_some_and(|t| t.unique_keys.contains(account))
    }

    /// Unique key of a row, or `None` when a referenced row is missing.
    fn admit(&self, table: Table, fields: &[String]) -> Option<String> {
        let f = |i: usize| fields[i].as_str();
        match table {
            Table::User => Some(f(0).to_string()),
            Table::Playlist => self.user_exists(f(2)).then(|| f(0).to_string()),
            Table::Artist => Some(f(0).to_string()),
            Table::Song => self
                .exists(Table::Artist, f(2))
                .then(|| f(0).to_string()),
            Table::PlaylistSong => (self.exists(Table::Playlist, f(0))
                && self.exists(Table::Song, f(1)))
            .then(|| format!("{}:{}", f(0), f(2))),
            Table::PlaylistFavorite => (self.exists(Table::Playlist, f(0))
                && self.user_exists(f(1)))
            .then(|| format!("{}:{}", f(0), f(1))),
        }
    }

    fn import(&mut self, table: Table, content: &str) -> u64 {
        let width = table.columns().len();
        let mut accepted = 0;

        for line in content.lines() {
            let fields: Vec<String> = line.split(DELIMITER).map(str::to_string).collect();
            if fields.len() != width {
                continue;
            }
            let Some(key) = self.admit(table, &fields) else {
                continue;
            };

            let target = self.tables.entry(table).or_default();
            if target.unique_keys.insert(key) {
                target.rows.push(fields);
                accepted += 1;
            }
        }
        accepted
    }
}

#[async_trait]
impl BulkLoader for MemoryLoader {
    type Error = std::io::Error;

    async fn truncate(&mut self, tables: &[Table]) -> Result<(), Self::Error> {
        for table in tables {
            self.tables.remove(table);
        }
        Ok(())
    }

    async fn load_file(&mut self, table: Table, path: &Path) -> Result<u64, Self::Error> {
        let content = std::fs::read_to_string(path)?;
        let accepted = self.import(table, &content);
        debug!("Loaded {} rows into in-memory table {}", accepted, table);
        Ok(accepted)
    }

    async fn artist_ids(&mut self, ulids: &[String]) -> Result<HashMap<String, u64>, Self::Error> {
        let wanted: HashSet<&str> = ulids.iter().map(String::as_str).collect();
        Ok(self
            .rows(Table::Artist)
            .iter()
            .enumerate()
            .filter(|(_, row)| wanted.contains(row[0].as_str()))
            .map(|(i, row)| (row[0].clone(), i as u64 + 1))
            .collect())
    }

    async fn playlists(&mut self) -> Result<Vec<ExistingPlaylist>, Self::Error> {
        Ok(self
            .rows(Table::Playlist)
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let created_at = NaiveDateTime::parse_from_str(&row[4], TIMESTAMP_FORMAT).ok()?;
                Some(ExistingPlaylist {
                    id: i as u64 + 1,
                    created_at: created_at.and_utc(),
                })
            })
            .collect())
    }

    async fn song_ids(&mut self) -> Result<Vec<u64>, Self::Error> {
        Ok((1..=self.row_count(Table::Song) as u64).collect())
    }
}
