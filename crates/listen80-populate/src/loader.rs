//! The bulk-import seam between the pipeline and a store.

use async_trait::async_trait;
use listen80_types::{ExistingPlaylist, Table};
use std::collections::HashMap;
use std::path::Path;

/// A store that imports delimited files and hands back the ids it assigned.
///
/// Implementations must ignore rows that are malformed, duplicate a unique
/// key or reference a missing row, instead of failing the whole load.
#[async_trait]
pub trait BulkLoader: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Remove all rows from the given tables.
    async fn truncate(&mut self, tables: &[Table]) -> Result<(), Self::Error>;

    /// Import the delimited file at `path` into `table`, in one commit.
    ///
    /// The file lists [`Table::columns`] in order. Returns the number of rows
    /// accepted.
    async fn load_file(&mut self, table: Table, path: &Path) -> Result<u64, Self::Error>;

    /// Store-assigned ids of the artists with the given ULIDs.
    async fn artist_ids(&mut self, ulids: &[String]) -> Result<HashMap<String, u64>, Self::Error>;

    /// Ids and creation times of all playlists.
    async fn playlists(&mut self) -> Result<Vec<ExistingPlaylist>, Self::Error>;

    /// Ids of all songs.
    async fn song_ids(&mut self) -> Result<Vec<u64>, Self::Error>;
}
