//! Statement builders for bulk import and id read-back.

use crate::error::MySQLPopulatorError;
use listen80_types::{Table, DELIMITER};
use std::path::Path;

/// Maximum ULIDs per `IN (...)` read-back query.
pub const READ_BACK_CHUNK_SIZE: usize = 1_000;

/// Build the `LOAD DATA LOCAL INFILE` statement for one table file.
pub fn load_data_sql(table: Table, path: &Path) -> Result<String, MySQLPopulatorError> {
    let path = path
        .to_str()
        .ok_or_else(|| MySQLPopulatorError::Path(path.display().to_string()))?;
    if path.contains(['\'', '\\', '\n']) {
        return Err(MySQLPopulatorError::Path(path.to_string()));
    }

    let columns = table
        .columns()
        .iter()
        .map(|c| format!("`{c}`"))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "LOAD DATA LOCAL INFILE '{path}' IGNORE INTO TABLE `{table}` \
         CHARACTER SET utf8mb4 \
         FIELDS TERMINATED BY '{DELIMITER}' LINES TERMINATED BY '\\n' ({columns})"
    ))
}

/// Generate TRUNCATE statement.
pub fn truncate_sql(table: Table) -> String {
    format!("TRUNCATE TABLE `{table}`")
}

/// Build the artist id read-back for `n` ULIDs.
pub fn artist_ids_sql(n: usize) -> String {
    let placeholders = vec!["?"; n].join(", ");
    format!("SELECT `id`, `ulid` FROM `artist` WHERE `ulid` IN ({placeholders})")
}

pub const PLAYLISTS_SQL: &str = "SELECT `id`, `created_at` FROM `playlist`";
pub const SONG_IDS_SQL: &str = "SELECT `id` FROM `song`";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_data_sql() {
        let sql = load_data_sql(Table::PlaylistSong, Path::new("/tmp/playlist_song")).unwrap();
        assert_eq!(
            sql,
            "LOAD DATA LOCAL INFILE '/tmp/playlist_song' IGNORE INTO TABLE `playlist_song` \
             CHARACTER SET utf8mb4 \
             FIELDS TERMINATED BY ',' LINES TERMINATED BY '\\n' \
             (`playlist_id`, `song_id`, `sort_order`)"
        );
    }

    #[test]
    fn test_load_data_sql_rejects_quote() {
        let result = load_data_sql(Table::User, Path::new("/tmp/it's/user"));
        assert!(matches!(result, Err(MySQLPopulatorError::Path(_))));
    }

    #[test]
    fn test_truncate_sql() {
        assert_eq!(truncate_sql(Table::User), "TRUNCATE TABLE `user`");
    }

    #[test]
    fn test_artist_ids_sql() {
        assert_eq!(
            artist_ids_sql(3),
            "SELECT `id`, `ulid` FROM `artist` WHERE `ulid` IN (?, ?, ?)"
        );
    }
}
