//! Target tables and their bulk-import column order.

use std::fmt;

/// A table populated by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    User,
    Playlist,
    Artist,
    Song,
    PlaylistSong,
    PlaylistFavorite,
}

impl Table {
    /// All tables, in the order they are truncated and loaded.
    pub const ALL: [Table; 6] = [
        Table::User,
        Table::Playlist,
        Table::Artist,
        Table::Song,
        Table::PlaylistSong,
        Table::PlaylistFavorite,
    ];

    /// SQL table name.
    pub fn name(&self) -> &'static str {
        match self {
            Table::User => "user",
            Table::Playlist => "playlist",
            Table::Artist => "artist",
            Table::Song => "song",
            Table::PlaylistSong => "playlist_song",
            Table::PlaylistFavorite => "playlist_favorite",
        }
    }

    /// Columns in the order the delimited file lists them.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::User => &[
                "account",
                "display_name",
                "password_hash",
                "is_ban",
                "created_at",
                "last_logined_at",
            ],
            Table::Playlist => &[
                "ulid",
                "name",
                "user_account",
                "is_public",
                "created_at",
                "updated_at",
            ],
            Table::Artist => &["ulid", "name"],
            Table::Song => &[
                "ulid",
                "title",
                "artist_id",
                "album",
                "track_number",
                "is_public",
            ],
            Table::PlaylistSong => &["playlist_id", "song_id", "sort_order"],
            Table::PlaylistFavorite => &["playlist_id", "favorite_user_account", "created_at"],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
