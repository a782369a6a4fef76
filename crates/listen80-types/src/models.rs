//! In-memory records produced by the generators.
//!
//! Records live only between generation and bulk import. Numeric ids are
//! assigned by the store, so records that reference other tables by id
//! ([`Song`], [`PlaylistSong`], [`PlaylistFavorite`]) can only be built after
//! the referenced rows have been loaded and read back.

use chrono::{DateTime, Utc};

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub account: String,
    pub display_name: String,
    /// Unhashed password, kept for the snapshot file only.
    pub password_raw: String,
    pub password_hash: String,
    pub is_ban: bool,
    pub created_at: DateTime<Utc>,
    pub last_logined_at: DateTime<Utc>,
}

/// A playlist owned by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub ulid: String,
    pub name: String,
    pub user_account: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub ulid: String,
    pub name: String,
}

/// A song whose artist is still identified by ULID.
///
/// Becomes a [`Song`] once the artist's store-assigned id is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongDraft {
    pub ulid: String,
    pub title: String,
    pub artist_ulid: String,
    pub artist_name: String,
    pub album: String,
    pub track_number: u32,
    pub is_public: bool,
}

impl SongDraft {
    /// Attach the store-assigned artist id.
    pub fn resolve(self, artist_id: u64) -> Song {
        Song {
            ulid: self.ulid,
            title: self.title,
            artist_id,
            artist_name: self.artist_name,
            album: self.album,
            track_number: self.track_number,
            is_public: self.is_public,
        }
    }
}

/// A song ready for import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub ulid: String,
    pub title: String,
    pub artist_id: u64,
    pub artist_name: String,
    pub album: String,
    pub track_number: u32,
    pub is_public: bool,
}

/// One position of a song inside a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistSong {
    pub playlist_id: u64,
    pub song_id: u64,
    pub sort_order: u32,
}

/// A user favoriting a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistFavorite {
    pub playlist_id: u64,
    pub favorite_user_account: String,
    pub created_at: DateTime<Utc>,
}

/// A playlist row read back from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistingPlaylist {
    pub id: u64,
    pub created_at: DateTime<Utc>,
}
