//! Projections written to the `users.json` / `songs.json` side files.

use crate::models::{Song, User};
use serde::{Deserialize, Serialize};

/// Playlist or favorite count above which a user counts as heavy.
pub const HEAVY_USER_THRESHOLD: usize = 100;

/// A user as seen by load-testing clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub account: String,
    /// Raw password, usable for logging in.
    pub password: String,
    pub display_name: String,
    pub is_ban: bool,
    pub is_heavy: bool,
}

impl UserSnapshot {
    pub fn new(user: &User, playlist_count: usize, favorite_count: usize) -> Self {
        Self {
            account: user.account.clone(),
            password: user.password_raw.clone(),
            display_name: user.display_name.clone(),
            is_ban: user.is_ban,
            is_heavy: playlist_count > HEAVY_USER_THRESHOLD
                || favorite_count > HEAVY_USER_THRESHOLD,
        }
    }
}

/// A song as seen by load-testing clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSnapshot {
    pub ulid: String,
    pub title: String,
    pub artist_id: u64,
    pub artist_name: String,
    pub album: String,
    pub track_number: u32,
    pub is_public: bool,
}

impl From<&Song> for SongSnapshot {
    fn from(song: &Song) -> Self {
        Self {
            ulid: song.ulid.clone(),
            title: song.title.clone(),
            artist_id: song.artist_id,
            artist_name: song.artist_name.clone(),
            album: song.album.clone(),
            track_number: song.track_number,
            is_public: song.is_public,
        }
    }
}
