//! Flat delimited encoding used by the bulk loader.
//!
//! Fields are joined with [`DELIMITER`] and rows end with `\n`. Nothing is
//! escaped: the generator only produces text fields free of commas and
//! newlines.

use crate::models::{Artist, Playlist, PlaylistFavorite, PlaylistSong, Song, User};
use crate::table::Table;
use chrono::{DateTime, Utc};

/// Field separator for delimited files.
pub const DELIMITER: char = ',';

/// Format a timestamp the way MySQL `DATETIME` columns accept it.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn flag(value: bool) -> String {
    let digit = if value { "1" } else { "0" };
    digit.to_string()
}

/// A record that can be written as one line of a delimited file.
pub trait DelimitedRow {
    /// Table the row is loaded into.
    const TABLE: Table;

    /// Field values, in [`Table::columns`] order.
    fn fields(&self) -> Vec<String>;

    /// The row as a single line, without the trailing newline.
    fn to_line(&self) -> String {
        let fields = self.fields();
        let mut line = String::with_capacity(fields.iter().map(|f| f.len() + 1).sum());
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                line.push(DELIMITER);
            }
            line.push_str(field);
        }
        line
    }
}

impl DelimitedRow for User {
    const TABLE: Table = Table::User;

    fn fields(&self) -> Vec<String> {
        vec![
            self.account.clone(),
            self.display_name.clone(),
            self.password_hash.clone(),
            flag(self.is_ban),
            format_timestamp(&self.created_at),
            format_timestamp(&self.last_logined_at),
        ]
    }
}

impl DelimitedRow for Playlist {
    const TABLE: Table = Table::Playlist;

    fn fields(&self) -> Vec<String> {
        vec![
            self.ulid.clone(),
            self.name.clone(),
            self.user_account.clone(),
            flag(self.is_public),
            format_timestamp(&self.created_at),
            format_timestamp(&self.updated_at),
        ]
    }
}

impl DelimitedRow for Artist {
    const TABLE: Table = Table::Artist;

    fn fields(&self) -> Vec<String> {
        vec![self.ulid.clone(), self.name.clone()]
    }
}

impl DelimitedRow for Song {
    const TABLE: Table = Table::Song;

    fn fields(&self) -> Vec<String> {
        vec![
            self.ulid.clone(),
            self.title.clone(),
            self.artist_id.to_string(),
            self.album.clone(),
            self.track_number.to_string(),
            flag(self.is_public),
        ]
    }
}

impl DelimitedRow for PlaylistSong {
    const TABLE: Table = Table::PlaylistSong;

    fn fields(&self) -> Vec<String> {
        vec![
            self.playlist_id.to_string(),
            self.song_id.to_string(),
            self.sort_order.to_string(),
        ]
    }
}

impl DelimitedRow for PlaylistFavorite {
    const TABLE: Table = Table::PlaylistFavorite;

    fn fields(&self) -> Vec<String> {
        vec![
            self.playlist_id.to_string(),
            self.favorite_user_account.clone(),
            format_timestamp(&self.created_at),
        ]
    }
}
