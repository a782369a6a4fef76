//! Core record types for the listen80 data generator.
//!
//! This crate provides the foundational types shared by the generator and
//! the populators:
//!
//! - [`Table`] - The six target tables and their bulk-import column order
//! - [`User`], [`Playlist`], [`Artist`], [`Song`], [`PlaylistSong`],
//!   [`PlaylistFavorite`] - In-memory records produced by the generators
//! - [`DelimitedRow`] - Flat comma-separated encoding used by the bulk loader
//! - [`UserSnapshot`], [`SongSnapshot`] - Projections written to the side files
//!
//! # Architecture
//!
//! ```text
//! listen80-types (this crate)
//!    │
//!    ├─── listen80-generator       (produces records)
//!    │
//!    ├─── listen80-populate        (pipeline, snapshots, BulkLoader trait)
//!    └─── listen80-populate-mysql  (LOAD DATA LOCAL INFILE implementation)
//! ```

pub mod models;
pub mod row;
pub mod snapshot;
pub mod table;

pub use models::{
    Artist, ExistingPlaylist, Playlist, PlaylistFavorite, PlaylistSong, Song, SongDraft, User,
};
pub use row::{format_timestamp, DelimitedRow, DELIMITER};
pub use snapshot::{SongSnapshot, UserSnapshot};
pub use table::Table;
