//! Snapshot side files for load-testing clients.
//!
//! A uniform sample of the generated users and loaded songs is kept across
//! all cycles with reservoir sampling (Algorithm R) and written once, at the
//! end of the base-entity phase, as pretty-printed JSON arrays.

use crate::error::PopulateError;
use listen80_types::{SongSnapshot, UserSnapshot};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default maximum number of records per snapshot file.
pub const DEFAULT_SNAPSHOT_SIZE: usize = 10_000;

pub const USERS_FILE: &str = "users.json";
pub const SONGS_FILE: &str = "songs.json";

/// Fixed-capacity uniform sample over a stream of items.
#[derive(Debug)]
pub struct Reservoir<T> {
    capacity: usize,
    count: usize,
    items: Vec<T>,
}

impl<T> Reservoir<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            count: 0,
            items: Vec::with_capacity(capacity.min(DEFAULT_SNAPSHOT_SIZE)),
        }
    }

    /// Consider an item for inclusion.
    pub fn consider<R: Rng>(&mut self, rng: &mut R, item: T) {
        self.count += 1;

        if self.items.len() < self.capacity {
            self.items.push(item);
        } else {
            let j = rng.random_range(0..self.count);
            if j < self.capacity {
                self.items[j] = item;
            }
        }
    }

    /// Number of items seen so far.
    pub fn total_seen(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

/// What [`SnapshotExporter::write`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub users_path: PathBuf,
    pub users_written: usize,
    pub songs_path: PathBuf,
    pub songs_written: usize,
}

/// Collects user and song samples and writes `users.json` / `songs.json`.
pub struct SnapshotExporter {
    rng: StdRng,
    users: Reservoir<UserSnapshot>,
    songs: Reservoir<SongSnapshot>,
}

impl SnapshotExporter {
    pub fn new(capacity: usize, rng: StdRng) -> Self {
        Self {
            rng,
            users: Reservoir::new(capacity),
            songs: Reservoir::new(capacity),
        }
    }

    pub fn consider_users(&mut self, users: impl IntoIterator<Item = UserSnapshot>) {
        for user in users {
            self.users.consider(&mut self.rng, user);
        }
    }

    pub fn consider_songs(&mut self, songs: impl IntoIterator<Item = SongSnapshot>) {
        for song in songs {
            self.songs.consider(&mut self.rng, song);
        }
    }

    pub fn users(&self) -> &Reservoir<UserSnapshot> {
        &self.users
    }

    pub fn songs(&self) -> &Reservoir<SongSnapshot> {
        &self.songs
    }

    /// Write both files into `dir`, replacing existing ones. Records are
    /// shuffled before writing.
    pub fn write(&mut self, dir: &Path) -> Result<SnapshotSummary, PopulateError> {
        let users_path = dir.join(USERS_FILE);
        self.users.items.shuffle(&mut self.rng);
        write_json(&users_path, self.users.items())?;

        let songs_path = dir.join(SONGS_FILE);
        self.songs.items.shuffle(&mut self.rng);
        write_json(&songs_path, self.songs.items())?;

        info!(
            "Wrote {} of {} users to {} and {} of {} songs to {}",
            self.users.len(),
            self.users.total_seen(),
            users_path.display(),
            self.songs.len(),
            self.songs.total_seen(),
            songs_path.display()
        );

        Ok(SnapshotSummary {
            users_written: self.users.len(),
            users_path,
            songs_written: self.songs.len(),
            songs_path,
        })
    }
}

fn write_json<T: Serialize>(path: &Path, items: &[T]) -> Result<(), PopulateError> {
    let file = File::create(path).map_err(|e| PopulateError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, items)?;
    writer.flush().map_err(|e| PopulateError::io(path, e))
}
