//! Artist, album and song generators.
//!
//! Albums are not stored as rows; an album is only the free-text `album`
//! column shared by its songs.

use crate::corpus::{Corpus, NAME_WORDS};
use crate::generators::ulid::generate_ulid;
use crate::long_tail::LongTailSampler;
use chrono::{DateTime, Utc};
use listen80_types::{Artist, SongDraft};
use rand::Rng;

/// Words in an album name.
const ALBUM_NAME_WORDS: usize = 2;

/// Per-artist caps for [`generate_artist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLimits {
    pub max_albums_per_artist: usize,
    pub max_songs_per_album: usize,
}

impl Default for CatalogLimits {
    fn default() -> Self {
        Self {
            max_albums_per_artist: 20,
            max_songs_per_album: 15,
        }
    }
}

/// One artist with all of its songs.
#[derive(Debug, Clone)]
pub struct GeneratedArtist {
    pub artist: Artist,
    pub songs: Vec<SongDraft>,
}

/// Generate one artist, its albums and their songs.
///
/// Track numbers restart at 1 for every album.
pub fn generate_artist<R: Rng>(
    rng: &mut R,
    corpus: &Corpus,
    sampler: &mut LongTailSampler,
    limits: CatalogLimits,
    now: DateTime<Utc>,
) -> GeneratedArtist {
    let artist = Artist {
        ulid: generate_ulid(rng, now),
        name: corpus.mixed_name(rng, NAME_WORDS, ""),
    };

    let mut songs = Vec::new();
    let album_count = sampler.sample(limits.max_albums_per_artist);
    for _ in 0..album_count {
        let album = corpus.mixed_name(rng, ALBUM_NAME_WORDS, " ");
        let song_count = sampler.sample(limits.max_songs_per_album);

        for track_number in 1..=song_count {
            songs.push(SongDraft {
                ulid: generate_ulid(rng, now),
                title: corpus.mixed_name(rng, NAME_WORDS, ""),
                artist_ulid: artist.ulid.clone(),
                artist_name: artist.name.clone(),
                album: album.clone(),
                track_number: track_number as u32,
                is_public: true,
            });
        }
    }

    GeneratedArtist { artist, songs }
}
