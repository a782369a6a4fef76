//! Playlist-song and playlist-favorite link generators.
//!
//! Both work on ids read back from the store after the base entities are
//! loaded.

use crate::generators::timestamp::between;
use crate::generators::user::FavoritingUser;
use crate::long_tail::LongTailSampler;
use chrono::{DateTime, Utc};
use listen80_types::{ExistingPlaylist, PlaylistFavorite, PlaylistSong};
use rand::seq::{index, SliceRandom};
use rand::Rng;

/// Upper bound (exclusive) on songs attached to one playlist.
pub const MAX_SONGS_PER_PLAYLIST: usize = 80;

/// `amount` distinct indices into `0..length`, in random order.
fn shuffled_indices<R: Rng>(rng: &mut R, length: usize, amount: usize) -> Vec<usize> {
    let mut picked = index::sample(rng, length, amount.min(length)).into_vec();
    picked.shuffle(rng);
    picked
}

/// Attach a random subset of `song_ids` to one playlist, positions from 1.
pub fn generate_playlist_songs<R: Rng>(
    rng: &mut R,
    playlist_id: u64,
    song_ids: &[u64],
) -> Vec<PlaylistSong> {
    let count = (rng.random::<f64>() * MAX_SONGS_PER_PLAYLIST as f64) as usize;

    shuffled_indices(rng, song_ids.len(), count)
        .into_iter()
        .enumerate()
        .map(|(position, idx)| PlaylistSong {
            playlist_id,
            song_id: song_ids[idx],
            sort_order: position as u32 + 1,
        })
        .collect()
}

fn favorite<R: Rng>(
    rng: &mut R,
    playlist: &ExistingPlaylist,
    account: &str,
    now: DateTime<Utc>,
) -> PlaylistFavorite {
    PlaylistFavorite {
        playlist_id: playlist.id,
        favorite_user_account: account.to_string(),
        created_at: between(rng, playlist.created_at, now),
    }
}

/// Favorites made by one user: `favorite_budget` distinct playlists, capped
/// at the number of playlists.
pub fn favorites_by_user<R: Rng>(
    rng: &mut R,
    user: &FavoritingUser,
    playlists: &[ExistingPlaylist],
    now: DateTime<Utc>,
) -> Vec<PlaylistFavorite> {
    shuffled_indices(rng, playlists.len(), user.favorite_budget)
        .into_iter()
        .map(|idx| favorite(rng, &playlists[idx], &user.account, now))
        .collect()
}

/// Favorites received by one playlist, from `sample(users / 2)` distinct
/// users.
pub fn favorites_of_playlist<R: Rng>(
    rng: &mut R,
    sampler: &mut LongTailSampler,
    playlist: &ExistingPlaylist,
    users: &[FavoritingUser],
    now: DateTime<Utc>,
) -> Vec<PlaylistFavorite> {
    let count = sampler.sample(users.len() / 2);

    shuffled_indices(rng, users.len(), count)
        .into_iter()
        .map(|idx| favorite(rng, playlist, &users[idx].account, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn playlists(n: u64) -> Vec<ExistingPlaylist> {
        (1..=n)
            .map(|id| ExistingPlaylist {
                id,
                created_at: now() - Duration::days(id as i64),
            })
            .collect()
    }

    fn users(n: usize) -> Vec<FavoritingUser> {
        (0..n)
            .map(|i| FavoritingUser {
                account: format!("user{i}"),
                favorite_budget: i,
            })
            .collect()
    }

    #[test]
    fn test_playlist_song_positions_are_dense() {
        let mut rng = StdRng::seed_from_u64(42);
        let song_ids: Vec<u64> = (100..400).collect();

        for playlist_id in 1..50 {
            let links = generate_playlist_songs(&mut rng, playlist_id, &song_ids);
            assert!(links.len() < MAX_SONGS_PER_PLAYLIST);

            let orders: Vec<u32> = links.iter().map(|l| l.sort_order).collect();
            let expected: Vec<u32> = (1..=links.len() as u32).collect();
            assert_eq!(orders, expected);

            assert!(links.iter().all(|l| l.playlist_id == playlist_id));
            assert!(links.iter().all(|l| song_ids.contains(&l.song_id)));
        }
    }

    #[test]
    fn test_playlist_songs_capped_by_song_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let song_ids = vec![1, 2];

        for _ in 0..20 {
            let links = generate_playlist_songs(&mut rng, 1, &song_ids);
            assert!(links.len() <= 2);
        }
        assert!(generate_playlist_songs(&mut rng, 1, &[]).is_empty());
    }

    #[test]
    fn test_favorites_by_user() {
        let mut rng = StdRng::seed_from_u64(42);
        let playlists = playlists(10);
        let user = FavoritingUser {
            account: "fan".to_string(),
            favorite_budget: 4,
        };

        let favs = favorites_by_user(&mut rng, &user, &playlists, now());
        assert_eq!(favs.len(), 4);

        let distinct: HashSet<u64> = favs.iter().map(|f| f.playlist_id).collect();
        assert_eq!(distinct.len(), 4);

        for fav in &favs {
            let playlist = playlists.iter().find(|p| p.id == fav.playlist_id).unwrap();
            assert!(fav.created_at >= playlist.created_at);
            assert!(fav.created_at <= now());
            assert_eq!(fav.favorite_user_account, "fan");
        }
    }

    #[test]
    fn test_favorites_budget_capped_by_playlists() {
        let mut rng = StdRng::seed_from_u64(42);
        let user = FavoritingUser {
            account: "fan".to_string(),
            favorite_budget: 10_000,
        };

        assert_eq!(favorites_by_user(&mut rng, &user, &playlists(3), now()).len(), 3);
        assert!(favorites_by_user(&mut rng, &user, &[], now()).is_empty());
    }

    #[test]
    fn test_favorites_of_playlist() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sampler = LongTailSampler::from_draws(vec![0.0]);
        let users = users(10);
        let playlist = playlists(1)[0];

        let favs = favorites_of_playlist(&mut rng, &mut sampler, &playlist, &users, now());
        assert_eq!(favs.len(), 5);

        let distinct: HashSet<&str> = favs
            .iter()
            .map(|f| f.favorite_user_account.as_str())
            .collect();
        assert_eq!(distinct.len(), 5);
        assert!(favs.iter().all(|f| f.playlist_id == playlist.id));
    }

    #[test]
    fn test_single_user_gets_no_playlist_favorites() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sampler = LongTailSampler::from_draws(vec![0.5]);
        let playlist = playlists(1)[0];

        let favs = favorites_of_playlist(&mut rng, &mut sampler, &playlist, &users(1), now());
        assert!(favs.is_empty());
    }
}
