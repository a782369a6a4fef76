//! User and playlist generators.

use crate::corpus::{Corpus, NAME_WORDS};
use crate::generators::timestamp::{between, within_past_year};
use crate::generators::ulid::generate_ulid;
use crate::long_tail::LongTailSampler;
use chrono::{DateTime, Utc};
use listen80_types::{Playlist, User, UserSnapshot};
use rand::Rng;
use std::collections::HashSet;

/// Probability that a generated user is banned.
pub const BAN_RATE: f64 = 0.05;

/// Account draws before falling back to a numeric suffix.
const ACCOUNT_DRAWS: usize = 16;

/// Timestamp shared by all seed users.
const SEED_USER_TIMESTAMP: i64 = 1;

/// Fixed accounts always present for manual / scripted login:
/// `(account, display_name, raw password, bcrypt hash)`.
const SEED_USERS: [(&str, &str, &str, &str); 3] = [
    (
        "isucon",
        "isucon",
        "isuconpass",
        "$2b$11$smSqDIk.wv4UlzxCFDHqeOD922guLSKoeHmjWgfzOttlaNu65xlKW",
    ),
    (
        "dummy",
        "dummypass",
        "dummypass",
        "$2b$11$dUin2kiGvI8MBZxXTL2qweX6RTkm5LmHuLnmDAdEMx0YjBHRMa64q",
    ),
    (
        "adminuser",
        "管理者",
        "adminpass",
        "$2b$12$ccW9mADvL5UhZS42HbqspOcYmo/im8ScJ2vkewkxywYRnd/bLVwrC",
    ),
];

/// The three seed users.
pub fn seed_users() -> Vec<User> {
    let at = DateTime::from_timestamp(SEED_USER_TIMESTAMP, 0).unwrap_or_default();
    SEED_USERS
        .iter()
        .map(|(account, display_name, raw, hash)| User {
            account: account.to_string(),
            display_name: display_name.to_string(),
            password_raw: raw.to_string(),
            password_hash: hash.to_string(),
            is_ban: false,
            created_at: at,
            last_logined_at: at,
        })
        .collect()
}

/// Account names of the seed users.
pub fn seed_accounts() -> impl Iterator<Item = &'static str> {
    SEED_USERS.iter().map(|(account, ..)| *account)
}

/// A generated user's account together with how many playlists it will
/// favorite once playlists exist in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritingUser {
    pub account: String,
    pub favorite_budget: usize,
}

/// One user with the playlists it owns.
#[derive(Debug, Clone)]
pub struct GeneratedUser {
    pub user: User,
    pub playlists: Vec<Playlist>,
    /// Sampled playlist count; the user owns one playlist fewer.
    pub playlist_budget: usize,
    pub favorite_budget: usize,
}

impl GeneratedUser {
    pub fn snapshot(&self) -> UserSnapshot {
        UserSnapshot::new(&self.user, self.playlist_budget, self.favorite_budget)
    }

    pub fn favoriting(&self) -> FavoritingUser {
        FavoritingUser {
            account: self.user.account.clone(),
            favorite_budget: self.favorite_budget,
        }
    }
}

/// Draw an account not yet in `taken` and record it there.
pub fn unique_account<R: Rng>(
    rng: &mut R,
    corpus: &Corpus,
    taken: &mut HashSet<String>,
) -> String {
    for _ in 0..ACCOUNT_DRAWS {
        let account = corpus.english_name(rng, NAME_WORDS, "");
        if taken.insert(account.clone()) {
            return account;
        }
    }

    let base = corpus.english_name(rng, NAME_WORDS, "");
    let mut n = 1u64;
    loop {
        let account = format!("{base}{n}");
        if taken.insert(account.clone()) {
            return account;
        }
        n += 1;
    }
}

/// Generate one user and its playlists.
///
/// The account is unique among `taken`. The user owns
/// `sample(max_playlists) - 1` playlists, so owning none is possible.
pub fn generate_user<R: Rng>(
    rng: &mut R,
    corpus: &Corpus,
    sampler: &mut LongTailSampler,
    taken: &mut HashSet<String>,
    max_playlists: usize,
    now: DateTime<Utc>,
) -> GeneratedUser {
    let account = unique_account(rng, corpus, taken);
    let display_name = corpus.mixed_name(rng, NAME_WORDS, "");
    let credential = corpus.password(rng).clone();
    let created_at = within_past_year(rng, now);

    let user = User {
        account,
        display_name,
        password_raw: credential.raw,
        password_hash: credential.hash,
        is_ban: rng.random_bool(BAN_RATE),
        created_at,
        last_logined_at: between(rng, created_at, now),
    };

    let favorite_budget = sampler.sample(max_playlists);
    let playlist_budget = sampler.sample(max_playlists);
    let playlists = (0..playlist_budget.saturating_sub(1))
        .map(|_| generate_playlist(rng, corpus, &user, now))
        .collect();

    GeneratedUser {
        user,
        playlists,
        playlist_budget,
        favorite_budget,
    }
}

/// Generate one playlist owned by `owner`.
///
/// `owner.created_at <= created_at <= updated_at <= now`.
pub fn generate_playlist<R: Rng>(
    rng: &mut R,
    corpus: &Corpus,
    owner: &User,
    now: DateTime<Utc>,
) -> Playlist {
    let name = corpus.mixed_name(rng, NAME_WORDS, "");
    let created_at = between(rng, owner.created_at, now);

    Playlist {
        ulid: generate_ulid(rng, created_at),
        name,
        user_account: owner.account.clone(),
        is_public: rng.random_bool(0.5),
        created_at,
        updated_at: between(rng, created_at, now),
    }
}
