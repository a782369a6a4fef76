//! Word and password pools shared by all generators.
//!
//! The corpus is built once per run from the generator's seeded RNG. Every
//! name, title and account in the dataset is assembled from these pools.

use crate::generator::GeneratorError;
use fake::faker::company::raw::{Buzzword, BuzzwordTail, Profession};
use fake::faker::job::raw::{Field, Position};
use fake::faker::lorem::raw::Word;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::{EN, JA_JP};
use fake::Fake;
use listen80_types::DELIMITER;
use rand::distr::Alphanumeric;
use rand::seq::index;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Number of words joined into accounts, display names, titles.
pub const NAME_WORDS: usize = 3;

/// Pool sizes and hashing cost for [`Corpus::build`].
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Upper bound on distinct words in each pool.
    pub word_count: usize,
    /// Distinct (raw, hash) password pairs.
    pub password_count: usize,
    /// bcrypt cost for the password pool.
    pub bcrypt_cost: u32,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            word_count: 10_000,
            password_count: 99,
            bcrypt_cost: 4,
        }
    }
}

/// A raw password and its bcrypt hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub raw: String,
    pub hash: String,
}

/// Pools of synthetic words and passwords.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Distinct mixed English / Japanese words, for display names and titles.
    words: Vec<String>,
    /// Distinct lowercase ASCII words, for account names.
    words_en: Vec<String>,
    passwords: Vec<Credential>,
}

impl Corpus {
    /// Build all pools from the given RNG.
    pub fn build<R: Rng>(rng: &mut R, config: &CorpusConfig) -> Result<Self, GeneratorError> {
        debug!("Building word pool ({} words)", config.word_count);
        let words = build_pool(rng, config.word_count, is_clean, |rng| {
            if rng.random_bool(0.5) {
                english_word(rng)
            } else {
                japanese_word(rng)
            }
        });
        ensure_pool("words", &words)?;

        debug!("Building English word pool ({} words)", config.word_count);
        let words_en = build_pool(rng, config.word_count, is_account_word, |rng| {
            english_word(rng).to_lowercase()
        });
        ensure_pool("words_en", &words_en)?;
        debug!(
            "Word pools hold {} mixed and {} English words",
            words.len(),
            words_en.len()
        );

        debug!(
            "Hashing {} passwords (cost {})",
            config.password_count, config.bcrypt_cost
        );
        let passwords = (0..config.password_count)
            .map(|_| make_credential(rng, config.bcrypt_cost))
            .collect::<Result<Vec<_>, _>>()?;
        if passwords.is_empty() {
            return Err(GeneratorError::Config(
                "password pool must hold at least one password".to_string(),
            ));
        }

        Ok(Self {
            words,
            words_en,
            passwords,
        })
    }

    /// Join `n` distinct words of the mixed pool.
    pub fn mixed_name<R: Rng>(&self, rng: &mut R, n: usize, separator: &str) -> String {
        join_distinct(rng, &self.words, n, separator)
    }

    /// Join `n` distinct words of the English pool.
    pub fn english_name<R: Rng>(&self, rng: &mut R, n: usize, separator: &str) -> String {
        join_distinct(rng, &self.words_en, n, separator)
    }

    /// Pick one password pair.
    pub fn password<R: Rng>(&self, rng: &mut R) -> &Credential {
        &self.passwords[rng.random_range(0..self.passwords.len())]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn words_en(&self) -> &[String] {
        &self.words_en
    }

    pub fn passwords(&self) -> &[Credential] {
        &self.passwords
    }
}

/// One English word: lorem, a given or family name, or a business word.
fn english_word<R: Rng>(rng: &mut R) -> String {
    match rng.random_range(0..5) {
        0 => Word(EN).fake_with_rng(rng),
        1 => FirstName(EN).fake_with_rng(rng),
        2 => LastName(EN).fake_with_rng(rng),
        3 => Buzzword(EN).fake_with_rng(rng),
        _ => {
            if rng.random_bool(0.5) {
                Profession(EN).fake_with_rng(rng)
            } else {
                BuzzwordTail(EN).fake_with_rng(rng)
            }
        }
    }
}

/// One Japanese word: a full name, a given or family name, or a job word.
fn japanese_word<R: Rng>(rng: &mut R) -> String {
    match rng.random_range(0..5) {
        0 | 1 => {
            let last: String = LastName(JA_JP).fake_with_rng(rng);
            let first: String = FirstName(JA_JP).fake_with_rng(rng);
            format!("{last}{first}")
        }
        2 => FirstName(JA_JP).fake_with_rng(rng),
        3 => LastName(JA_JP).fake_with_rng(rng),
        _ => {
            if rng.random_bool(0.5) {
                Field(JA_JP).fake_with_rng(rng)
            } else {
                Position(JA_JP).fake_with_rng(rng)
            }
        }
    }
}

/// A word is usable when it cannot break a delimited row.
fn is_clean(word: &str) -> bool {
    !word.is_empty()
        && !word.contains([DELIMITER, '\\'])
        && !word.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// Account words stay lowercase ASCII so case- and accent-insensitive
/// collations cannot fold two accounts together.
fn is_account_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

/// Draw distinct words until `size` are found or the sources run dry.
fn build_pool<R, P, F>(rng: &mut R, size: usize, accept: P, mut next: F) -> Vec<String>
where
    R: Rng,
    P: Fn(&str) -> bool,
    F: FnMut(&mut R) -> String,
{
    let mut pool = Vec::with_capacity(size);
    let mut seen = HashSet::with_capacity(size);
    let mut attempts = 0;
    while pool.len() < size && attempts < size.saturating_mul(8) {
        attempts += 1;
        let word = next(rng);
        if accept(&word) && seen.insert(word.clone()) {
            pool.push(word);
        }
    }
    pool
}

fn ensure_pool(name: &'static str, pool: &[String]) -> Result<(), GeneratorError> {
    if pool.len() < NAME_WORDS {
        return Err(GeneratorError::CorpusTooSmall {
            pool: name,
            size: pool.len(),
            needed: NAME_WORDS,
        });
    }
    Ok(())
}

fn make_credential<R: Rng>(rng: &mut R, cost: u32) -> Result<Credential, GeneratorError> {
    let len = rng.random_range(8..=16);
    let raw: String = (0..len).map(|_| rng.sample(Alphanumeric) as char).collect();

    let mut salt = [0u8; 16];
    rng.fill(&mut salt);
    let hash =
        bcrypt::hash_with_salt(&raw, cost, salt)?.format_for_version(bcrypt::Version::TwoB);

    Ok(Credential { raw, hash })
}

fn join_distinct<R: Rng>(rng: &mut R, pool: &[String], n: usize, separator: &str) -> String {
    let n = n.min(pool.len());
    index::sample(rng, pool.len(), n)
        .into_iter()
        .map(|i| pool[i].as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_config() -> CorpusConfig {
        CorpusConfig {
            word_count: 200,
            password_count: 3,
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn test_build_corpus() {
        let mut rng = StdRng::seed_from_u64(42);
        let corpus = Corpus::build(&mut rng, &small_config()).unwrap();

        assert!(corpus.words().len() >= NAME_WORDS);
        assert!(corpus.words_en().len() >= NAME_WORDS);
        assert_eq!(corpus.passwords().len(), 3);
    }

    #[test]
    fn test_words_are_delimiter_free() {
        let mut rng = StdRng::seed_from_u64(7);
        let corpus = Corpus::build(&mut rng, &small_config()).unwrap();

        for word in corpus.words().iter().chain(corpus.words_en()) {
            assert!(is_clean(word), "unexpected word {word:?}");
        }
    }

    #[test]
    fn test_password_hash_verifies() {
        let mut rng = StdRng::seed_from_u64(42);
        let corpus = Corpus::build(&mut rng, &small_config()).unwrap();

        let credential = corpus.password(&mut rng);
        assert!(credential.hash.starts_with("$2b$04$"));
        assert!(bcrypt::verify(&credential.raw, &credential.hash).unwrap());
    }

    #[test]
    fn test_deterministic_corpus() {
        let c1 = Corpus::build(&mut StdRng::seed_from_u64(42), &small_config()).unwrap();
        let c2 = Corpus::build(&mut StdRng::seed_from_u64(42), &small_config()).unwrap();

        assert_eq!(c1.words(), c2.words());
        assert_eq!(c1.passwords(), c2.passwords());
    }

    #[test]
    fn test_join_distinct_uses_distinct_words() {
        let pool: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let mut parts: Vec<char> = join_distinct(&mut rng, &pool, 3, "").chars().collect();
        parts.sort_unstable();
        assert_eq!(parts, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_pools_are_distinct() {
        let config = CorpusConfig {
            word_count: 2_000,
            password_count: 1,
            bcrypt_cost: 4,
        };
        let corpus = Corpus::build(&mut StdRng::seed_from_u64(42), &config).unwrap();

        let mixed: HashSet<&String> = corpus.words().iter().collect();
        let english: HashSet<&String> = corpus.words_en().iter().collect();
        assert_eq!(mixed.len(), corpus.words().len());
        assert_eq!(english.len(), corpus.words_en().len());
        assert!(corpus.words().len() > 1_000);
        assert!(corpus.words_en().len() > 1_000);
    }

    #[test]
    fn test_mixed_pool_has_japanese() {
        let mut rng = StdRng::seed_from_u64(42);
        let corpus = Corpus::build(&mut rng, &small_config()).unwrap();

        let japanese = corpus.words().iter().filter(|w| !w.is_ascii()).count();
        assert!(japanese > 0);
        assert!(japanese < corpus.words().len());
        assert!(corpus.words_en().iter().all(|w| is_account_word(w)));
    }

    #[test]
    fn test_is_clean() {
        assert!(is_clean("word"));
        assert!(is_clean("佐藤さくら"));
        assert!(!is_clean("a,b"));
        assert!(!is_clean("line\n"));
        assert!(!is_clean("two words"));
        assert!(!is_clean(""));
    }

    #[test]
    fn test_is_account_word() {
        assert!(is_account_word("aaliyah"));
        assert!(!is_account_word("Aaliyah"));
        assert!(!is_account_word("josé"));
        assert!(!is_account_word("e-business"));
    }
}
