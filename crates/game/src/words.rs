//! Word-list loading and the effective vocabulary for a gamemode.
//!
//! A gamemode names an ordered set of word-list files; a path prefixed
//! with `-` is a blacklist whose entries are excluded instead of drawn
//! from. The playable vocabulary is the union of the regular lists minus
//! the union of the blacklists.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use {rand::prelude::IndexedRandom, tracing::debug};

use crate::{Error, Result};

/// One word-list path plus whether it is a blacklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordListSpec {
    pub path: PathBuf,
    pub negated: bool,
}

impl WordListSpec {
    /// Parse a pipe-delimited path list, e.g.
    /// `./words.txt|-./profanity.txt`. Empty segments are skipped.
    pub fn parse_list(raw: &str) -> Vec<WordListSpec> {
        raw.split('|')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.strip_prefix('-') {
                Some(rest) => WordListSpec {
                    path: PathBuf::from(rest),
                    negated: true,
                },
                None => WordListSpec {
                    path: PathBuf::from(entry),
                    negated: false,
                },
            })
            .collect()
    }
}

/// The playable vocabulary for a gamemode, immutable after load.
#[derive(Debug, Clone)]
pub struct WordSource {
    words: Vec<String>,
}

impl WordSource {
    /// Load and combine the given word lists.
    ///
    /// Each file is read as whitespace-trimmed, non-empty lines and
    /// lowercased. Only fully alphabetic words from the regular lists are
    /// playable; blacklists exclude on exact match. An unreadable path
    /// fails the whole load, naming the path.
    pub fn load(specs: &[WordListSpec]) -> Result<Self> {
        let mut included = BTreeSet::new();
        let mut excluded = BTreeSet::new();

        for spec in specs {
            let words = read_words(&spec.path)?;
            debug!(
                path = %spec.path.display(),
                negated = spec.negated,
                count = words.len(),
                "loaded word list"
            );
            if spec.negated {
                excluded.extend(words);
            } else {
                included.extend(
                    words
                        .into_iter()
                        .filter(|w| w.chars().all(char::is_alphabetic)),
                );
            }
        }

        let words = included
            .into_iter()
            .filter(|word| !excluded.contains(word))
            .collect();
        Ok(Self { words })
    }

    /// Build a vocabulary directly from words (test and tooling helper).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: BTreeSet<String> = words
            .into_iter()
            .map(|w| w.into().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            words: words.into_iter().collect(),
        }
    }

    /// Pick one word uniformly at random. Never mutates the vocabulary.
    pub fn pick(&self) -> Result<&str> {
        let mut rng = rand::rng();
        self.words
            .choose(&mut rng)
            .map(String::as_str)
            .ok_or(Error::EmptyVocabulary)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.binary_search_by(|w| w.as_str().cmp(word)).is_ok()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

fn read_words(path: &Path) -> Result<BTreeSet<String>> {
    let content = fs::read_to_string(path).map_err(|source| Error::WordList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect())
}
