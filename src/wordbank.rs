use crate::difficulty::Difficulty;
use crate::error::HangmanError;
use crate::info_log;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_EASY_WORDS: &str = include_str!("resources/easy_words.txt");
pub const EMBEDDED_MEDIUM_WORDS: &str = include_str!("resources/medium_words.txt");
pub const EMBEDDED_HARD_WORDS: &str = include_str!("resources/hard_words.txt");

/// Where the per-tier word lists come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    /// Lists compiled into the binary.
    Embedded,
    /// A directory holding `easy_words.txt`, `medium_words.txt` and `hard_words.txt`.
    Directory(PathBuf),
}

impl WordSource {
    fn load(&self, difficulty: Difficulty) -> Result<Vec<String>, HangmanError> {
        match self {
            Self::Embedded => Ok(load_wordbank_from_str(embedded_words(difficulty))),
            Self::Directory(dir) => load_wordbank_from_file(dir.join(difficulty.resource_name())),
        }
    }
}

fn embedded_words(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => EMBEDDED_EASY_WORDS,
        Difficulty::Medium => EMBEDDED_MEDIUM_WORDS,
        Difficulty::Hard => EMBEDDED_HARD_WORDS,
    }
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.split_whitespace().map(str::to_string).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, HangmanError> {
    let path = path.as_ref();
    let unavailable = |source| HangmanError::WordListUnavailable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(unavailable)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(unavailable)?;
        words.extend(line.split_whitespace().map(str::to_string));
    }
    Ok(words)
}

/// Process-wide store of word lists, one per difficulty.
///
/// Each list is loaded from its source the first time its tier is requested
/// and served from memory afterwards. The repository is owned by the caller
/// and handed to every new game, so all games in a process share the cache.
#[derive(Debug)]
pub struct WordRepository {
    source: WordSource,
    lists: HashMap<Difficulty, Vec<String>>,
}

impl WordRepository {
    #[must_use]
    pub fn new(source: WordSource) -> Self {
        Self {
            source,
            lists: HashMap::new(),
        }
    }

    #[must_use]
    pub fn embedded() -> Self {
        Self::new(WordSource::Embedded)
    }

    pub fn from_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self::new(WordSource::Directory(dir.into()))
    }

    #[must_use]
    pub fn source(&self) -> &WordSource {
        &self.source
    }

    #[must_use]
    pub fn is_loaded(&self, difficulty: Difficulty) -> bool {
        self.lists.contains_key(&difficulty)
    }

    /// Returns the list for `difficulty`, loading it on first use.
    ///
    /// # Errors
    /// Returns `HangmanError::WordListUnavailable` if the backing resource
    /// cannot be read. A failed load is not cached.
    pub fn words(&mut self, difficulty: Difficulty) -> Result<&[String], HangmanError> {
        if !self.lists.contains_key(&difficulty) {
            let words = self.source.load(difficulty)?;
            info_log!("Loaded {} words for {} difficulty", words.len(), difficulty);
            self.lists.insert(difficulty, words);
        }
        Ok(self
            .lists
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Picks a word for `difficulty` uniformly at random.
    ///
    /// # Errors
    /// Propagates load failures, and returns `HangmanError::EmptyWordList`
    /// when the loaded list has no words.
    pub fn select_word<R: Rng + ?Sized>(
        &mut self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<String, HangmanError> {
        self.words(difficulty)?
            .choose(rng)
            .cloned()
            .ok_or(HangmanError::EmptyWordList { difficulty })
    }
}
