//! A single play-through: one target word, one reveal buffer, one allowance.

use crate::difficulty::Difficulty;
use crate::error::HangmanError;
use crate::wordbank::WordRepository;
use crate::debug_log;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Won,
    Lost,
}

/// Result of applying one guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The whole word was guessed; the session is won.
    Solved,
    /// The letter occurs in the word. `already_known` is set when every
    /// occurrence had been revealed before.
    Revealed {
        letter: char,
        occurrences: usize,
        already_known: bool,
    },
    /// Wrong letter or wrong word; one allowance was spent.
    Miss { allowance_remaining: u32 },
}

#[derive(Debug, Clone)]
pub struct GameSession {
    target_word: String,
    target: Vec<char>,
    revealed: Vec<Option<char>>,
    allowance_remaining: u32,
    misses: Vec<String>,
    status: SessionStatus,
}

impl GameSession {
    /// Starts a session for `difficulty` with a word drawn from `repository`.
    ///
    /// # Errors
    /// Propagates word list failures from the repository.
    pub fn start<R: Rng + ?Sized>(
        difficulty: Difficulty,
        repository: &mut WordRepository,
        rng: &mut R,
    ) -> Result<Self, HangmanError> {
        let word = repository.select_word(difficulty, rng)?;
        Ok(Self::new(&word, difficulty.allowance()))
    }

    /// Starts a session for a known word and allowance.
    #[must_use]
    pub fn new(word: &str, allowance: u32) -> Self {
        let target_word = word.to_lowercase();
        let target: Vec<char> = target_word.chars().collect();
        debug_log!(
            "GameSession::new() - {} letters, {} allowance",
            target.len(),
            allowance
        );
        Self {
            revealed: vec![None; target.len()],
            target_word,
            target,
            allowance_remaining: allowance,
            misses: Vec::new(),
            status: SessionStatus::InProgress,
        }
    }

    #[must_use]
    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    #[must_use]
    pub fn reveal_buffer(&self) -> &[Option<char>] {
        &self.revealed
    }

    #[must_use]
    pub fn allowance_remaining(&self) -> u32 {
        self.allowance_remaining
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Wrong guesses made so far, in order.
    #[must_use]
    pub fn misses(&self) -> &[String] {
        &self.misses
    }

    #[must_use]
    pub fn is_fully_revealed(&self) -> bool {
        self.revealed.iter().all(Option::is_some)
    }

    /// The reveal buffer as shown to the player, e.g. `c _ t`.
    #[must_use]
    pub fn masked_word(&self) -> String {
        self.revealed
            .iter()
            .map(|slot| slot.unwrap_or('_').to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Applies one guess.
    ///
    /// A correct whole-word guess wins immediately. Letter reveals and
    /// misses leave the status untouched; running out of allowance or
    /// revealing the last letter is picked up by the next [`evaluate`].
    ///
    /// # Errors
    /// Returns `HangmanError::SessionFinished` once the session is won or lost.
    ///
    /// [`evaluate`]: GameSession::evaluate
    pub fn apply_guess(&mut self, input: &str) -> Result<GuessOutcome, HangmanError> {
        if self.status != SessionStatus::InProgress {
            return Err(HangmanError::SessionFinished);
        }

        let guess = input.to_lowercase();
        let mut letters = guess.chars();

        match (letters.next(), letters.next()) {
            (Some(letter), None) if self.target.contains(&letter) => {
                Ok(self.reveal(letter))
            }
            (Some(_), Some(_)) if guess == self.target_word => {
                self.finish(SessionStatus::Won);
                Ok(GuessOutcome::Solved)
            }
            _ => {
                self.allowance_remaining = self.allowance_remaining.saturating_sub(1);
                self.misses.push(guess);
                Ok(GuessOutcome::Miss {
                    allowance_remaining: self.allowance_remaining,
                })
            }
        }
    }

    /// Checks for the end of the game: loss first, then win.
    pub fn evaluate(&mut self) -> SessionStatus {
        if self.status == SessionStatus::InProgress {
            if self.allowance_remaining == 0 {
                self.finish(SessionStatus::Lost);
            } else if self.is_fully_revealed() {
                self.finish(SessionStatus::Won);
            }
        }
        self.status
    }

    fn reveal(&mut self, letter: char) -> GuessOutcome {
        let mut occurrences = 0;
        let mut already_known = true;
        for (slot, &ch) in self.revealed.iter_mut().zip(&self.target) {
            if ch == letter {
                occurrences += 1;
                already_known &= slot.is_some();
                *slot = Some(ch);
            }
        }
        GuessOutcome::Revealed {
            letter,
            occurrences,
            already_known,
        }
    }

    fn finish(&mut self, status: SessionStatus) {
        if status == SessionStatus::Won {
            for (slot, &ch) in self.revealed.iter_mut().zip(&self.target) {
                *slot = Some(ch);
            }
        }
        debug_log!("GameSession::finish() - {:?}", status);
        self.status = status;
    }
}
