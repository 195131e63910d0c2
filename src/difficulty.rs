use std::fmt;

/// Difficulty tier chosen at the start of every game.
///
/// A tier decides both which word list the secret word is drawn from and how
/// many wrong guesses the player may make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Number of wrong guesses allowed before the game is lost.
    #[must_use]
    pub fn allowance(self) -> u32 {
        match self {
            Self::Easy => 15,
            Self::Medium => 10,
            Self::Hard => 7,
        }
    }

    /// Maps a menu choice (1-3) to a tier.
    #[must_use]
    pub fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Self::Easy),
            2 => Some(Self::Medium),
            3 => Some(Self::Hard),
            _ => None,
        }
    }

    #[must_use]
    pub fn choice(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    /// File name of the word list backing this tier.
    #[must_use]
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Easy => "easy_words.txt",
            Self::Medium => "medium_words.txt",
            Self::Hard => "hard_words.txt",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Easy => "Short, simple words",
            Self::Medium => "Longer, more complicated words",
            Self::Hard => "Much harder, longer words",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        };
        f.write_str(name)
    }
}
