// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod difficulty;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod session;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use difficulty::Difficulty;
pub use error::HangmanError;
pub use game_state::{GameInterface, PlaySummary, QuitReason, UserAction, game_loop};
pub use session::{GameSession, GuessOutcome, SessionStatus};
pub use wordbank::{WordRepository, WordSource, load_wordbank_from_file, load_wordbank_from_str};
