use crate::difficulty::Difficulty;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HangmanError {
    #[error("Could not open word list \"{}\": {source}", .path.display())]
    WordListUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Word list for {difficulty} difficulty is empty")]
    EmptyWordList { difficulty: Difficulty },

    #[error("The game is already over")]
    SessionFinished,
}
