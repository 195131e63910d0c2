use crate::difficulty::Difficulty;
use crate::error::HangmanError;
use crate::session::{GameSession, GuessOutcome, SessionStatus};
use crate::wordbank::WordRepository;
use crate::{debug_log, info_log};
use rand::Rng;

/// Something the player asked for at a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    SelectDifficulty(Difficulty),
    Guess(String),
    PlayAgain(bool),
    /// Input ended or the player pressed Escape.
    Exit,
}

/// How the player left the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitReason {
    /// Answered "no" to playing again.
    Declined,
    /// Input ended before the player declined.
    Interrupted,
}

/// Returned by [`game_loop`] when the player is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaySummary {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub reason: QuitReason,
}

impl PlaySummary {
    fn new() -> Self {
        Self {
            games_played: 0,
            wins: 0,
            losses: 0,
            reason: QuitReason::Declined,
        }
    }

    fn finish(mut self, reason: QuitReason) -> Self {
        self.reason = reason;
        self
    }
}

/// Terminal front end used by the game loop.
///
/// The `read_*` methods return `None` for input that should be asked for
/// again; implementations report the problem to the player themselves.
pub trait GameInterface {
    fn display_tutorial(&mut self);
    fn read_difficulty(&mut self) -> Option<UserAction>;
    fn display_board(&mut self, session: &GameSession);
    fn read_guess(&mut self) -> Option<UserAction>;
    fn display_win(&mut self, session: &GameSession);
    fn display_loss(&mut self, session: &GameSession);
    fn read_play_again(&mut self) -> Option<UserAction>;
    fn display_exit_message(&mut self);
}

/// Runs games until the player declines to play again or input ends.
///
/// Each turn draws the board, then checks for a loss, then for a win, and
/// only then reads a guess. A guess that uses up the last allowance is
/// therefore reported as a loss one redraw later. A correct whole-word guess
/// ends the game straight away.
///
/// # Errors
/// Word list failures are fatal and returned to the caller.
pub fn game_loop<G, R>(
    repository: &mut WordRepository,
    rng: &mut R,
    interface: &mut G,
) -> Result<PlaySummary, HangmanError>
where
    G: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut summary = PlaySummary::new();
    interface.display_tutorial();

    loop {
        let Some(difficulty) = prompt_difficulty(interface) else {
            interface.display_exit_message();
            return Ok(summary.finish(QuitReason::Interrupted));
        };

        let mut session = GameSession::start(difficulty, repository, rng)?;
        info_log!(
            "New game: {} difficulty, {} letters",
            difficulty,
            session.reveal_buffer().len()
        );
        debug_log!("Target word: {}", session.target_word());

        let Some(outcome) = play_session(&mut session, interface)? else {
            interface.display_exit_message();
            return Ok(summary.finish(QuitReason::Interrupted));
        };

        summary.games_played += 1;
        match outcome {
            GameOutcome::Won => {
                summary.wins += 1;
                interface.display_win(&session);
            }
            GameOutcome::Lost => {
                summary.losses += 1;
                interface.display_loss(&session);
            }
        }
        info_log!("Game over: {:?}", outcome);

        match prompt_play_again(interface) {
            Some(true) => continue,
            Some(false) => {
                interface.display_exit_message();
                return Ok(summary.finish(QuitReason::Declined));
            }
            None => {
                interface.display_exit_message();
                return Ok(summary.finish(QuitReason::Interrupted));
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameOutcome {
    Won,
    Lost,
}

/// Plays one session to completion. `None` means the player left mid-game.
fn play_session<G: GameInterface + ?Sized>(
    session: &mut GameSession,
    interface: &mut G,
) -> Result<Option<GameOutcome>, HangmanError> {
    loop {
        interface.display_board(session);

        match session.evaluate() {
            SessionStatus::Lost => return Ok(Some(GameOutcome::Lost)),
            SessionStatus::Won => return Ok(Some(GameOutcome::Won)),
            SessionStatus::InProgress => {}
        }

        let Some(guess) = prompt_guess(interface) else {
            return Ok(None);
        };

        let outcome = session.apply_guess(&guess)?;
        debug_log!("Guess '{}' -> {:?}", guess, outcome);
        if outcome == GuessOutcome::Solved {
            return Ok(Some(GameOutcome::Won));
        }
    }
}

fn prompt_difficulty<G: GameInterface + ?Sized>(interface: &mut G) -> Option<Difficulty> {
    loop {
        match interface.read_difficulty() {
            Some(UserAction::SelectDifficulty(difficulty)) => return Some(difficulty),
            Some(UserAction::Exit) => return None,
            Some(other) => {
                debug_log!("prompt_difficulty() - ignoring {:?}", other);
            }
            None => {}
        }
    }
}

fn prompt_guess<G: GameInterface + ?Sized>(interface: &mut G) -> Option<String> {
    loop {
        match interface.read_guess() {
            Some(UserAction::Guess(guess)) => return Some(guess),
            Some(UserAction::Exit) => return None,
            Some(other) => {
                debug_log!("prompt_guess() - ignoring {:?}", other);
            }
            None => {}
        }
    }
}

fn prompt_play_again<G: GameInterface + ?Sized>(interface: &mut G) -> Option<bool> {
    loop {
        match interface.read_play_again() {
            Some(UserAction::PlayAgain(again)) => return Some(again),
            Some(UserAction::Exit) => return None,
            Some(other) => {
                debug_log!("prompt_play_again() - ignoring {:?}", other);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    /// Feeds canned answers and records what was shown.
    struct Scripted {
        answers: VecDeque<Option<UserAction>>,
        boards: Vec<(String, u32)>,
        outcomes: Vec<String>,
        exited: bool,
    }

    impl Scripted {
        fn new(answers: Vec<Option<UserAction>>) -> Self {
            Self {
                answers: answers.into(),
                boards: Vec::new(),
                outcomes: Vec::new(),
                exited: false,
            }
        }

        fn next(&mut self) -> Option<UserAction> {
            self.answers.pop_front().unwrap_or(Some(UserAction::Exit))
        }
    }

    impl GameInterface for Scripted {
        fn display_tutorial(&mut self) {}

        fn read_difficulty(&mut self) -> Option<UserAction> {
            self.next()
        }

        fn display_board(&mut self, session: &GameSession) {
            self.boards
                .push((session.masked_word(), session.allowance_remaining()));
        }

        fn read_guess(&mut self) -> Option<UserAction> {
            self.next()
        }

        fn display_win(&mut self, session: &GameSession) {
            self.outcomes.push(format!("won {}", session.target_word()));
        }

        fn display_loss(&mut self, session: &GameSession) {
            self.outcomes.push(format!("lost {}", session.target_word()));
        }

        fn read_play_again(&mut self) -> Option<UserAction> {
            self.next()
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn guess(text: &str) -> Option<UserAction> {
        Some(UserAction::Guess(text.to_string()))
    }

    fn single_word_repo(name: &str, word: &str) -> (WordRepository, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "hangman_game_state_{name}_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        for difficulty in Difficulty::ALL {
            std::fs::write(dir.join(difficulty.resource_name()), word).unwrap();
        }
        (WordRepository::from_dir(&dir), dir)
    }

    #[test]
    fn test_game_loop_immediate_exit() {
        let mut repo = WordRepository::embedded();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ui = Scripted::new(vec![Some(UserAction::Exit)]);

        let summary = game_loop(&mut repo, &mut rng, &mut ui).unwrap();
        assert_eq!(summary.games_played, 0);
        assert_eq!(summary.reason, QuitReason::Interrupted);
        assert!(ui.exited);
    }

    #[test]
    fn test_game_loop_whole_word_win_then_decline() {
        let (mut repo, dir) = single_word_repo("win", "cat");
        let mut rng = StdRng::seed_from_u64(1);
        let mut ui = Scripted::new(vec![
            None,
            Some(UserAction::SelectDifficulty(Difficulty::Easy)),
            guess("c"),
            guess("z"),
            guess("cat"),
            Some(UserAction::PlayAgain(false)),
        ]);

        let summary = game_loop(&mut repo, &mut rng, &mut ui).unwrap();
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.reason, QuitReason::Declined);
        assert_eq!(
            ui.boards,
            vec![
                ("_ _ _".to_string(), 15),
                ("c _ _".to_string(), 15),
                ("c _ _".to_string(), 14),
            ]
        );
        assert_eq!(ui.outcomes, vec!["won cat"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_game_loop_loss_reported_one_redraw_later() {
        let (mut repo, dir) = single_word_repo("loss", "dog");
        let mut rng = StdRng::seed_from_u64(1);
        let mut answers = vec![Some(UserAction::SelectDifficulty(Difficulty::Hard))];
        answers.extend((0..7).map(|_| guess("x")));
        answers.push(Some(UserAction::PlayAgain(false)));
        let mut ui = Scripted::new(answers);

        let summary = game_loop(&mut repo, &mut rng, &mut ui).unwrap();
        assert_eq!(summary.losses, 1);
        // Initial board plus one redraw per miss; the last shows zero left.
        assert_eq!(ui.boards.len(), 8);
        assert_eq!(ui.boards.last(), Some(&("_ _ _".to_string(), 0)));
        assert_eq!(ui.outcomes, vec!["lost dog"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_game_loop_play_again_starts_fresh_session() {
        let (mut repo, dir) = single_word_repo("again", "ox");
        let mut rng = StdRng::seed_from_u64(1);
        let mut ui = Scripted::new(vec![
            Some(UserAction::SelectDifficulty(Difficulty::Medium)),
            guess("q"),
            guess("ox"),
            Some(UserAction::PlayAgain(true)),
            Some(UserAction::SelectDifficulty(Difficulty::Hard)),
            guess("o"),
            guess("x"),
            Some(UserAction::PlayAgain(false)),
        ]);

        let summary = game_loop(&mut repo, &mut rng, &mut ui).unwrap();
        assert_eq!(summary.games_played, 2);
        assert_eq!(summary.wins, 2);
        assert_eq!(ui.boards[2], ("_ _".to_string(), 7));
        // Letter-by-letter win is noticed after the final redraw.
        assert_eq!(ui.boards.last(), Some(&("o x".to_string(), 7)));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_game_loop_exit_mid_game() {
        let (mut repo, dir) = single_word_repo("mid", "dog");
        let mut rng = StdRng::seed_from_u64(1);
        let mut ui = Scripted::new(vec![
            Some(UserAction::SelectDifficulty(Difficulty::Easy)),
            guess("d"),
        ]);

        let summary = game_loop(&mut repo, &mut rng, &mut ui).unwrap();
        assert_eq!(summary.games_played, 0);
        assert_eq!(summary.reason, QuitReason::Interrupted);
        assert!(ui.outcomes.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_game_loop_missing_word_list_is_fatal() {
        let mut repo = WordRepository::from_dir("/definitely/not/a/word/dir");
        let mut rng = StdRng::seed_from_u64(1);
        let mut ui = Scripted::new(vec![Some(UserAction::SelectDifficulty(Difficulty::Easy))]);

        let result = game_loop(&mut repo, &mut rng, &mut ui);
        assert!(matches!(
            result,
            Err(HangmanError::WordListUnavailable { .. })
        ));
    }
}
