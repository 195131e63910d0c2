use crate::difficulty::Difficulty;
use crate::game_state::{GameInterface, UserAction};
use crate::session::GameSession;
use crate::debug_log;
use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Hangman CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing easy_words.txt, medium_words.txt and hard_words.txt
    #[arg(short = 'w', long = "words-dir")]
    pub words_dir: Option<PathBuf>,

    /// Seed for word selection, for repeatable games
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Use the full-screen terminal interface
    #[arg(long = "tui")]
    pub tui: bool,

    /// Do not clear the screen between turns
    #[arg(long = "no-clear")]
    pub no_clear: bool,

    /// Write the log here instead of the local data directory
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

pub const GALLOWS_ART: [&str; 8] = [
    "  ___________  ",
    "  |/       |   ",
    "  |        0   ",
    "  |       /|\\ ",
    "  |        |   ",
    "  |       / \\ ",
    "  |            ",
    "__|__          ",
];

pub const TUTORIAL_LINES: [&str; 4] = [
    "- Guess the word before you run out of misses",
    "- You can guess either single characters or the entire word",
    "- Select from three different difficulties",
    "- Guesses are not case sensitive and no words have any spaces in them",
];

// UI Input/Output functions

/// What a line of input turned out to be.
#[derive(Debug, PartialEq, Eq)]
pub enum LineInput<T> {
    Valid(T),
    Invalid(String),
    Exit,
}

fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_string()),
        Err(e) => {
            debug_log!("read_trimmed_line() - {}", e);
            None
        }
    }
}

pub fn parse_difficulty(input: &str) -> Option<Difficulty> {
    input
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(Difficulty::from_choice)
}

/// First token of the line, lowercased.
pub fn parse_guess(input: &str) -> Option<String> {
    input.split_whitespace().next().map(str::to_lowercase)
}

/// `y` or `n`, judged by the first character, case-insensitive.
pub fn parse_play_again(input: &str) -> Option<bool> {
    match input.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('y') => Some(true),
        Some('n') => Some(false),
        _ => None,
    }
}

pub fn read_difficulty<R: BufRead>(reader: &mut R) -> LineInput<Difficulty> {
    let Some(input) = read_trimmed_line(reader) else {
        return LineInput::Exit;
    };
    match parse_difficulty(&input) {
        Some(difficulty) => LineInput::Valid(difficulty),
        None => LineInput::Invalid(input),
    }
}

pub fn read_guess<R: BufRead>(reader: &mut R) -> LineInput<String> {
    let Some(input) = read_trimmed_line(reader) else {
        return LineInput::Exit;
    };
    match parse_guess(&input) {
        Some(guess) => LineInput::Valid(guess),
        None => LineInput::Invalid(input),
    }
}

pub fn read_play_again<R: BufRead>(reader: &mut R) -> LineInput<bool> {
    let Some(input) = read_trimmed_line(reader) else {
        return LineInput::Exit;
    };
    match parse_play_again(&input) {
        Some(again) => LineInput::Valid(again),
        None => LineInput::Invalid(input),
    }
}

#[must_use]
pub fn difficulty_menu() -> String {
    Difficulty::ALL
        .iter()
        .map(|d| {
            format!(
                "{}) {}\n\t({}, {} misses)\n",
                d.choice(),
                d,
                d.description(),
                d.allowance()
            )
        })
        .collect()
}

/// Gallows, misses left and the masked word, as printed in line mode.
#[must_use]
pub fn render_board(session: &GameSession) -> String {
    let mut out = String::new();
    for line in GALLOWS_ART {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&format!(
        "You have {} misses left\n\n",
        session.allowance_remaining()
    ));
    out.push_str(&session.masked_word());
    out.push('\n');
    if !session.misses().is_empty() {
        out.push_str(&format!("Misses: {}\n", session.misses().join(", ")));
    }
    out
}

pub fn display_tutorial() {
    println!("~Welcome to Hangman!~\n");
    for line in TUTORIAL_LINES {
        println!("{line}");
    }
    println!();
}

pub fn display_win() {
    println!("\n\nCongratulations! You win!");
}

pub fn display_loss(word: &str) {
    println!("\n\nSorry! You lost!");
    println!("The word was {word}");
}

pub fn display_exit_message() {
    println!("Goodbye!");
}

fn clear_screen() {
    if let Err(e) = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
        debug_log!("clear_screen() - {}", e);
    }
}

/// Line-based implementation of the GameInterface trait
/// This struct wraps a BufRead reader and prints to stdout
pub struct CliInterface<R: BufRead> {
    reader: R,
    clear_screen: bool,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            clear_screen: false,
        }
    }

    #[must_use]
    pub fn with_screen_clearing(mut self, enabled: bool) -> Self {
        self.clear_screen = enabled;
        self
    }

    fn redraw(&self) {
        if self.clear_screen {
            clear_screen();
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_tutorial(&mut self) {
        display_tutorial();
    }

    fn read_difficulty(&mut self) -> Option<UserAction> {
        println!("Please select a difficulty:\n{}", difficulty_menu());
        match read_difficulty(&mut self.reader) {
            LineInput::Valid(difficulty) => Some(UserAction::SelectDifficulty(difficulty)),
            LineInput::Exit => Some(UserAction::Exit),
            LineInput::Invalid(input) => {
                self.redraw();
                println!(
                    "Invalid input \"{input}\"! Please make sure your input is between 1 and 3 (inclusive)\n"
                );
                None
            }
        }
    }

    fn display_board(&mut self, session: &GameSession) {
        self.redraw();
        print!("{}", render_board(session));
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        match read_guess(&mut self.reader) {
            LineInput::Valid(guess) => Some(UserAction::Guess(guess)),
            LineInput::Exit => Some(UserAction::Exit),
            LineInput::Invalid(_) => None,
        }
    }

    fn display_win(&mut self, session: &GameSession) {
        self.display_board(session);
        display_win();
    }

    fn display_loss(&mut self, session: &GameSession) {
        self.display_board(session);
        display_loss(session.target_word());
    }

    fn read_play_again(&mut self) -> Option<UserAction> {
        println!("Play again? (y/n): ");
        match read_play_again(&mut self.reader) {
            LineInput::Valid(again) => {
                if again {
                    self.redraw();
                }
                Some(UserAction::PlayAgain(again))
            }
            LineInput::Exit => Some(UserAction::Exit),
            LineInput::Invalid(_) => {
                println!("Invalid option.");
                None
            }
        }
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["hangman"]).unwrap();
        assert_eq!(cli.words_dir, None);
        assert_eq!(cli.seed, None);
        assert!(!cli.tui);
        assert!(!cli.no_clear);
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli = Cli::try_parse_from([
            "hangman",
            "--words-dir",
            "res",
            "--seed",
            "42",
            "--tui",
            "--log-file",
            "/tmp/hangman.log",
        ])
        .unwrap();
        assert_eq!(cli.words_dir, Some(PathBuf::from("res")));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.tui);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/hangman.log")));
    }

    #[test]
    fn test_parse_cli_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["hangman", "--seed", "abc"]).is_err());
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(parse_difficulty("1"), Some(Difficulty::Easy));
        assert_eq!(parse_difficulty(" 2 "), Some(Difficulty::Medium));
        assert_eq!(parse_difficulty("3"), Some(Difficulty::Hard));
        assert_eq!(parse_difficulty("0"), None);
        assert_eq!(parse_difficulty("4"), None);
        assert_eq!(parse_difficulty("easy"), None);
        assert_eq!(parse_difficulty(""), None);
        assert_eq!(parse_difficulty("-1"), None);
    }

    #[test]
    fn test_parse_guess() {
        assert_eq!(parse_guess("A"), Some("a".to_string()));
        assert_eq!(parse_guess("  Castle  "), Some("castle".to_string()));
        assert_eq!(parse_guess("two words"), Some("two".to_string()));
        assert_eq!(parse_guess("   "), None);
        assert_eq!(parse_guess(""), None);
    }

    #[test]
    fn test_parse_play_again() {
        assert_eq!(parse_play_again("y"), Some(true));
        assert_eq!(parse_play_again("Y"), Some(true));
        assert_eq!(parse_play_again("n"), Some(false));
        assert_eq!(parse_play_again("N"), Some(false));
        assert_eq!(parse_play_again("maybe"), None);
        assert_eq!(parse_play_again(""), None);
    }

    #[test]
    fn test_read_difficulty_valid() {
        let mut reader = Cursor::new("2\n");
        assert_eq!(
            read_difficulty(&mut reader),
            LineInput::Valid(Difficulty::Medium)
        );
    }

    #[test]
    fn test_read_difficulty_invalid() {
        let mut reader = Cursor::new("7\n");
        assert_eq!(
            read_difficulty(&mut reader),
            LineInput::Invalid("7".to_string())
        );
    }

    #[test]
    fn test_read_at_end_of_input_is_exit() {
        let mut reader = Cursor::new("");
        assert_eq!(read_difficulty(&mut reader), LineInput::Exit);
        assert_eq!(read_guess(&mut reader), LineInput::Exit);
        assert_eq!(read_play_again(&mut reader), LineInput::Exit);
    }

    #[test]
    fn test_read_guess_blank_line_is_invalid() {
        let mut reader = Cursor::new("\n");
        assert!(matches!(read_guess(&mut reader), LineInput::Invalid(_)));
    }

    #[test]
    fn test_read_guess_lowercase_converted() {
        let mut reader = Cursor::new("DRAGON\n");
        assert_eq!(read_guess(&mut reader), LineInput::Valid("dragon".to_string()));
    }

    #[test]
    fn test_difficulty_menu_lists_all_tiers() {
        let menu = difficulty_menu();
        assert!(menu.contains("1) Easy"));
        assert!(menu.contains("2) Medium"));
        assert!(menu.contains("3) Hard"));
        assert!(menu.contains("15 misses"));
        assert!(menu.contains("10 misses"));
        assert!(menu.contains("7 misses"));
    }

    #[test]
    fn test_render_board() {
        let mut session = GameSession::new("cat", 15);
        session.apply_guess("c").unwrap();
        session.apply_guess("z").unwrap();

        let board = render_board(&session);
        assert!(board.starts_with(GALLOWS_ART[0]));
        assert!(board.contains("You have 14 misses left"));
        assert!(board.contains("c _ _\n"));
        assert!(board.contains("Misses: z"));
    }

    #[test]
    fn test_cli_interface_maps_input_to_actions() {
        let reader = Cursor::new("9\n3\nq\ny\n");
        let mut interface = CliInterface::new(reader);

        assert_eq!(interface.read_difficulty(), None);
        assert_eq!(
            interface.read_difficulty(),
            Some(UserAction::SelectDifficulty(Difficulty::Hard))
        );
        assert_eq!(interface.read_guess(), Some(UserAction::Guess("q".to_string())));
        assert_eq!(interface.read_play_again(), Some(UserAction::PlayAgain(true)));
        assert_eq!(interface.read_guess(), Some(UserAction::Exit));
    }
}
