//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides a full-screen terminal interface using Ratatui.
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `SelectingDifficulty` → `EnteringGuess` → `GameOver` → back to `SelectingDifficulty`
//! - Escape or Ctrl+C from any state ends the game.

use crate::cli::{GALLOWS_ART, TUTORIAL_LINES};
use crate::difficulty::Difficulty;
use crate::game_state::{GameInterface, UserAction};
use crate::session::GameSession;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const MAX_GUESS_LENGTH: usize = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    SelectingDifficulty,
    EnteringGuess,
    /// Game has ended - outcome stored in interface.message
    GameOver,
}

/// What the board panel shows, copied out of the session on every redraw.
#[derive(Debug, Default)]
struct BoardSnapshot {
    masked_word: String,
    allowance_remaining: u32,
    misses: Vec<String>,
}

impl BoardSnapshot {
    fn from_session(session: &GameSession) -> Self {
        Self {
            masked_word: session.masked_word(),
            allowance_remaining: session.allowance_remaining(),
            misses: session.misses().to_vec(),
        }
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    state: TuiState,
    board: Option<&'a BoardSnapshot>,
    current_input: &'a str,
    message: &'a str,
    message_style: Style,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    board: Option<BoardSnapshot>,
    current_input: String,
    message: String,
    message_style: Style,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            state: TuiState::SelectingDifficulty,
            board: None,
            current_input: String::new(),
            message: String::new(),
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            state: self.state,
            board: self.board.as_ref(),
            current_input: &self.current_input,
            message: &self.message,
            message_style: self.message_style,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(30)])
            .split(chunks[1]);
        Self::render_gallows(f, middle[0]);
        match ctx.state {
            TuiState::SelectingDifficulty => Self::render_menu(f, middle[1]),
            TuiState::EnteringGuess | TuiState::GameOver => {
                Self::render_board(f, middle[1], ctx.board, ctx.current_input, ctx.state);
            }
        }

        Self::render_messages(f, chunks[2], ctx);
        Self::render_instructions(f, chunks[3], ctx.state);
        Self::render_status(f, chunks[4], ctx.status);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(Span::styled("~ Hangman ~", HEADER_STYLE)))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = GALLOWS_ART.iter().map(|l| Line::from(*l)).collect();
        let gallows = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        f.render_widget(gallows, area);
    }

    fn render_menu(f: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = TUTORIAL_LINES.iter().map(|l| Line::from(*l)).collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Please select a difficulty:",
            INFO_STYLE,
        )));
        for difficulty in Difficulty::ALL {
            lines.push(Line::from(format!(
                "{}) {} - {}, {} misses",
                difficulty.choice(),
                difficulty,
                difficulty.description(),
                difficulty.allowance()
            )));
        }
        let menu = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Welcome"));
        f.render_widget(menu, area);
    }

    fn render_board(
        f: &mut Frame,
        area: Rect,
        board: Option<&BoardSnapshot>,
        current_input: &str,
        state: TuiState,
    ) {
        let mut lines = Vec::new();
        if let Some(board) = board {
            lines.push(Line::from(vec![
                Span::raw("You have "),
                Span::styled(board.allowance_remaining.to_string(), INFO_STYLE),
                Span::raw(" misses left"),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(board.masked_word.clone(), WORD_STYLE)));
            lines.push(Line::from(""));
            if !board.misses.is_empty() {
                lines.push(Line::from(format!("Misses: {}", board.misses.join(", "))));
            }
        }
        if state == TuiState::EnteringGuess {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("Guess: "),
                Span::styled(format!("{current_input}_"), WORD_STYLE),
            ]));
        }
        let panel = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Word"));
        f.render_widget(panel, area);
    }

    fn render_messages(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();
        if !ctx.message.is_empty() {
            for line in ctx.message.lines() {
                lines.push(Line::from(Span::styled(line.to_string(), ctx.message_style)));
            }
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(
                ctx.error_message.to_string(),
                ERROR_STYLE,
            )));
        }
        let panel = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(panel, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::SelectingDifficulty => "Press 1, 2 or 3 to choose a difficulty | ESC: quit",
            TuiState::EnteringGuess => {
                "Type a letter or the whole word, ENTER: submit | BACKSPACE: delete | ESC: quit"
            }
            TuiState::GameOver => "Play again? Y: yes | N: no",
        };
        let instructions = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
        f.render_widget(instructions, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let line = Line::from(Span::styled(status.to_string(), MESSAGE_STYLE));
        f.render_widget(Paragraph::new(line), area);
    }

    /// Blocks until a key press arrives.
    fn next_key() -> Result<KeyEvent, io::Error> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key),
                other => {
                    debug_log!("next_key() - Ignoring event: {:?}", other);
                }
            }
        }
    }

    fn is_quit_key(key: &KeyEvent) -> bool {
        key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    }

    fn handle_difficulty_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        if Self::is_quit_key(&key) {
            info_log!("handle_difficulty_input() - quit key pressed");
            return Some(UserAction::Exit);
        }
        match difficulty_from_key(&key) {
            Some(difficulty) => {
                info_log!("handle_difficulty_input() - selected {}", difficulty);
                self.error_message.clear();
                Some(UserAction::SelectDifficulty(difficulty))
            }
            None => {
                self.error_message =
                    "Please make sure your input is between 1 and 3 (inclusive)".to_string();
                None
            }
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        if Self::is_quit_key(&key) {
            info_log!("handle_guess_input() - quit key pressed");
            return Some(UserAction::Exit);
        }
        match key.code {
            KeyCode::Enter => {
                if self.current_input.is_empty() {
                    self.error_message = "Type a letter or a word first".to_string();
                    return None;
                }
                let guess = std::mem::take(&mut self.current_input).to_lowercase();
                self.error_message.clear();
                debug_log!("handle_guess_input() - submitting '{}'", guess);
                Some(UserAction::Guess(guess))
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Char(c) if !c.is_whitespace() && !c.is_control() => {
                if self.current_input.chars().count() < MAX_GUESS_LENGTH {
                    self.current_input.push(c);
                    self.error_message.clear();
                }
                None
            }
            _ => None,
        }
    }

    fn handle_play_again_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        if Self::is_quit_key(&key) {
            return Some(UserAction::Exit);
        }
        match key.code {
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'y' => {
                    self.transition_to_selecting_difficulty();
                    Some(UserAction::PlayAgain(true))
                }
                'n' => Some(UserAction::PlayAgain(false)),
                _ => {
                    self.error_message = "Invalid option.".to_string();
                    None
                }
            },
            _ => None,
        }
    }

    fn transition_to_selecting_difficulty(&mut self) {
        self.state = TuiState::SelectingDifficulty;
        self.board = None;
        self.current_input.clear();
        self.message.clear();
        self.message_style = MESSAGE_STYLE;
        self.error_message.clear();
        self.status = "Choose a difficulty".to_string();
    }

    fn transition_to_game_over(&mut self, session: &GameSession) {
        self.state = TuiState::GameOver;
        self.board = Some(BoardSnapshot::from_session(session));
        self.current_input.clear();
        self.error_message.clear();
    }

    /// Reads one key for the current state, redrawing first.
    fn read_action(
        &mut self,
        handler: fn(&mut Self, KeyEvent) -> Option<UserAction>,
    ) -> Option<UserAction> {
        self.draw_or_log();
        match Self::next_key() {
            Ok(key) => {
                let action = handler(self, key);
                if action.is_none() {
                    self.draw_or_log();
                }
                action
            }
            Err(e) => {
                debug_log!("read_action() - Input error: {}", e);
                Some(UserAction::Exit)
            }
        }
    }
}

fn difficulty_from_key(key: &KeyEvent) -> Option<Difficulty> {
    match key.code {
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .and_then(Difficulty::from_choice),
        _ => None,
    }
}

impl GameInterface for TuiInterface {
    fn display_tutorial(&mut self) {
        self.transition_to_selecting_difficulty();
        self.message = "Welcome to Hangman!".to_string();
        self.draw_or_log();
    }

    fn read_difficulty(&mut self) -> Option<UserAction> {
        self.state = TuiState::SelectingDifficulty;
        self.read_action(Self::handle_difficulty_input)
    }

    fn display_board(&mut self, session: &GameSession) {
        self.state = TuiState::EnteringGuess;
        self.board = Some(BoardSnapshot::from_session(session));
        self.message.clear();
        self.status = "Waiting for guess...".to_string();
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        self.read_action(Self::handle_guess_input)
    }

    fn display_win(&mut self, session: &GameSession) {
        self.transition_to_game_over(session);
        self.message = "Congratulations! You win!".to_string();
        self.message_style = SUCCESS_STYLE;
        self.status = format!("Game Over - You guessed {}", session.target_word());
        self.draw_or_log();
    }

    fn display_loss(&mut self, session: &GameSession) {
        self.transition_to_game_over(session);
        self.message = format!("Sorry! You lost!\nThe word was {}", session.target_word());
        self.message_style = ERROR_STYLE;
        self.status = "Game Over - Out of misses".to_string();
        self.draw_or_log();
    }

    fn read_play_again(&mut self) -> Option<UserAction> {
        self.read_action(Self::handle_play_again_input)
    }

    fn display_exit_message(&mut self) {
        self.message = "Goodbye!".to_string();
        self.message_style = MESSAGE_STYLE;
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
