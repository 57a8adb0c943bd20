//! TUI (Terminal User Interface) front end for Hangman
//!
//! This module provides a full-screen interface using Ratatui.
//!
//! # State Machine
//! The screen follows the game controller:
//! - `NameEntry` → `Menu` → `CategoryChoice` (Easy/Moderate only) → `Playing`
//! - `Playing` → `RoundOver` → back to `Menu`
//!
//! Hall of Fame and About content is shown in the side panel next to the menu.

use crate::cli::{format_guessed, format_masked_word};
use crate::difficulty::Difficulty;
use crate::error::{GameError, StoreError};
use crate::game_state::{GameInterface, MenuChoice, RoundIntro, RoundSummary, UserAction};
use crate::leaderboard::{LeaderboardEntry, RecordOutcome};
use crate::round::{GuessOutcome, GuessStatus, Progress, RoundStatus};
use crate::wordbank::Category;
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
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_NAME_LENGTH: usize = 24;

const HEADER_STYLE: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Magenta);

/// Gallows drawings from an empty scaffold to a full figure.
const GALLOWS: [&[&str]; 7] = [
    &["  +---+", "  |   |", "      |", "      |", "      |", "========="],
    &["  +---+", "  |   |", "  O   |", "      |", "      |", "========="],
    &["  +---+", "  |   |", "  O   |", "  |   |", "      |", "========="],
    &["  +---+", "  |   |", "  O   |", " /|   |", "      |", "========="],
    &["  +---+", "  |   |", "  O   |", " /|\\  |", "      |", "========="],
    &["  +---+", "  |   |", "  O   |", " /|\\  |", " /    |", "========="],
    &["  +---+", "  |   |", "  O   |", " /|\\  |", " / \\  |", "========="],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    NameEntry,
    Menu,
    CategoryChoice,
    Playing,
    RoundOver,
}

/// What the side panel shows next to the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Panel {
    Welcome,
    HallOfFame(Vec<LeaderboardEntry>),
    About,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    screen: Screen,
    panel: &'a Panel,
    player_name: &'a str,
    input: &'a str,
    selected: usize,
    intro: Option<&'a RoundIntro>,
    progress: Option<&'a Progress>,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Pick the gallows stage for `wrong` misses out of `lives`.
fn gallows_stage(wrong: u32, lives: u32) -> usize {
    if lives == 0 {
        return GALLOWS.len() - 1;
    }
    let last = (GALLOWS.len() - 1) as u32;
    (wrong.min(lives) * last / lives) as usize
}

/// Full-screen implementation of [`GameInterface`].
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    screen: Screen,
    panel: Panel,
    player_name: String,
    input: String,
    selected: usize,
    intro: Option<RoundIntro>,
    progress: Option<Progress>,
    message: String,
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
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            screen: Screen::NameEntry,
            panel: Panel::Welcome,
            player_name: String::new(),
            input: String::new(),
            selected: 0,
            intro: None,
            progress: None,
            message: String::new(),
            error_message: String::new(),
            status: "Welcome".to_string(),
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

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            screen: self.screen,
            panel: &self.panel,
            player_name: &self.player_name,
            input: &self.input,
            selected: self.selected,
            intro: self.intro.as_ref(),
            progress: self.progress.as_ref(),
            message: &self.message,
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
                Constraint::Length(3), // Title
                Constraint::Min(12),   // Main area
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.player_name);
        match ctx.screen {
            Screen::NameEntry => Self::render_name_entry(f, chunks[1], ctx),
            Screen::Menu => Self::render_menu(f, chunks[1], ctx),
            Screen::CategoryChoice => Self::render_category_choice(f, chunks[1], ctx),
            Screen::Playing | Screen::RoundOver => Self::render_round(f, chunks[1], ctx),
        }
        Self::render_status(f, chunks[2], ctx.status);
        Self::render_instructions(f, chunks[3], ctx.screen);
    }

    fn render_title(f: &mut Frame, area: Rect, player_name: &str) {
        let text = if player_name.is_empty() {
            "HANGMAN".to_string()
        } else {
            format!("HANGMAN - Hey {player_name}")
        };
        let title = Paragraph::new(text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_name_entry(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let lines = vec![
            Line::from("Welcome to the Glamorous World of HANGMAN!"),
            Line::from(""),
            Line::from(vec![
                Span::raw("Enter your name, superstar: "),
                Span::styled(format!("{}_", ctx.input), INFO_STYLE),
            ]),
            Line::from(""),
            Line::from(Span::styled(ctx.error_message, ERROR_STYLE)),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Player").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn split_horizontal(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);
        (chunks[0], chunks[1])
    }

    fn render_choice_list(f: &mut Frame, area: Rect, title: &str, labels: &[String], selected: usize) {
        let lines: Vec<Line> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let text = format!(" {}. {label} ", i + 1);
                if i == selected {
                    Line::from(Span::styled(text, SELECTED_STYLE))
                } else {
                    Line::from(text)
                }
            })
            .collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().title(title.to_string()).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_menu(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let (left, right) = Self::split_horizontal(area);
        let labels: Vec<String> = MenuChoice::ALL.iter().map(|c| c.label()).collect();
        Self::render_choice_list(f, left, "Menu", &labels, ctx.selected);

        match ctx.panel {
            Panel::HallOfFame(entries) => Self::render_hall_of_fame(f, right, entries),
            Panel::About => Self::render_about(f, right),
            Panel::Welcome => Self::render_messages(f, right, "Information", ctx),
        }
    }

    fn render_category_choice(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let (left, right) = Self::split_horizontal(area);
        let labels: Vec<String> = Category::ALL.iter().map(|c| c.name().to_string()).collect();
        Self::render_choice_list(f, left, "Category", &labels, ctx.selected);
        Self::render_messages(f, right, "Information", ctx);
    }

    fn render_hall_of_fame(f: &mut Frame, area: Rect, entries: &[LeaderboardEntry]) {
        let header = Row::new(vec!["Level", "Winner", "Lives Left"]).style(INFO_STYLE);
        let rows: Vec<Row> = entries
            .iter()
            .map(|e| {
                Row::new(vec![
                    Cell::from(e.level.to_string()),
                    Cell::from(e.winner.clone()),
                    Cell::from(e.remaining_lives.to_string()),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Min(12),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title("Hall of Fame - Legends Only")
                .borders(Borders::ALL),
        );
        f.render_widget(table, area);
    }

    fn render_about(f: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Difficulty::ALL
            .iter()
            .map(|d| {
                Line::from(vec![
                    Span::styled(format!("{:<9}", d.name()), INFO_STYLE),
                    Span::raw(d.description()),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(
            "Guess the word one letter at a time. Fewer mistakes = more glory",
        ));
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("About the Game").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_round(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let (left, right) = Self::split_horizontal(area);

        let lives = ctx.intro.map_or(0, |i| i.lives);
        let lives_left = ctx.progress.map_or(lives, |p| p.lives_left);
        let stage = gallows_stage(lives.saturating_sub(lives_left), lives);
        let gallows: Vec<Line> = GALLOWS[stage].iter().map(|l| Line::from(*l)).collect();
        let paragraph =
            Paragraph::new(gallows).block(Block::default().title("Gallows").borders(Borders::ALL));
        f.render_widget(paragraph, left);

        let mut lines = Vec::new();
        if let Some(intro) = ctx.intro {
            let category = intro
                .category
                .map_or_else(|| "secret".to_string(), |c| c.name().to_string());
            lines.push(Line::from(Span::styled(
                format!("Level: {} | Category: {category}", intro.difficulty),
                HEADER_STYLE,
            )));
            lines.push(Line::from(""));
        }
        if let Some(progress) = ctx.progress {
            lines.push(Line::from(Span::styled(
                format!("Word: {}", format_masked_word(&progress.masked_word)),
                SUCCESS_STYLE,
            )));
            lines.push(Line::from(format!(
                "Guessed so far: {}",
                format_guessed(&progress.guessed_sorted)
            )));
            lines.push(Line::from(format!("Lives left: {}", progress.lives_left)));
            lines.push(Line::from(""));
        }
        if !ctx.message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.message, MESSAGE_STYLE)));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Round").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, right);
    }

    fn render_messages(f: &mut Frame, area: Rect, title: &str, ctx: &RenderContext) {
        let mut lines = Vec::new();
        if !ctx.message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.message, MESSAGE_STYLE)));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title(title.to_string()).borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, screen: Screen) {
        let text = match screen {
            Screen::NameEntry => "Type your name | ENTER: Continue | ESC: Quit",
            Screen::Menu => "UP/DOWN or 1-6: Choose | ENTER: Select | ESC: Quit",
            Screen::CategoryChoice => "UP/DOWN or 1-3: Choose | ENTER: Select",
            Screen::Playing => "Type a letter to guess | ESC: Quit",
            Screen::RoundOver => "Press any key to return to the menu",
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Wait for the next key press. `Ok(None)` when the poll timed out or the
    /// event was not a plain key press.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
                    debug_log!("next_key() - Ignoring key with modifier: {:?}", key.modifiers);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    /// Draw and wait for a key until `handle` produces a value.
    ///
    /// Draw and input errors end the wait with `on_error`.
    fn run_until<T>(&mut self, on_error: T, mut handle: impl FnMut(&mut Self, KeyEvent) -> Option<T>) -> T {
        loop {
            if let Err(e) = self.draw() {
                info_log!("run_until() - Draw failed: {}", e);
                return on_error;
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(value) = handle(self, key) {
                        return value;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("run_until() - Input error: {}", e);
                    return on_error;
                }
            }
        }
    }

    /// Arrow keys, digits and Enter over a list of `count` entries.
    /// Returns the chosen index, or `Err(())` on Esc.
    fn handle_list_key(&mut self, key: KeyEvent, count: usize) -> Option<Result<usize, ()>> {
        match key.code {
            KeyCode::Up => {
                self.selected = (self.selected + count - 1) % count;
                None
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % count;
                None
            }
            KeyCode::Enter => Some(Ok(self.selected)),
            KeyCode::Esc => Some(Err(())),
            KeyCode::Char(c) => match c.to_digit(10) {
                Some(d) if (1..=count as u32).contains(&d) => Some(Ok(d as usize - 1)),
                _ => {
                    self.error_message = format!("'{c}' is not an option");
                    None
                }
            },
            _ => None,
        }
    }
}

impl GameInterface for TuiInterface {
    fn read_player_name(&mut self) -> Option<String> {
        self.screen = Screen::NameEntry;
        self.input.clear();
        self.status = "Who is playing?".to_string();
        self.run_until(None, |ui, key| match key.code {
            KeyCode::Enter => {
                let name = std::mem::take(&mut ui.input);
                Some(Some(name))
            }
            KeyCode::Esc => Some(None),
            KeyCode::Backspace => {
                ui.input.pop();
                None
            }
            KeyCode::Char(c) if !c.is_control() && ui.input.chars().count() < MAX_NAME_LENGTH => {
                ui.input.push(c);
                None
            }
            _ => None,
        })
        .inspect(|name| {
            self.player_name = crate::game_state::normalize_player_name(name);
        })
    }

    fn read_menu_choice(&mut self, player_name: &str) -> Option<MenuChoice> {
        player_name.clone_into(&mut self.player_name);
        self.screen = Screen::Menu;
        self.selected = self.selected.min(MenuChoice::ALL.len() - 1);
        self.status = "Choose your vibe".to_string();
        let picked = self.run_until(Err(()), |ui, key| ui.handle_list_key(key, MenuChoice::ALL.len()));
        self.error_message.clear();
        match picked {
            Ok(index) => MenuChoice::ALL.get(index).copied(),
            Err(()) => Some(MenuChoice::Exit),
        }
    }

    fn read_category(&mut self) -> Option<String> {
        self.screen = Screen::CategoryChoice;
        self.selected = 0;
        self.message = "Choose a category".to_string();
        self.status = "Pick where your word comes from".to_string();
        let picked = self.run_until(Err(()), |ui, key| ui.handle_list_key(key, Category::ALL.len()));
        self.error_message.clear();
        picked.ok().map(|index| (index + 1).to_string())
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        self.screen = Screen::Playing;
        self.run_until(Some(UserAction::Exit), |_, key| match key.code {
            KeyCode::Esc => Some(Some(UserAction::Exit)),
            KeyCode::Char(c) => Some(Some(UserAction::Guess(c.to_lowercase().to_string()))),
            _ => None,
        })
    }

    fn display_round_start(&mut self, intro: &RoundIntro) {
        self.intro = Some(intro.clone());
        self.progress = None;
        self.screen = Screen::Playing;
        self.message = format!("Guess the word, one letter at a time! ({} letters)", intro.word_length);
        self.error_message.clear();
        self.status = format!("Level: {} | Lives: {}", intro.difficulty, intro.lives);
        self.draw_or_log();
    }

    fn display_progress(&mut self, progress: &Progress) {
        self.progress = Some(progress.clone());
        self.draw_or_log();
    }

    fn display_guess_outcome(&mut self, outcome: &GuessOutcome) {
        let letter = outcome.letter.to_ascii_uppercase();
        self.error_message.clear();
        match outcome.status {
            GuessStatus::Hit => self.message = format!("Nice guess! {letter} is in the word"),
            GuessStatus::Miss => self.message = format!("Nope! No {letter} here"),
            GuessStatus::AlreadyGuessed => {
                self.error_message = format!("You've already guessed {letter}!");
            }
        }
    }

    fn display_invalid_guess(&mut self, error: &GameError) {
        self.error_message = format!("One letter at a time, please. ({error})");
    }

    fn display_round_over(&mut self, summary: &RoundSummary, player_name: &str) {
        let word = summary.secret_word.to_uppercase();
        self.screen = Screen::RoundOver;
        self.error_message.clear();
        match summary.status {
            RoundStatus::Won => {
                self.message = format!("YOU WON, {}! The word was '{word}'", player_name.to_uppercase());
                self.status = format!("Won with {} lives left", summary.score.unwrap_or(0));
            }
            RoundStatus::Lost => {
                self.message = format!("GAME OVER! The word was '{word}'");
                self.status = "Out of lives".to_string();
            }
            RoundStatus::Active => {}
        }
        if summary.status == RoundStatus::Lost {
            self.wait_for_round_over();
        }
    }

    fn display_record_outcome(&mut self, outcome: &RecordOutcome) {
        if outcome.updated {
            self.message
                .push_str(" | New Hall of Fame record! You're iconic");
        } else {
            self.message.push_str(&format!(
                " | Top score of {} lives stands. Keep shining",
                outcome.previous.remaining_lives
            ));
        }
        self.wait_for_round_over();
    }

    fn display_hall_of_fame(&mut self, entries: &[LeaderboardEntry]) {
        self.panel = Panel::HallOfFame(entries.to_vec());
    }

    fn display_about(&mut self) {
        self.panel = Panel::About;
    }

    fn display_invalid_menu_choice(&mut self) {
        self.error_message = "Hmm, invalid option. Try again".to_string();
    }

    fn display_store_error(&mut self, error: &StoreError) {
        self.error_message = format!("Hall of Fame unavailable: {error}");
        if self.screen == Screen::RoundOver {
            self.wait_for_round_over();
        }
    }

    fn display_exit_message(&mut self) {
        self.message = "Bye gorgeous! See you soon!".to_string();
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl TuiInterface {
    /// Keep the final board on screen until a key is pressed, then return to the menu.
    fn wait_for_round_over(&mut self) {
        self.run_until((), |_, _| Some(()));
        self.screen = Screen::Menu;
        self.panel = Panel::Welcome;
        self.intro = None;
        self.progress = None;
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
