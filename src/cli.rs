use crate::difficulty::Difficulty;
use crate::error::{GameError, StoreError};
use crate::game_state::{GameInterface, MenuChoice, RoundIntro, RoundSummary, UserAction};
use crate::leaderboard::{LeaderboardEntry, RecordOutcome};
use crate::round::{GuessOutcome, GuessStatus, Progress, RoundStatus};
use crate::wordbank::Category;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Hangman with categories, difficulty levels and a Hall of Fame
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Path to the Hall of Fame score file
    #[arg(short = 's', long = "scores")]
    pub scores_path: Option<PathBuf>,

    /// Keep the Hall of Fame in memory only
    #[arg(long = "no-save", conflicts_with = "scores_path")]
    pub no_save: bool,

    /// Player name; skips the name prompt
    #[arg(short = 'n', long = "name")]
    pub player_name: Option<String>,

    /// Append logs to this file instead of stderr
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Render rows as a box-drawn table with a header row.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let border = |left: char, mid: char, right: char| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(&mid.to_string()))
    };
    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).copied().unwrap_or("");
                format!(" {cell}{} ", " ".repeat(w - cell.chars().count()))
            })
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let mut out = vec![border('╒', '╤', '╕'), line(headers.to_vec())];
    out.push(border('╞', '╪', '╡'));
    for (i, row) in rows.iter().enumerate() {
        out.push(line(row.iter().map(String::as_str).collect()));
        if i + 1 < rows.len() {
            out.push(border('├', '┼', '┤'));
        }
    }
    out.push(border('╘', '╧', '╛'));
    out.join("\n")
}

/// Spaced, upper-cased masked word: `_a_` becomes `_ A _`.
#[must_use]
pub fn format_masked_word(masked: &str) -> String {
    masked
        .chars()
        .map(|c| c.to_ascii_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn format_guessed(guessed: &[char]) -> String {
    if guessed.is_empty() {
        "None".to_string()
    } else {
        guessed.iter().map(char::to_string).collect::<Vec<_>>().join(", ")
    }
}

#[must_use]
pub fn main_menu_table() -> String {
    let rows: Vec<Vec<String>> = MenuChoice::ALL
        .iter()
        .enumerate()
        .map(|(i, choice)| vec![(i + 1).to_string(), choice.label()])
        .collect();
    render_table(&["Option", "Menu"], &rows)
}

#[must_use]
pub fn category_table() -> String {
    let rows: Vec<Vec<String>> = Category::ALL
        .iter()
        .map(|c| vec![c.menu_number().to_string(), c.name().to_string()])
        .collect();
    render_table(&["Option", "Category"], &rows)
}

#[must_use]
pub fn about_table() -> String {
    let rows: Vec<Vec<String>> = Difficulty::ALL
        .iter()
        .map(|d| vec![d.name().to_string(), d.description().to_string()])
        .collect();
    render_table(&["Level", "What Happens"], &rows)
}

#[must_use]
pub fn hall_of_fame_table(entries: &[LeaderboardEntry]) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.level.to_string(),
                e.winner.clone(),
                e.remaining_lives.to_string(),
            ]
        })
        .collect();
    render_table(&["Level", "Winner", "Lives Left"], &rows)
}

/// Read one trimmed line. `None` at end of input or on a read error.
fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_string()),
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            None
        }
    }
}

/// Line-based implementation of [`GameInterface`] over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
    at_eof: bool,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            at_eof: false,
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let line = read_trimmed_line(&mut self.reader);
        self.at_eof = line.is_none();
        line
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_player_name(&mut self) -> Option<String> {
        println!("Enter your name, superstar:");
        self.read_line()
    }

    fn read_menu_choice(&mut self, player_name: &str) -> Option<MenuChoice> {
        println!("\nHey {player_name}");
        println!("Welcome to the Glamorous World of HANGMAN!\n");
        println!("{}", main_menu_table());
        println!("\nChoose your vibe (1-6):");
        match self.read_line() {
            None => Some(MenuChoice::Exit),
            Some(input) => MenuChoice::from_input(&input),
        }
    }

    fn read_category(&mut self) -> Option<String> {
        println!("{}", category_table());
        println!("Choose a category (1-3):");
        self.read_line()
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        println!("Enter a letter:");
        match self.read_line() {
            None => Some(UserAction::Exit),
            Some(input) => Some(UserAction::Guess(input.to_lowercase())),
        }
    }

    fn display_round_start(&mut self, intro: &RoundIntro) {
        println!("\nLevel: {} | Lives: {}", intro.difficulty, intro.lives);
        if let Some(category) = intro.category {
            println!("Category: {category}");
        }
        println!("Guess the word, one letter at a time!\n");
    }

    fn display_progress(&mut self, progress: &Progress) {
        println!("Word: {}", format_masked_word(&progress.masked_word));
        println!("Guessed so far: {}", format_guessed(&progress.guessed_sorted));
        println!("Lives left: {}", progress.lives_left);
    }

    fn display_guess_outcome(&mut self, outcome: &GuessOutcome) {
        match outcome.status {
            GuessStatus::Hit => println!("Nice guess!\n"),
            GuessStatus::Miss => println!("Nope! Try again.\n"),
            GuessStatus::AlreadyGuessed => println!("You've already guessed that!"),
        }
    }

    fn display_invalid_guess(&mut self, _error: &GameError) {
        println!("One letter at a time, please.");
    }

    fn display_round_over(&mut self, summary: &RoundSummary, player_name: &str) {
        let word = summary.secret_word.to_uppercase();
        match summary.status {
            RoundStatus::Won => println!(
                "\nYOU WON, {}! The word was '{word}'",
                player_name.to_uppercase()
            ),
            RoundStatus::Lost => println!("\nGAME OVER! The word was '{word}'"),
            RoundStatus::Active => {}
        }
    }

    fn display_record_outcome(&mut self, outcome: &RecordOutcome) {
        if outcome.updated {
            println!("New Hall of Fame record! You're iconic");
        } else {
            println!(
                "You did great! But didn't beat the top score of {} lives. Keep shining",
                outcome.previous.remaining_lives
            );
        }
    }

    fn display_hall_of_fame(&mut self, entries: &[LeaderboardEntry]) {
        println!("\nHALL OF FAME - Legends Only\n");
        println!("{}", hall_of_fame_table(entries));
    }

    fn display_about(&mut self) {
        println!("\nAbout the Game - Super Simple\n");
        println!("{}", about_table());
        println!("\nGuess the word one letter at a time. Fewer mistakes = more glory");
    }

    fn display_invalid_menu_choice(&mut self) {
        println!("Hmm, invalid option. Try again");
    }

    fn display_store_error(&mut self, error: &StoreError) {
        eprintln!("Warning: Hall of Fame unavailable ({error})");
    }

    fn display_exit_message(&mut self) {
        if self.at_eof {
            println!();
        }
        println!("Bye gorgeous! See you soon!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::parse_from(["hangman"]);
        assert!(!cli.tui);
        assert!(!cli.no_save);
        assert_eq!(cli.scores_path, None);
        assert_eq!(cli.player_name, None);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli = Cli::parse_from(["hangman", "--tui", "-s", "scores.json", "--name", "mia"]);
        assert!(cli.tui);
        assert_eq!(cli.scores_path, Some(PathBuf::from("scores.json")));
        assert_eq!(cli.player_name.as_deref(), Some("mia"));
    }

    #[test]
    fn test_parse_cli_no_save_conflicts_with_scores() {
        assert!(Cli::try_parse_from(["hangman", "--no-save", "-s", "x.json"]).is_err());
    }

    #[test]
    fn test_render_table_layout() {
        let table = render_table(&["Level", "Winner"], &[vec!["Easy".into(), "Mia".into()]]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "│ Level │ Winner │");
        assert_eq!(lines[3], "│ Easy  │ Mia    │");
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
    }

    #[test]
    fn test_hall_of_fame_table_lists_levels() {
        let entries: Vec<LeaderboardEntry> =
            Difficulty::ALL.iter().map(|d| LeaderboardEntry::empty(*d)).collect();
        let table = hall_of_fame_table(&entries);
        for level in Difficulty::ALL {
            assert!(table.contains(level.name()));
        }
        assert!(table.contains("Lives Left"));
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(format_masked_word("_a_"), "_ A _");
        assert_eq!(format_guessed(&[]), "None");
        assert_eq!(format_guessed(&['a', 'c', 'z']), "a, c, z");
    }

    #[test]
    fn test_read_menu_choice() {
        let mut cli = CliInterface::new(Cursor::new("2\nnope\n"));
        assert_eq!(
            cli.read_menu_choice("Mia"),
            Some(MenuChoice::Play(Difficulty::Moderate))
        );
        assert_eq!(cli.read_menu_choice("Mia"), None);
        assert_eq!(cli.read_menu_choice("Mia"), Some(MenuChoice::Exit));
    }

    #[test]
    fn test_read_guess_lowercases_and_passes_raw_input() {
        let mut cli = CliInterface::new(Cursor::new("  A \nab\n"));
        assert_eq!(cli.read_guess(), Some(UserAction::Guess("a".to_string())));
        assert_eq!(cli.read_guess(), Some(UserAction::Guess("ab".to_string())));
        assert_eq!(cli.read_guess(), Some(UserAction::Exit));
    }

    #[test]
    fn test_read_category_and_name() {
        let mut cli = CliInterface::new(Cursor::new("mia\n3\n"));
        assert_eq!(cli.read_player_name().as_deref(), Some("mia"));
        assert_eq!(cli.read_category().as_deref(), Some("3"));
        assert_eq!(cli.read_category(), None);
    }
}
