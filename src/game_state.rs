use crate::difficulty::Difficulty;
use crate::error::{GameError, Result, StoreError};
use crate::leaderboard::{Leaderboard, LeaderboardEntry, RecordOutcome, ScoreStore};
use crate::round::{GuessOutcome, Progress, RoundState, RoundStatus};
use crate::wordbank::{Category, choose_category, random_word};
use crate::{debug_log, info_log};
use rand::Rng;

/// Name used when the player leaves the name prompt empty.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play(Difficulty),
    HallOfFame,
    About,
    Exit,
}

impl MenuChoice {
    pub const ALL: [Self; 6] = [
        Self::Play(Difficulty::Easy),
        Self::Play(Difficulty::Moderate),
        Self::Play(Difficulty::Hard),
        Self::HallOfFame,
        Self::About,
        Self::Exit,
    ];

    /// Parse the menu number typed by the player.
    #[must_use]
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Play(Difficulty::Easy)),
            "2" => Some(Self::Play(Difficulty::Moderate)),
            "3" => Some(Self::Play(Difficulty::Hard)),
            "4" => Some(Self::HallOfFame),
            "5" => Some(Self::About),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Play(level) => format!("{level} Level"),
            Self::HallOfFame => "Hall of Fame".to_string(),
            Self::About => "About the Game".to_string(),
            Self::Exit => "Exit".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Exit,
}

/// What the player sees when a round begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundIntro {
    pub difficulty: Difficulty,
    pub lives: u32,
    pub word_length: usize,
    /// `None` on Hard, where the category stays secret.
    pub category: Option<Category>,
}

/// How a finished round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub difficulty: Difficulty,
    pub status: RoundStatus,
    pub secret_word: String,
    pub score: Option<u32>,
}

/// Front end driven by [`game_loop`].
///
/// `read_menu_choice` and `read_guess` return `None` when the input could not
/// be used and the prompt should be repeated; end of input is reported as an
/// exit request. `read_player_name` returns `None` when the player leaves, and
/// `read_category` when no choice was made (the word bank default applies).
pub trait GameInterface {
    fn read_player_name(&mut self) -> Option<String>;
    fn read_menu_choice(&mut self, player_name: &str) -> Option<MenuChoice>;
    /// Raw category choice; interpretation belongs to the word bank.
    fn read_category(&mut self) -> Option<String>;
    fn read_guess(&mut self) -> Option<UserAction>;

    fn display_round_start(&mut self, intro: &RoundIntro);
    fn display_progress(&mut self, progress: &Progress);
    fn display_guess_outcome(&mut self, outcome: &GuessOutcome);
    fn display_invalid_guess(&mut self, error: &GameError);
    fn display_round_over(&mut self, summary: &RoundSummary, player_name: &str);
    fn display_record_outcome(&mut self, outcome: &RecordOutcome);
    fn display_hall_of_fame(&mut self, entries: &[LeaderboardEntry]);
    fn display_about(&mut self);
    fn display_invalid_menu_choice(&mut self);
    fn display_store_error(&mut self, error: &StoreError);
    fn display_exit_message(&mut self);
}

/// Trim and title-case a player name: `"  mia  rose "` becomes `"Mia Rose"`.
#[must_use]
pub fn normalize_player_name(raw: &str) -> String {
    let name = raw
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        name
    }
}

/// Run the menu loop until the player exits or input ends.
///
/// Store failures are reported through `interface` and never end the game.
pub fn game_loop<I, S, R>(
    interface: &mut I,
    leaderboard: &mut Leaderboard<S>,
    rng: &mut R,
    player_name: Option<&str>,
) -> Result<()>
where
    I: GameInterface + ?Sized,
    S: ScoreStore,
    R: Rng + ?Sized,
{
    if let Err(e) = leaderboard.ensure_initialized(&Difficulty::ALL) {
        log::warn!("Hall of Fame unavailable: {e}");
        interface.display_store_error(&e);
    }

    let player_name = match player_name {
        Some(name) => normalize_player_name(name),
        None => match read_player_name(interface) {
            Some(name) => name,
            None => {
                interface.display_exit_message();
                return Ok(());
            }
        },
    };
    info_log!("Player {} joined", player_name);

    loop {
        let Some(choice) = interface.read_menu_choice(&player_name) else {
            interface.display_invalid_menu_choice();
            continue;
        };
        debug_log!("Menu choice: {:?}", choice);

        match choice {
            MenuChoice::Play(difficulty) => {
                if play_round(interface, leaderboard, rng, &player_name, difficulty)?.is_none() {
                    break;
                }
            }
            MenuChoice::HallOfFame => match leaderboard.entries() {
                Ok(entries) => interface.display_hall_of_fame(&entries),
                Err(e) => {
                    log::warn!("Could not read Hall of Fame: {e}");
                    interface.display_store_error(&e);
                }
            },
            MenuChoice::About => interface.display_about(),
            MenuChoice::Exit => break,
        }
    }

    interface.display_exit_message();
    Ok(())
}

fn read_player_name<I: GameInterface + ?Sized>(interface: &mut I) -> Option<String> {
    interface
        .read_player_name()
        .map(|raw| normalize_player_name(&raw))
}

/// Play one round at `difficulty` and record a win on the leaderboard.
///
/// Returns `Ok(None)` when the player quit before the round ended.
pub fn play_round<I, S, R>(
    interface: &mut I,
    leaderboard: &mut Leaderboard<S>,
    rng: &mut R,
    player_name: &str,
    difficulty: Difficulty,
) -> Result<Option<RoundSummary>>
where
    I: GameInterface + ?Sized,
    S: ScoreStore,
    R: Rng + ?Sized,
{
    let choice = if difficulty.player_picks_category() {
        interface.read_category().unwrap_or_default()
    } else {
        String::new()
    };
    let category = choose_category(difficulty, &choice, rng);
    let mut round = RoundState::new(difficulty, &random_word(category, rng))?;
    debug_log!("Secret word: {}", round.secret_word());

    interface.display_round_start(&RoundIntro {
        difficulty,
        lives: round.lives_total(),
        word_length: round.secret_word().len(),
        category: difficulty.player_picks_category().then_some(category),
    });

    while round.is_active() {
        interface.display_progress(&round.render_progress());
        let guess = match interface.read_guess() {
            Some(UserAction::Guess(guess)) => guess,
            Some(UserAction::Exit) => {
                info_log!("Player quit mid-round");
                return Ok(None);
            }
            None => continue,
        };

        match round.apply_guess(guess.trim()) {
            Ok(outcome) => interface.display_guess_outcome(&outcome),
            Err(e @ GameError::InvalidGuessInput(_)) => interface.display_invalid_guess(&e),
            Err(e) => return Err(e),
        }
    }

    let summary = RoundSummary {
        difficulty,
        status: round.status(),
        secret_word: round.secret_word().to_string(),
        score: round.score(),
    };
    interface.display_progress(&round.render_progress());
    interface.display_round_over(&summary, player_name);

    if let Some(score) = summary.score {
        match leaderboard.record_result(difficulty, player_name, score) {
            Ok(outcome) => interface.display_record_outcome(&outcome),
            Err(e) => {
                log::warn!("Win by {player_name} could not be recorded: {e}");
                interface.display_store_error(&e);
            }
        }
    }

    Ok(Some(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::{HallOfFame, MemoryStore, NO_WINNER};
    use crate::round::GuessStatus;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    /// Scripted front end that records what the controller showed.
    #[derive(Default)]
    struct ScriptedInterface {
        names: VecDeque<String>,
        menu: VecDeque<&'static str>,
        categories: VecDeque<&'static str>,
        guesses: VecDeque<String>,
        intros: Vec<RoundIntro>,
        outcomes: Vec<GuessOutcome>,
        invalid_guesses: usize,
        invalid_menu: usize,
        summaries: Vec<RoundSummary>,
        records: Vec<RecordOutcome>,
        halls: Vec<Vec<LeaderboardEntry>>,
        store_errors: usize,
        abouts: usize,
        exited: bool,
    }

    impl GameInterface for ScriptedInterface {
        fn read_player_name(&mut self) -> Option<String> {
            self.names.pop_front()
        }

        fn read_menu_choice(&mut self, _player_name: &str) -> Option<MenuChoice> {
            match self.menu.pop_front() {
                Some(input) => MenuChoice::from_input(input),
                None => Some(MenuChoice::Exit),
            }
        }

        fn read_category(&mut self) -> Option<String> {
            self.categories.pop_front().map(str::to_string)
        }

        fn read_guess(&mut self) -> Option<UserAction> {
            Some(
                self.guesses
                    .pop_front()
                    .map_or(UserAction::Exit, UserAction::Guess),
            )
        }

        fn display_round_start(&mut self, intro: &RoundIntro) {
            self.intros.push(intro.clone());
        }

        fn display_progress(&mut self, _progress: &Progress) {}

        fn display_guess_outcome(&mut self, outcome: &GuessOutcome) {
            self.outcomes.push(*outcome);
        }

        fn display_invalid_guess(&mut self, _error: &GameError) {
            self.invalid_guesses += 1;
        }

        fn display_round_over(&mut self, summary: &RoundSummary, _player_name: &str) {
            self.summaries.push(summary.clone());
        }

        fn display_record_outcome(&mut self, outcome: &RecordOutcome) {
            self.records.push(outcome.clone());
        }

        fn display_hall_of_fame(&mut self, entries: &[LeaderboardEntry]) {
            self.halls.push(entries.to_vec());
        }

        fn display_about(&mut self) {
            self.abouts += 1;
        }

        fn display_invalid_menu_choice(&mut self) {
            self.invalid_menu += 1;
        }

        fn display_store_error(&mut self, _error: &StoreError) {
            self.store_errors += 1;
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl ScoreStore for ReadOnlyStore {
        fn load(&mut self) -> std::result::Result<HallOfFame, StoreError> {
            Ok(HallOfFame::default())
        }

        fn commit(&mut self, _table: &HallOfFame) -> std::result::Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn letters(s: &str) -> VecDeque<String> {
        s.chars().map(|c| c.to_string()).collect()
    }

    /// The word `play_round` will draw with a fresh `StdRng` seeded with `seed`.
    fn secret_for(seed: u64, difficulty: Difficulty, choice: &str) -> String {
        let mut rng = StdRng::seed_from_u64(seed);
        let category = choose_category(difficulty, choice, &mut rng);
        random_word(category, &mut rng)
    }

    fn distinct_letters(word: &str) -> String {
        let mut seen: Vec<char> = word.chars().collect();
        seen.sort_unstable();
        seen.dedup();
        seen.into_iter().collect()
    }

    fn misses_for(word: &str, count: usize) -> String {
        ('a'..='z').filter(|c| !word.contains(*c)).take(count).collect()
    }

    #[test]
    fn test_normalize_player_name() {
        assert_eq!(normalize_player_name("  mia  rose "), "Mia Rose");
        assert_eq!(normalize_player_name("ZOE"), "Zoe");
        assert_eq!(normalize_player_name("   "), DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_menu_choice_from_input() {
        assert_eq!(MenuChoice::from_input(" 1 "), Some(MenuChoice::Play(Difficulty::Easy)));
        assert_eq!(MenuChoice::from_input("4"), Some(MenuChoice::HallOfFame));
        assert_eq!(MenuChoice::from_input("6"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_input("7"), None);
        assert_eq!(MenuChoice::from_input("easy"), None);
    }

    #[test]
    fn test_play_round_win_is_recorded() {
        let word = secret_for(1, Difficulty::Easy, "2");
        let mut guesses = letters(&misses_for(&word, 2));
        guesses.extend(letters(&distinct_letters(&word)));
        let mut ui = ScriptedInterface {
            categories: VecDeque::from(["2"]),
            guesses,
            ..Default::default()
        };
        let mut board = Leaderboard::new(MemoryStore::new());
        let mut rng = StdRng::seed_from_u64(1);

        let summary = play_round(&mut ui, &mut board, &mut rng, "Mia", Difficulty::Easy)
            .unwrap()
            .unwrap();

        assert_eq!(ui.intros[0].category, Some(Category::Shapes));
        assert_eq!(ui.intros[0].lives, 8);
        assert_eq!(ui.intros[0].word_length, word.len());
        assert_eq!(summary.status, RoundStatus::Won);
        assert_eq!(summary.secret_word, word);
        assert_eq!(summary.score, Some(6));
        assert!(ui.outcomes.last().unwrap().won_now);

        assert_eq!(ui.records.len(), 1);
        assert!(ui.records[0].updated);
        let entry = board.get(Difficulty::Easy).unwrap();
        assert_eq!(entry.winner, "Mia");
        assert_eq!(entry.remaining_lives, 6);
    }

    #[test]
    fn test_play_round_hard_hides_category() {
        let word = secret_for(3, Difficulty::Hard, "");
        let mut ui = ScriptedInterface {
            guesses: letters(&distinct_letters(&word)),
            ..Default::default()
        };
        let mut board = Leaderboard::new(MemoryStore::new());
        let mut rng = StdRng::seed_from_u64(3);

        let summary = play_round(&mut ui, &mut board, &mut rng, "Mia", Difficulty::Hard)
            .unwrap()
            .unwrap();
        assert_eq!(ui.intros[0].category, None);
        assert_eq!(ui.intros[0].lives, 6);
        assert_eq!(summary.score, Some(6));
    }

    #[test]
    fn test_play_round_invalid_and_repeated_guesses_do_not_cost_lives() {
        let word = secret_for(5, Difficulty::Easy, "1");
        let first = word.chars().next().unwrap().to_string();
        let mut guesses: VecDeque<String> = ["ab", "3", ""].iter().map(|s| s.to_string()).collect();
        guesses.push_back(first.clone());
        guesses.push_back(first.to_uppercase());
        guesses.extend(letters(&distinct_letters(&word)));
        let mut ui = ScriptedInterface {
            categories: VecDeque::from(["1"]),
            guesses,
            ..Default::default()
        };
        let mut board = Leaderboard::new(MemoryStore::new());
        let mut rng = StdRng::seed_from_u64(5);

        let summary = play_round(&mut ui, &mut board, &mut rng, "Mia", Difficulty::Easy)
            .unwrap()
            .unwrap();
        assert_eq!(ui.invalid_guesses, 3);
        let repeats = ui
            .outcomes
            .iter()
            .filter(|o| o.status == GuessStatus::AlreadyGuessed)
            .count();
        assert_eq!(repeats, 2);
        assert_eq!(summary.score, Some(8));
    }

    #[test]
    fn test_play_round_lost_round_is_not_recorded() {
        let word = secret_for(9, Difficulty::Moderate, "animals");
        let mut ui = ScriptedInterface {
            categories: VecDeque::from(["animals"]),
            guesses: letters(&misses_for(&word, 6)),
            ..Default::default()
        };
        let mut board = Leaderboard::new(MemoryStore::new());
        let mut rng = StdRng::seed_from_u64(9);

        let summary = play_round(&mut ui, &mut board, &mut rng, "Mia", Difficulty::Moderate)
            .unwrap()
            .unwrap();
        assert_eq!(summary.status, RoundStatus::Lost);
        assert_eq!(summary.score, None);
        assert!(ui.records.is_empty());
        assert!(ui.outcomes.last().unwrap().lost_now);
        assert_eq!(board.get(Difficulty::Moderate).unwrap().winner, NO_WINNER);
    }

    #[test]
    fn test_play_round_quit_mid_round() {
        let mut ui = ScriptedInterface {
            categories: VecDeque::from(["1"]),
            ..Default::default()
        };
        let mut board = Leaderboard::new(MemoryStore::new());
        let mut rng = StdRng::seed_from_u64(11);

        let summary = play_round(&mut ui, &mut board, &mut rng, "Mia", Difficulty::Easy).unwrap();
        assert!(summary.is_none());
        assert!(ui.summaries.is_empty());
    }

    #[test]
    fn test_store_failure_after_win_is_reported_not_reversed() {
        let word = secret_for(13, Difficulty::Moderate, "");
        let mut ui = ScriptedInterface {
            guesses: letters(&distinct_letters(&word)),
            ..Default::default()
        };
        let mut board = Leaderboard::new(ReadOnlyStore);
        let mut rng = StdRng::seed_from_u64(13);

        let summary = play_round(&mut ui, &mut board, &mut rng, "Mia", Difficulty::Moderate)
            .unwrap()
            .unwrap();
        assert_eq!(summary.status, RoundStatus::Won);
        assert_eq!(summary.score, Some(6));
        assert_eq!(ui.store_errors, 1);
        assert!(ui.records.is_empty());
    }

    #[test]
    fn test_game_loop_menu_flow() {
        let mut ui = ScriptedInterface {
            names: VecDeque::from(["  zoe ".to_string()]),
            menu: VecDeque::from(["9", "5", "4", "6"]),
            ..Default::default()
        };
        let mut board = Leaderboard::new(MemoryStore::new());
        let mut rng = StdRng::seed_from_u64(17);

        game_loop(&mut ui, &mut board, &mut rng, None).unwrap();
        assert_eq!(ui.invalid_menu, 1);
        assert_eq!(ui.abouts, 1);
        assert_eq!(ui.halls.len(), 1);
        assert_eq!(ui.halls[0].len(), 3);
        assert!(ui.exited);
    }

    #[test]
    fn test_game_loop_no_name_exits() {
        let mut ui = ScriptedInterface::default();
        let mut board = Leaderboard::new(MemoryStore::new());
        let mut rng = StdRng::seed_from_u64(19);

        game_loop(&mut ui, &mut board, &mut rng, None).unwrap();
        assert!(ui.exited);
        assert_eq!(ui.abouts, 0);
    }

    #[test]
    fn test_game_loop_reports_store_failure_on_startup() {
        let mut ui = ScriptedInterface::default();
        let mut board = Leaderboard::new(ReadOnlyStore);
        let mut rng = StdRng::seed_from_u64(23);

        game_loop(&mut ui, &mut board, &mut rng, Some("mia")).unwrap();
        assert_eq!(ui.store_errors, 1);
        assert!(ui.exited);
    }
}
