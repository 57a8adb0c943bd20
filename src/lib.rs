// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod difficulty;
pub mod error;
pub mod game_state;
pub mod leaderboard;
pub mod logging;
pub mod round;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use difficulty::Difficulty;
pub use error::{GameError, StoreError};
pub use game_state::{GameInterface, game_loop, play_round};
pub use leaderboard::{JsonFileStore, Leaderboard, LeaderboardEntry, MemoryStore, ScoreStore};
pub use round::{GuessOutcome, GuessStatus, Progress, RoundState, RoundStatus};
pub use wordbank::{Category, select_word};
