//! State machine for a single round of Hangman.
//!
//! A round starts `Active` and moves to exactly one of the terminal states:
//! - `Won` the moment every letter of the secret word has been guessed
//! - `Lost` the moment the wrong guesses reach the starting lives
//!
//! Terminal rounds reject further guesses.

use crate::difficulty::Difficulty;
use crate::error::{GameError, Result};
use std::collections::BTreeSet;
use std::fmt;

pub const MASK_CHAR: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Active,
    Won,
    Lost,
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Won => "won",
            Self::Lost => "lost",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessStatus {
    Hit,
    Miss,
    AlreadyGuessed,
}

/// Result of applying one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub letter: char,
    pub status: GuessStatus,
    /// Set only on the guess that won the round.
    pub won_now: bool,
    /// Set only on the guess that lost the round.
    pub lost_now: bool,
}

/// Snapshot of a round for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub masked_word: String,
    pub guessed_sorted: Vec<char>,
    pub lives_left: u32,
}

#[derive(Debug, Clone)]
pub struct RoundState {
    difficulty: Difficulty,
    secret_word: String,
    guessed: BTreeSet<char>,
    wrong_guesses: u32,
    lives_total: u32,
    status: RoundStatus,
}

impl RoundState {
    /// Start a round at `difficulty` with `word` as the secret.
    ///
    /// The word is lowercased and must consist of ASCII letters only.
    pub fn new(difficulty: Difficulty, word: &str) -> Result<Self> {
        let secret_word = word.trim().to_lowercase();
        if secret_word.is_empty() || !secret_word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GameError::InvalidSecretWord(word.to_string()));
        }
        Ok(Self {
            difficulty,
            secret_word,
            guessed: BTreeSet::new(),
            wrong_guesses: 0,
            lives_total: difficulty.starting_lives(),
            status: RoundStatus::Active,
        })
    }

    /// Apply one guess. `input` must be a single letter; case is ignored.
    pub fn apply_guess(&mut self, input: &str) -> Result<GuessOutcome> {
        if self.status != RoundStatus::Active {
            return Err(GameError::InvalidStateTransition(self.status));
        }
        let letter = parse_letter(input)?;

        if self.guessed.contains(&letter) {
            return Ok(GuessOutcome {
                letter,
                status: GuessStatus::AlreadyGuessed,
                won_now: false,
                lost_now: false,
            });
        }
        self.guessed.insert(letter);

        if self.secret_word.contains(letter) {
            let won_now = self.secret_word.chars().all(|c| self.guessed.contains(&c));
            if won_now {
                self.status = RoundStatus::Won;
            }
            Ok(GuessOutcome {
                letter,
                status: GuessStatus::Hit,
                won_now,
                lost_now: false,
            })
        } else {
            self.wrong_guesses += 1;
            let lost_now = self.wrong_guesses == self.lives_total;
            if lost_now {
                self.status = RoundStatus::Lost;
            }
            Ok(GuessOutcome {
                letter,
                status: GuessStatus::Miss,
                won_now: false,
                lost_now,
            })
        }
    }

    #[must_use]
    pub fn render_progress(&self) -> Progress {
        let masked_word = self
            .secret_word
            .chars()
            .map(|c| if self.guessed.contains(&c) { c } else { MASK_CHAR })
            .collect();
        Progress {
            masked_word,
            guessed_sorted: self.guessed.iter().copied().collect(),
            lives_left: self.lives_left(),
        }
    }

    /// Lives remaining at the moment of victory; `None` unless the round is won.
    #[must_use]
    pub fn score(&self) -> Option<u32> {
        (self.status == RoundStatus::Won).then(|| self.lives_left())
    }

    #[must_use]
    pub fn lives_left(&self) -> u32 {
        self.lives_total - self.wrong_guesses
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }

    #[must_use]
    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn lives_total(&self) -> u32 {
        self.lives_total
    }

    #[must_use]
    pub fn wrong_guesses(&self) -> u32 {
        self.wrong_guesses
    }
}

fn parse_letter(input: &str) -> Result<char> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_lowercase()),
        _ => Err(GameError::InvalidGuessInput(input.to_string())),
    }
}
