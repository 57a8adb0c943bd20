use serde::{Deserialize, Serialize};
use std::fmt;

/// Game level. Decides starting lives and how the secret word is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Moderate, Self::Hard];

    #[must_use]
    pub const fn starting_lives(self) -> u32 {
        match self {
            Self::Easy => 8,
            Self::Moderate | Self::Hard => 6,
        }
    }

    /// Easy and Moderate let the player pick a category; Hard picks one at
    /// random and never reveals it.
    #[must_use]
    pub const fn player_picks_category(self) -> bool {
        matches!(self, Self::Easy | Self::Moderate)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Moderate => "Moderate",
            Self::Hard => "Hard",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Easy => "Choose category, 8 lives, chill mode",
            Self::Moderate => "Choose category, 6 lives, stay sharp",
            Self::Hard => "Random word, no clues, 6 lives, bring it on",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
