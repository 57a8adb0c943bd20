use crate::difficulty::Difficulty;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

const ANIMALS: &[&str] = &[
    "ant", "baboon", "badger", "bat", "bear", "beaver", "camel", "cat", "clam", "cobra",
];
const SHAPES: &[&str] = &[
    "square", "triangle", "rectangle", "circle", "ellipse", "rhombus", "trapezoid",
];
const PLACES: &[&str] = &["Cairo", "London", "Paris", "Baghdad", "Istanbul", "Riyadh"];

/// Named group of candidate words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Animals,
    Shapes,
    Places,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Animals, Self::Shapes, Self::Places];

    /// Used whenever the player's category choice is not recognized.
    pub const DEFAULT: Self = Self::Animals;

    #[must_use]
    pub const fn words(self) -> &'static [&'static str] {
        match self {
            Self::Animals => ANIMALS,
            Self::Shapes => SHAPES,
            Self::Places => PLACES,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Animals => "Animals",
            Self::Shapes => "Shapes",
            Self::Places => "Places",
        }
    }

    /// Position in the category menu, starting at 1.
    #[must_use]
    pub const fn menu_number(self) -> usize {
        match self {
            Self::Animals => 1,
            Self::Shapes => 2,
            Self::Places => 3,
        }
    }

    /// Parse a menu number (`"2"`) or a category name (`"shapes"`).
    #[must_use]
    pub fn from_choice(choice: &str) -> Option<Self> {
        let choice = choice.trim();
        Self::ALL.into_iter().find(|category| {
            choice == category.menu_number().to_string()
                || choice.eq_ignore_ascii_case(category.name())
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the category a round draws its word from.
///
/// Easy and Moderate honour `choice`, falling back to [`Category::DEFAULT`]
/// when it is not recognized. Hard ignores `choice` and picks uniformly.
pub fn choose_category<R: Rng + ?Sized>(difficulty: Difficulty, choice: &str, rng: &mut R) -> Category {
    if difficulty.player_picks_category() {
        Category::from_choice(choice).unwrap_or_else(|| {
            log::warn!(
                "Unrecognized category choice {choice:?}, falling back to {}",
                Category::DEFAULT
            );
            Category::DEFAULT
        })
    } else {
        *Category::ALL.choose(rng).unwrap_or(&Category::DEFAULT)
    }
}

/// Pick a uniformly random word from `category`, lowercased.
pub fn random_word<R: Rng + ?Sized>(category: Category, rng: &mut R) -> String {
    category
        .words()
        .choose(rng)
        .map_or_else(String::new, |word| word.to_lowercase())
}

/// Select the secret word for a round at `difficulty`.
pub fn select_word<R: Rng + ?Sized>(difficulty: Difficulty, choice: &str, rng: &mut R) -> String {
    let category = choose_category(difficulty, choice, rng);
    random_word(category, rng)
}
