//! Core data types: dice, categories and owner references.
//!
//! [`Category`] is the closed set of 13 scorable hands. Its declaration order is
//! the scorecard order used everywhere (upper section first), and
//! [`Category::slot_index`] maps it onto the flat 17-slot layout where the
//! aggregate rows sit at indices 6, 7, 15 and 16.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// A full pool of five dice, each in 1..=6.
pub type Dice = [u8; NUM_DICE];

/// Opaque reference to whoever owns a game. The engine only carries it into
/// the completion summary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Scorable Yahtzee category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

impl Category {
    /// All categories in scorecard order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    pub const UPPER: [Category; UPPER_CATEGORY_COUNT] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    pub const LOWER: [Category; CATEGORY_COUNT - UPPER_CATEGORY_COUNT] = [
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    /// Position in [`Category::ALL`] (0-12).
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Position in the flat 17-slot scorecard layout.
    ///
    /// Upper categories keep their index (0-5); lower categories are shifted
    /// past the UpperSubtotal/UpperBonus rows (8-14).
    pub fn slot_index(self) -> usize {
        if self.is_upper() {
            self.index()
        } else {
            self.index() + 2
        }
    }

    /// Inverse of [`Category::slot_index`]. Aggregate slots have no category.
    pub fn from_slot_index(slot: usize) -> Option<Category> {
        match slot {
            0..=5 => Some(Category::ALL[slot]),
            8..=14 => Some(Category::ALL[slot - 2]),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn is_upper(self) -> bool {
        self.index() < UPPER_CATEGORY_COUNT
    }

    /// Face counted by an upper category (Ones → 1 ... Sixes → 6).
    pub fn face(self) -> Option<u8> {
        if self.is_upper() {
            Some(self.index() as u8 + 1)
        } else {
            None
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Category::Ones => "Ones",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::SmallStraight => "Small Straight",
            Category::LargeStraight => "Large Straight",
            Category::Yahtzee => "Yahtzee",
            Category::Chance => "Chance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_layout() {
        assert_eq!(Category::Ones.slot_index(), 0);
        assert_eq!(Category::Sixes.slot_index(), 5);
        assert_eq!(Category::ThreeOfAKind.slot_index(), 8);
        assert_eq!(Category::Yahtzee.slot_index(), 13);
        assert_eq!(Category::Chance.slot_index(), 14);

        for cat in Category::ALL {
            assert_eq!(Category::from_slot_index(cat.slot_index()), Some(cat));
        }
        for slot in [
            SLOT_UPPER_SUBTOTAL,
            SLOT_UPPER_BONUS,
            SLOT_LOWER_SUBTOTAL,
            SLOT_GRAND_TOTAL,
        ] {
            assert_eq!(Category::from_slot_index(slot), None);
        }
    }

    #[test]
    fn test_faces() {
        assert_eq!(Category::Ones.face(), Some(1));
        assert_eq!(Category::Sixes.face(), Some(6));
        assert_eq!(Category::Chance.face(), None);
        assert_eq!(Category::UPPER.len() + Category::LOWER.len(), CATEGORY_COUNT);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Category::ThreeOfAKind).unwrap();
        assert_eq!(json, "\"three_of_a_kind\"");
        let cat: Category = serde_json::from_str("\"large_straight\"").unwrap();
        assert_eq!(cat, Category::LargeStraight);
    }
}
