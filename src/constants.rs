//! Game constants for standard Yahtzee.
//!
//! - |dice| = [`NUM_DICE`] = 5
//! - |categories| = [`CATEGORY_COUNT`] = 13 scorable + 4 aggregate slots = [`SCORECARD_SLOTS`]
//! - rounds per game = [`NUM_ROUNDS`], rolls per round = [`ROLLS_PER_ROUND`]

/// Number of dice in a full pool.
pub const NUM_DICE: usize = 5;

/// Number of faces on each die (values 1..=6).
pub const NUM_FACES: usize = 6;

/// Number of scorable categories (Ones through Chance).
pub const CATEGORY_COUNT: usize = 13;

/// Number of upper-section categories (Ones through Sixes).
pub const UPPER_CATEGORY_COUNT: usize = 6;

/// Scorable categories plus UpperSubtotal, UpperBonus, LowerSubtotal and GrandTotal.
pub const SCORECARD_SLOTS: usize = 17;

/// One category is filled per round, so a game lasts exactly this many rounds.
pub const NUM_ROUNDS: u8 = CATEGORY_COUNT as u8;

/// Rolls available at the start of every round (first roll + two rerolls).
pub const ROLLS_PER_ROUND: u8 = 3;

/// Rendered value of a slot that has not been filled yet.
pub const UNFILLED_SLOT: i32 = -1;

/// Upper bonus: 35 points if the upper subtotal reaches 63.
pub const UPPER_BONUS: u16 = 35;

/// Upper subtotal needed for the bonus (three of each face).
pub const UPPER_BONUS_THRESHOLD: u16 = 63;

pub const FULL_HOUSE_SCORE: u16 = 25;
pub const SMALL_STRAIGHT_SCORE: u16 = 30;
pub const LARGE_STRAIGHT_SCORE: u16 = 40;
pub const YAHTZEE_SCORE: u16 = 50;

/// Slot indices of the aggregate rows in the flat 17-slot layout.
pub const SLOT_UPPER_SUBTOTAL: usize = 6;
pub const SLOT_UPPER_BONUS: usize = 7;
pub const SLOT_LOWER_SUBTOTAL: usize = 15;
pub const SLOT_GRAND_TOTAL: usize = 16;

/// Number of score records returned by the leaderboard when no limit is given.
pub const DEFAULT_HIGH_SCORE_LIMIT: usize = 3;
