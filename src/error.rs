//! Precondition violations reported by the game engine.
//!
//! Every variant is recoverable: the rejected operation leaves the game exactly
//! as it was, and the caller decides how to present the failure.

use thiserror::Error;

use crate::types::Category;

/// Why a keep selection was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum KeepRejection {
    /// Dice were selected before the first roll of the round.
    #[error("cannot keep dice before the first roll")]
    BeforeFirstRoll,
    /// Position outside the 5-die pool.
    #[error("die index {0} is out of range")]
    OutOfRange(usize),
    /// Same position selected twice.
    #[error("die index {0} selected twice")]
    Duplicate(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no rolls remaining this round, choose a category")]
    RollsExhausted,
    #[error("category {0} has already been scored")]
    CategoryAlreadyFilled(Category),
    #[error("roll the dice before choosing a category")]
    NoRollYet,
    #[error("game is already over")]
    GameAlreadyOver,
    #[error("invalid keep selection: {0}")]
    InvalidKeepSelection(KeepRejection),
}

impl GameError {
    /// Stable machine-readable tag for each condition.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::RollsExhausted => "rolls_exhausted",
            GameError::CategoryAlreadyFilled(_) => "category_already_filled",
            GameError::NoRollYet => "no_roll_yet",
            GameError::GameAlreadyOver => "game_already_over",
            GameError::InvalidKeepSelection(_) => "invalid_keep_selection",
        }
    }
}
