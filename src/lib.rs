//! # Yahtzee — game engine for standard Yahtzee
//!
//! A single-player game engine: five dice, up to three rolls per round,
//! thirteen rounds, one category scored per round.
//!
//! | Layer | Module | Description |
//! |-------|--------|-------------|
//! | Dice pool | [`dice_mechanics`] | Fresh rolls, keep-and-reroll, injected [`dice_mechanics::DiceSource`] |
//! | Scoring | [`game_mechanics`] | Points for a roll in a category, upper bonus |
//! | Scorecard | [`scorecard`] | 13 write-once category slots + 4 aggregate rows |
//! | State machine | [`game`] | Round/roll counters, legal-move checks, completion |
//! | Host | [`ledger`], [`server`] | In-memory users/games/scores and the HTTP adapter |
//! | Tools | [`simulation`] | Greedy autoplayer for batch statistics |
//!
//! ## Scorecard layout
//!
//! The flat 17-slot view used for rendering places the upper categories at
//! 0–5, UpperSubtotal at 6, UpperBonus at 7, the lower categories at 8–14,
//! LowerSubtotal at 15 and GrandTotal at 16. Unfilled slots render as −1.
//!
//! ## Rules worth knowing
//!
//! - Keeping all five dice rerolls all five, the same as keeping none.
//! - Five of a kind is a Yahtzee but not a full house.
//! - The upper bonus (35) needs an upper subtotal of at least 63 and is only
//!   settled once all six upper categories are filled.

pub mod constants;
pub mod dice_mechanics;
pub mod env_config;
pub mod error;
pub mod game;
pub mod game_mechanics;
pub mod ledger;
pub mod scorecard;
pub mod server;
pub mod simulation;
pub mod types;

pub use error::{GameError, KeepRejection};
pub use game::{CategoryOutcome, CompletionSummary, Game, HistoryEntry, Phase, RollOutcome};
pub use types::{Category, Dice, OwnerId};
