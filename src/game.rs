//! Game state machine: rolls, category choices and end-of-game aggregation.
//!
//! A [`Game`] moves through three observable phases:
//!
//! | Phase | Meaning | Legal operations |
//! |-------|---------|------------------|
//! | [`Phase::AwaitingRoll`] | no dice this round | `roll(&[])` |
//! | [`Phase::AwaitingCategory`] | dice on the table | `roll(keep)` while rolls remain, `choose_category` |
//! | [`Phase::Finished`] | all 13 categories scored | none |
//!
//! Every operation checks all of its preconditions before touching state, so a
//! rejected call leaves the game exactly as it was.

use serde::Serialize;
use tracing::debug;

use crate::constants::*;
use crate::dice_mechanics::{keep_and_reroll, DiceSource};
use crate::error::{GameError, KeepRejection};
use crate::game_mechanics::{calculate_category_score, score_all_categories};
use crate::scorecard::Scorecard;
use crate::types::{Category, Dice, OwnerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    AwaitingRoll,
    AwaitingCategory,
    Finished,
}

/// One completed round: the dice that were scored and where they went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub dice: Dice,
    pub category: Category,
}

impl HistoryEntry {
    /// Dice as a compact digit string, e.g. `"12345"`.
    pub fn dice_string(&self) -> String {
        self.dice.iter().map(|d| char::from(b'0' + d)).collect()
    }
}

/// Result of a successful roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RollOutcome {
    pub dice: Dice,
    pub rolls_remaining: u8,
}

/// Final tally handed to whoever records finished games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompletionSummary {
    pub owner: OwnerId,
    pub upper_subtotal: u16,
    pub upper_bonus: u16,
    pub lower_subtotal: u16,
    pub grand_total: u16,
}

/// Result of a successful category choice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryOutcome {
    pub category: Category,
    pub points: u16,
    pub game_over: bool,
    pub completion: Option<CompletionSummary>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Game {
    owner: OwnerId,
    dice: Option<Dice>,
    scorecard: Scorecard,
    rounds_remaining: u8,
    rolls_remaining: u8,
    game_over: bool,
    history: Vec<HistoryEntry>,
}

impl Game {
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            dice: None,
            scorecard: Scorecard::new(),
            rounds_remaining: NUM_ROUNDS,
            rolls_remaining: ROLLS_PER_ROUND,
            game_over: false,
            history: Vec::with_capacity(NUM_ROUNDS as usize),
        }
    }

    /// Roll the dice, keeping the positions in `keep` from the previous roll.
    ///
    /// The first roll of a round must not keep anything. Keeping nothing or
    /// all five dice rerolls the whole pool.
    pub fn roll<S: DiceSource + ?Sized>(
        &mut self,
        keep: &[usize],
        source: &mut S,
    ) -> Result<RollOutcome, GameError> {
        if self.game_over {
            return Err(GameError::GameAlreadyOver);
        }
        if self.dice.is_none() && !keep.is_empty() {
            return Err(GameError::InvalidKeepSelection(
                KeepRejection::BeforeFirstRoll,
            ));
        }
        if self.rolls_remaining == 0 {
            return Err(GameError::RollsExhausted);
        }

        let dice = keep_and_reroll(self.dice(), keep, source)?;
        self.dice = Some(dice);
        self.rolls_remaining -= 1;
        debug!(
            owner = %self.owner,
            ?dice,
            ?keep,
            rolls_remaining = self.rolls_remaining,
            "rolled"
        );

        Ok(RollOutcome {
            dice,
            rolls_remaining: self.rolls_remaining,
        })
    }

    /// Score the current dice in `category` and close the round.
    pub fn choose_category(&mut self, category: Category) -> Result<CategoryOutcome, GameError> {
        if self.game_over {
            return Err(GameError::GameAlreadyOver);
        }
        let dice = self.dice.ok_or(GameError::NoRollYet)?;
        if self.scorecard.is_filled(category) {
            return Err(GameError::CategoryAlreadyFilled(category));
        }

        let points = calculate_category_score(&dice, category);
        self.scorecard.record(category, points)?;
        self.rounds_remaining -= 1;
        self.history.push(HistoryEntry { dice, category });
        self.scorecard.settle_upper();
        debug!(
            owner = %self.owner,
            ?dice,
            %category,
            points,
            rounds_remaining = self.rounds_remaining,
            "category scored"
        );

        let completion = match self.scorecard.settle_totals() {
            Some(grand_total) => {
                self.game_over = true;
                Some(CompletionSummary {
                    owner: self.owner.clone(),
                    upper_subtotal: self.scorecard.upper_subtotal().unwrap_or(0),
                    upper_bonus: self.scorecard.upper_bonus().unwrap_or(0),
                    lower_subtotal: self.scorecard.lower_subtotal().unwrap_or(0),
                    grand_total,
                })
            }
            None => {
                self.rolls_remaining = ROLLS_PER_ROUND;
                self.dice = None;
                None
            }
        };

        Ok(CategoryOutcome {
            category,
            points,
            game_over: self.game_over,
            completion,
        })
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::Finished
        } else if self.dice.is_some() {
            Phase::AwaitingCategory
        } else {
            Phase::AwaitingRoll
        }
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Current dice: empty before the first roll of a round, otherwise five values.
    pub fn dice(&self) -> &[u8] {
        match &self.dice {
            Some(d) => d,
            None => &[],
        }
    }

    pub fn scorecard(&self) -> &Scorecard {
        &self.scorecard
    }

    pub fn rounds_remaining(&self) -> u8 {
        self.rounds_remaining
    }

    pub fn rolls_remaining(&self) -> u8 {
        self.rolls_remaining
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Points each open category would award for the dice on the table.
    /// Empty when there are no dice to score.
    pub fn score_preview(&self) -> Vec<(Category, u16)> {
        let Some(dice) = &self.dice else {
            return Vec::new();
        };
        let scores = score_all_categories(dice);
        self.scorecard
            .open_categories()
            .into_iter()
            .map(|c| (c, scores[c.index()]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice_mechanics::ScriptedDice;

    fn new_game() -> Game {
        Game::new(OwnerId::from("alice"))
    }

    #[test]
    fn test_initial_state() {
        let game = new_game();
        assert_eq!(game.rounds_remaining(), 13);
        assert_eq!(game.rolls_remaining(), 3);
        assert!(game.dice().is_empty());
        assert!(!game.is_over());
        assert_eq!(game.phase(), Phase::AwaitingRoll);
        assert_eq!(game.scorecard().slots(), [-1; 17]);
        assert!(game.history().is_empty());
        assert!(game.score_preview().is_empty());
    }

    #[test]
    fn test_roll_consumes_rolls() {
        let mut game = new_game();
        let mut src = ScriptedDice::new([2, 3, 4, 5, 6]);
        let out = game.roll(&[], &mut src).unwrap();
        assert_eq!(out.dice, [2, 3, 4, 5, 6]);
        assert_eq!(out.rolls_remaining, 2);
        assert_eq!(game.phase(), Phase::AwaitingCategory);

        game.roll(&[0, 1], &mut src).unwrap();
        assert_eq!(game.dice(), &[2, 3, 2, 3, 4]);
        game.roll(&[], &mut src).unwrap();
        assert_eq!(game.rolls_remaining(), 0);

        let before = game.clone();
        assert_eq!(game.roll(&[], &mut src), Err(GameError::RollsExhausted));
        assert_eq!(game.dice(), before.dice());
        assert_eq!(game.rolls_remaining(), 0);
    }

    #[test]
    fn test_keep_before_first_roll_rejected() {
        let mut game = new_game();
        let mut src = ScriptedDice::new([1]);
        assert_eq!(
            game.roll(&[0], &mut src),
            Err(GameError::InvalidKeepSelection(
                KeepRejection::BeforeFirstRoll
            ))
        );
        assert_eq!(game.rolls_remaining(), 3);
        assert_eq!(src.rolled(), 0);
    }

    #[test]
    fn test_choose_before_roll_rejected() {
        let mut game = new_game();
        assert_eq!(
            game.choose_category(Category::Chance),
            Err(GameError::NoRollYet)
        );
        assert_eq!(game.rounds_remaining(), 13);
    }

    #[test]
    fn test_choose_resets_round() {
        let mut game = new_game();
        let mut src = ScriptedDice::new([6, 6, 4, 2, 2]);
        game.roll(&[], &mut src).unwrap();
        let out = game.choose_category(Category::Chance).unwrap();
        assert_eq!(out.points, 20);
        assert!(!out.game_over);
        assert_eq!(out.completion, None);
        assert_eq!(game.rounds_remaining(), 12);
        assert_eq!(game.rolls_remaining(), 3);
        assert!(game.dice().is_empty());
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history()[0].dice_string(), "66422");
    }

    #[test]
    fn test_filled_category_rejected() {
        let mut game = new_game();
        let mut src = ScriptedDice::new([5]);
        game.roll(&[], &mut src).unwrap();
        game.choose_category(Category::Yahtzee).unwrap();
        game.roll(&[], &mut src).unwrap();

        let card_before = game.scorecard().clone();
        assert_eq!(
            game.choose_category(Category::Yahtzee),
            Err(GameError::CategoryAlreadyFilled(Category::Yahtzee))
        );
        assert_eq!(game.scorecard(), &card_before);
        assert_eq!(game.rounds_remaining(), 12);
        assert_eq!(game.phase(), Phase::AwaitingCategory);
    }

    #[test]
    fn test_score_preview_lists_open_categories() {
        let mut game = new_game();
        let mut src = ScriptedDice::new([3, 3, 3, 5, 5]);
        game.roll(&[], &mut src).unwrap();
        game.choose_category(Category::Ones).unwrap();
        game.roll(&[], &mut src).unwrap();
        let preview = game.score_preview();
        assert_eq!(preview.len(), 12);
        assert!(preview.contains(&(Category::FullHouse, 25)));
        assert!(!preview.iter().any(|(c, _)| *c == Category::Ones));
    }
}
