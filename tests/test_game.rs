//! End-to-end tests of the game state machine with scripted dice.

use yahtzee::constants::*;
use yahtzee::dice_mechanics::ScriptedDice;
use yahtzee::game::{Game, Phase};
use yahtzee::types::{Category, OwnerId};
use yahtzee::{GameError, KeepRejection};

/// One roll per round, scored in the paired category.
const UPPER_63: [([u8; 5], Category); 6] = [
    ([1, 1, 1, 5, 5], Category::Ones),
    ([2, 2, 2, 5, 5], Category::Twos),
    ([3, 3, 3, 5, 5], Category::Threes),
    ([4, 4, 4, 5, 5], Category::Fours),
    ([5, 5, 5, 1, 1], Category::Fives),
    ([6, 6, 6, 1, 1], Category::Sixes),
];

const LOWER_203: [([u8; 5], Category); 7] = [
    ([6, 6, 6, 2, 1], Category::ThreeOfAKind),
    ([3, 3, 3, 3, 5], Category::FourOfAKind),
    ([2, 2, 3, 3, 3], Category::FullHouse),
    ([1, 2, 3, 4, 6], Category::SmallStraight),
    ([2, 3, 4, 5, 6], Category::LargeStraight),
    ([4, 4, 4, 4, 4], Category::Yahtzee),
    ([6, 5, 4, 3, 2], Category::Chance),
];

fn script(rounds: &[([u8; 5], Category)]) -> ScriptedDice {
    ScriptedDice::new(rounds.iter().flat_map(|(dice, _)| dice.iter().copied()))
}

fn play(rounds: &[([u8; 5], Category)]) -> Game {
    let mut game = Game::new(OwnerId::from("alice"));
    let mut src = script(rounds);
    for (dice, cat) in rounds {
        let rolled = game.roll(&[], &mut src).unwrap();
        assert_eq!(&rolled.dice, dice);
        game.choose_category(*cat).unwrap();
    }
    game
}

#[test]
fn first_round_chance() {
    let mut game = Game::new(OwnerId::from("alice"));
    let mut src = ScriptedDice::new([6, 6, 4, 2, 2]);

    assert_eq!(game.rounds_remaining(), 13);
    game.roll(&[], &mut src).unwrap();
    let out = game.choose_category(Category::Chance).unwrap();

    assert_eq!(out.points, 20);
    assert!(!out.game_over);
    assert_eq!(game.rounds_remaining(), 12);
    assert_eq!(game.rolls_remaining(), 3);
    assert_eq!(game.phase(), Phase::AwaitingRoll);
}

#[test]
fn upper_bonus_at_exactly_63() {
    let game = play(&UPPER_63);
    let slots = game.scorecard().slots();
    assert_eq!(slots[SLOT_UPPER_SUBTOTAL], 63);
    assert_eq!(slots[SLOT_UPPER_BONUS], 35);
    assert_eq!(slots[SLOT_LOWER_SUBTOTAL], -1);
    assert_eq!(slots[SLOT_GRAND_TOTAL], -1);
    assert!(!game.is_over());
}

#[test]
fn no_upper_bonus_at_62() {
    let mut rounds = UPPER_63;
    rounds[0].0 = [1, 1, 2, 2, 2];
    let game = play(&rounds);
    assert_eq!(game.scorecard().upper_subtotal(), Some(62));
    assert_eq!(game.scorecard().upper_bonus(), Some(0));
}

#[test]
fn upper_rows_wait_for_all_six() {
    let game = play(&UPPER_63[..5]);
    assert_eq!(game.scorecard().upper_subtotal(), None);
    assert_eq!(game.scorecard().upper_bonus(), None);
}

#[test]
fn full_game_with_bonus() {
    let rounds: Vec<_> = UPPER_63.iter().chain(LOWER_203.iter()).copied().collect();
    let mut game = Game::new(OwnerId::from("alice"));
    let mut src = script(&rounds);

    let mut completions = 0;
    for (i, (_, cat)) in rounds.iter().enumerate() {
        game.roll(&[], &mut src).unwrap();
        let out = game.choose_category(*cat).unwrap();
        assert_eq!(out.game_over, i == rounds.len() - 1);
        if let Some(summary) = out.completion {
            completions += 1;
            assert_eq!(summary.owner, OwnerId::from("alice"));
            assert_eq!(summary.upper_subtotal, 63);
            assert_eq!(summary.upper_bonus, 35);
            assert_eq!(summary.lower_subtotal, 203);
            assert_eq!(summary.grand_total, 301);
        }
    }
    assert_eq!(completions, 1);
    assert!(game.is_over());
    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(game.rounds_remaining(), 0);
    assert_eq!(game.history().len(), 13);
    assert_eq!(game.history()[12].dice_string(), "65432");

    let slots = game.scorecard().slots();
    assert_eq!(
        slots[SLOT_GRAND_TOTAL],
        slots[SLOT_UPPER_SUBTOTAL] + slots[SLOT_UPPER_BONUS] + slots[SLOT_LOWER_SUBTOTAL]
    );
    assert!(slots.iter().all(|&v| v >= 0));

    // Terminal: nothing else is accepted and nothing changes.
    let card = game.scorecard().clone();
    assert_eq!(
        game.choose_category(Category::Chance),
        Err(GameError::GameAlreadyOver)
    );
    assert_eq!(game.roll(&[], &mut src), Err(GameError::GameAlreadyOver));
    assert_eq!(game.scorecard(), &card);
}

#[test]
fn full_game_without_bonus() {
    let mut upper = UPPER_63;
    upper[0].0 = [1, 1, 2, 2, 2];
    let rounds: Vec<_> = upper.iter().chain(LOWER_203.iter()).copied().collect();
    let game = play(&rounds);
    assert_eq!(game.scorecard().grand_total(), Some(62 + 203));
}

#[test]
fn rerolls_within_a_round() {
    let mut game = Game::new(OwnerId::from("alice"));
    let mut src = ScriptedDice::new([3, 3, 1, 2, 3, 3, 6, 3, 5]);

    let first = game.roll(&[], &mut src).unwrap();
    assert_eq!(first.dice, [3, 3, 1, 2, 3]);

    let second = game.roll(&[4, 0, 1], &mut src).unwrap();
    assert_eq!(second.dice, [3, 3, 3, 3, 6]);
    assert_eq!(second.rolls_remaining, 1);

    let third = game.roll(&[0, 1, 2, 3], &mut src).unwrap();
    assert_eq!(third.dice, [3, 3, 3, 3, 3]);
    assert_eq!(third.rolls_remaining, 0);

    assert_eq!(game.roll(&[], &mut src), Err(GameError::RollsExhausted));
    let out = game.choose_category(Category::Yahtzee).unwrap();
    assert_eq!(out.points, 50);
    assert_eq!(game.history()[0].dice, [3, 3, 3, 3, 3]);
}

#[test]
fn invalid_keeps_leave_game_untouched() {
    let mut game = Game::new(OwnerId::from("alice"));
    let mut src = ScriptedDice::new([1, 2, 3, 4, 5]);

    assert_eq!(
        game.roll(&[2], &mut src),
        Err(GameError::InvalidKeepSelection(
            KeepRejection::BeforeFirstRoll
        ))
    );
    game.roll(&[], &mut src).unwrap();
    assert_eq!(
        game.roll(&[9], &mut src),
        Err(GameError::InvalidKeepSelection(KeepRejection::OutOfRange(9)))
    );
    assert_eq!(
        game.roll(&[0, 0], &mut src),
        Err(GameError::InvalidKeepSelection(KeepRejection::Duplicate(0)))
    );
    assert_eq!(game.rolls_remaining(), 2);
    assert_eq!(game.dice(), &[1, 2, 3, 4, 5]);
    assert_eq!(src.rolled(), 5);
}

#[test]
fn full_keep_rerolls_everything() {
    let mut game = Game::new(OwnerId::from("alice"));
    let mut src = ScriptedDice::new([2, 2, 2, 2, 2, 5, 5, 5, 5, 5]);
    game.roll(&[], &mut src).unwrap();
    let out = game.roll(&[0, 1, 2, 3, 4], &mut src).unwrap();
    assert_eq!(out.dice, [5; 5]);
}

struct StuckDie(u8);

impl yahtzee::dice_mechanics::DiceSource for StuckDie {
    fn roll_die(&mut self) -> u8 {
        self.0
    }
}

#[test]
fn faulty_source_cannot_break_scoring() {
    let mut game = Game::new(OwnerId::from("alice"));
    let mut src = StuckDie(7);
    let rolled = game.roll(&[], &mut src).unwrap();
    assert_eq!(rolled.dice, [6; 5]);
    assert_eq!(game.choose_category(Category::Sixes).unwrap().points, 30);

    let mut src = StuckDie(0);
    game.roll(&[], &mut src).unwrap();
    assert_eq!(game.choose_category(Category::Ones).unwrap().points, 5);
}
