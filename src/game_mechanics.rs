//! Yahtzee scoring rules.
//!
//! [`calculate_category_score`] is total over every (dice, category) pair: a
//! roll that does not fit the category scores 0. Callers guarantee a full pool
//! of five dice.

use crate::constants::*;
use crate::dice_mechanics::count_faces;
use crate::types::{Category, Dice};

/// Score for placing a 5-dice roll in the given category.
///
/// Upper categories score face × count. Lower categories follow the standard
/// Yahtzee table: sum of dice for three/four of a kind and chance, fixed values
/// for full house (25), small straight (30), large straight (40) and Yahtzee (50).
pub fn calculate_category_score(dice: &Dice, category: Category) -> u16 {
    let face_count = count_faces(dice);
    let sum_all: u16 = dice.iter().map(|&d| d as u16).sum();

    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.index() + 1;
            face_count[face] as u16 * face as u16
        }
        Category::ThreeOfAKind => n_of_a_kind_score(&face_count, 3, sum_all),
        Category::FourOfAKind => n_of_a_kind_score(&face_count, 4, sum_all),
        Category::Yahtzee => n_of_a_kind_score(&face_count, 5, YAHTZEE_SCORE),
        Category::FullHouse => {
            let mut counts = [0u8; NUM_FACES];
            counts.copy_from_slice(&face_count[1..]);
            counts.sort_unstable();
            if counts == [0, 0, 0, 0, 2, 3] {
                FULL_HOUSE_SCORE
            } else {
                0
            }
        }
        Category::SmallStraight => {
            // Any window of four consecutive faces that are all present.
            let has_run = (1..=3).any(|start| (start..start + 4).all(|f| face_count[f] >= 1));
            if has_run {
                SMALL_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::LargeStraight => {
            let low = face_count[1..=5].iter().all(|&c| c == 1) && face_count[6] == 0;
            let high = face_count[2..=6].iter().all(|&c| c == 1) && face_count[1] == 0;
            if low || high {
                LARGE_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::Chance => sum_all,
    }
}

/// Scoring helper for N-of-a-kind categories.
/// Faces are scanned in ascending order; returns `value` on the first face
/// seen at least `n` times, else 0.
fn n_of_a_kind_score(face_count: &[u8; NUM_FACES + 1], n: u8, value: u16) -> u16 {
    for face in 1..=NUM_FACES {
        if face_count[face] >= n {
            return value;
        }
    }
    0
}

/// Upper bonus for a completed upper section.
pub fn upper_bonus(upper_subtotal: u16) -> u16 {
    if upper_subtotal >= UPPER_BONUS_THRESHOLD {
        UPPER_BONUS
    } else {
        0
    }
}

/// Score of `dice` in every category, in [`Category::ALL`] order.
pub fn score_all_categories(dice: &Dice) -> [u16; CATEGORY_COUNT] {
    let mut scores = [0u16; CATEGORY_COUNT];
    for cat in Category::ALL {
        scores[cat.index()] = calculate_category_score(dice, cat);
    }
    scores
}
