//! Dice pool mechanics: face counting, fresh rolls and keep-and-reroll.
//!
//! Randomness is injected through [`DiceSource`]. [`RngDice`] adapts any
//! `rand::Rng`; [`ScriptedDice`] replays a fixed sequence of faces so that
//! whole games can be reproduced in tests.

use rand::Rng;

use crate::constants::*;
use crate::error::{GameError, KeepRejection};
use crate::types::Dice;

/// Source of uniform die faces in 1..=6.
pub trait DiceSource {
    fn roll_die(&mut self) -> u8;
}

/// Dice backed by a `rand` generator.
#[derive(Clone, Debug)]
pub struct RngDice<R>(pub R);

impl<R: Rng> DiceSource for RngDice<R> {
    #[inline(always)]
    fn roll_die(&mut self) -> u8 {
        self.0.random_range(1..=6)
    }
}

/// Replays a fixed script of faces, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    pos: usize,
}

impl ScriptedDice {
    /// An empty script rolls ones. Faces outside 1..=6 are clamped when rolled.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        let faces: Vec<u8> = faces.into_iter().collect();
        Self { faces, pos: 0 }
    }

    /// Number of faces handed out so far.
    pub fn rolled(&self) -> usize {
        self.pos
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.pos % self.faces.len()];
        self.pos += 1;
        face
    }
}

/// Count occurrences of each face (1-6) in a dice pool.
/// face_count[0] is unused; face_count[f] = count of face f.
/// Values outside 1..=6 are not counted.
pub fn count_faces(dice: &[u8]) -> [u8; NUM_FACES + 1] {
    let mut face_count = [0u8; NUM_FACES + 1];
    for &d in dice {
        if (1..=NUM_FACES as u8).contains(&d) {
            face_count[d as usize] += 1;
        }
    }
    face_count
}

/// One die from `source`, clamped into 1..=6.
#[inline(always)]
fn draw<S: DiceSource + ?Sized>(source: &mut S) -> u8 {
    source.roll_die().clamp(1, NUM_FACES as u8)
}

/// Roll five fresh dice.
pub fn roll_all<S: DiceSource + ?Sized>(source: &mut S) -> Dice {
    let mut dice = [0u8; NUM_DICE];
    for d in &mut dice {
        *d = draw(source);
    }
    dice
}

/// Check a keep selection against the current pool without rolling anything.
/// `current` is either empty (no roll yet this round) or a full pool.
pub fn validate_keep(current: &[u8], keep: &[usize]) -> Result<(), GameError> {
    if current.is_empty() {
        if keep.is_empty() {
            return Ok(());
        }
        return Err(GameError::InvalidKeepSelection(
            KeepRejection::BeforeFirstRoll,
        ));
    }
    let mut seen = [false; NUM_DICE];
    for &i in keep {
        if i >= NUM_DICE {
            return Err(GameError::InvalidKeepSelection(KeepRejection::OutOfRange(i)));
        }
        if seen[i] {
            return Err(GameError::InvalidKeepSelection(KeepRejection::Duplicate(i)));
        }
        seen[i] = true;
    }
    Ok(())
}

/// Keep the selected positions of `current` and roll the rest.
///
/// Kept dice stay in pool order at the front, fresh dice are appended. An empty
/// selection rerolls everything, and so does selecting all five positions.
/// The order of `keep` itself does not matter: `[3, 0]` keeps the same dice
/// in the same slots as `[0, 3]`.
pub fn keep_and_reroll<S: DiceSource + ?Sized>(
    current: &[u8],
    keep: &[usize],
    source: &mut S,
) -> Result<Dice, GameError> {
    validate_keep(current, keep)?;
    if keep.is_empty() || keep.len() == NUM_DICE {
        return Ok(roll_all(source));
    }

    let mut positions = keep.to_vec();
    positions.sort_unstable();

    let mut dice = [0u8; NUM_DICE];
    for (slot, &i) in positions.iter().enumerate() {
        dice[slot] = current[i];
    }
    for d in &mut dice[positions.len()..] {
        *d = draw(source);
    }
    Ok(dice)
}

/// Positions holding the most frequent face, preferring the higher face on ties.
pub fn most_common_face_positions(dice: &Dice) -> Vec<usize> {
    let face_count = count_faces(dice);
    let mut best_face = NUM_FACES;
    for f in (1..=NUM_FACES).rev() {
        if face_count[f] > face_count[best_face] {
            best_face = f;
        }
    }
    dice.iter()
        .enumerate()
        .filter(|&(_, &d)| d as usize == best_face)
        .map(|(i, _)| i)
        .collect()
}
