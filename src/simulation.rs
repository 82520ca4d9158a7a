//! Batch simulation: plays N games with a greedy autoplayer.
//!
//! Each round the player rolls, keeps the dice showing the most common face
//! for both rerolls, then scores the open category worth the most points right
//! now. Games run in parallel with rayon; game `i` is seeded with `seed + i`,
//! so a batch is reproducible regardless of thread count.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::constants::NUM_DICE;
use crate::dice_mechanics::{most_common_face_positions, DiceSource, RngDice};
use crate::error::GameError;
use crate::game::Game;
use crate::types::{Category, OwnerId};

/// Results of a batch simulation.
#[derive(Debug, Serialize)]
pub struct SimulationResult {
    #[serde(skip)]
    pub scores: Vec<u16>,
    pub num_games: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: u16,
    pub max: u16,
    pub median: u16,
    pub bonus_rate: f64,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Outcome of a single simulated game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub grand_total: u16,
    pub got_bonus: bool,
}

/// Play one full game with the greedy strategy.
pub fn play_greedy_game<S: DiceSource + ?Sized>(source: &mut S) -> Result<GameSummary, GameError> {
    let mut game = Game::new(OwnerId::from("simulation"));
    loop {
        let mut outcome = game.roll(&[], source)?;
        while outcome.rolls_remaining > 0 {
            let keep = most_common_face_positions(&outcome.dice);
            // Keeping all five would reroll everything.
            if keep.len() == NUM_DICE {
                break;
            }
            outcome = game.roll(&keep, source)?;
        }

        let Some(category) = best_immediate_category(&game) else {
            return Err(GameError::GameAlreadyOver);
        };
        let result = game.choose_category(category)?;
        if let Some(summary) = result.completion {
            return Ok(GameSummary {
                grand_total: summary.grand_total,
                got_bonus: summary.upper_bonus > 0,
            });
        }
    }
}

/// Open category with the highest score for the dice on the table; first in
/// scorecard order on ties.
fn best_immediate_category(game: &Game) -> Option<Category> {
    game.score_preview()
        .into_iter()
        .fold(None, |best, (cat, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((cat, score)),
        })
        .map(|(cat, _)| cat)
}

/// Simulate `num_games` games in parallel.
pub fn simulate_batch(num_games: usize, seed: u64) -> Result<SimulationResult, GameError> {
    let start = Instant::now();
    let summaries: Vec<GameSummary> = (0..num_games)
        .into_par_iter()
        .map(|i| {
            let mut dice = RngDice(SmallRng::seed_from_u64(seed.wrapping_add(i as u64)));
            play_greedy_game(&mut dice)
        })
        .collect::<Result<_, _>>()?;
    let elapsed = start.elapsed();

    let scores: Vec<u16> = summaries.iter().map(|s| s.grand_total).collect();
    let bonuses = summaries.iter().filter(|s| s.got_bonus).count();
    Ok(summarize(scores, bonuses, elapsed))
}

fn summarize(mut scores: Vec<u16>, bonuses: usize, elapsed: Duration) -> SimulationResult {
    let n = scores.len();
    if n == 0 {
        return SimulationResult {
            scores,
            num_games: 0,
            mean: 0.0,
            std_dev: 0.0,
            min: 0,
            max: 0,
            median: 0,
            bonus_rate: 0.0,
            elapsed,
        };
    }

    let sum: f64 = scores.iter().map(|&s| s as f64).sum();
    let mean = sum / n as f64;
    let variance: f64 = scores
        .iter()
        .map(|&s| {
            let diff = s as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / n as f64;

    scores.sort_unstable();
    SimulationResult {
        num_games: n,
        mean,
        std_dev: variance.sqrt(),
        min: scores[0],
        max: scores[n - 1],
        median: scores[n / 2],
        bonus_rate: bonuses as f64 / n as f64,
        scores,
        elapsed,
    }
}
