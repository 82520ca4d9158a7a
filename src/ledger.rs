//! In-memory ledger of users, games and finished-game scores.
//!
//! The ledger is the host side of the engine: it owns every [`Game`], routes
//! rolls through its own RNG, and turns each [`CompletionSummary`] into a
//! [`ScoreRecord`] plus an update of the owner's best score and completed-game
//! count. Queries cover the active-game list, round history, the high-score
//! board and the user ranking.

use std::collections::{BTreeMap, HashMap};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::dice_mechanics::{DiceSource, RngDice};
use crate::error::GameError;
use crate::game::{CategoryOutcome, CompletionSummary, Game, HistoryEntry, RollOutcome};
use crate::types::{Category, OwnerId};

pub type GameId = u64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub name: OwnerId,
    pub email: Option<String>,
    /// Best grand total over finished games; `None` until one is finished.
    pub best_score: Option<u16>,
    pub games_completed: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreRecord {
    pub owner: OwnerId,
    pub game_id: GameId,
    /// Seconds since the Unix epoch.
    pub recorded_at: u64,
    pub result: u16,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("user {0} already exists")]
    UserExists(OwnerId),
    #[error("user {0} not found, create the user first")]
    UnknownUser(OwnerId),
    #[error("game {0} not found")]
    GameNotFound(GameId),
    #[error("game {0} does not belong to this user")]
    NotOwner(GameId),
    #[error("game {0} is finished and cannot be cancelled")]
    CannotCancelFinished(GameId),
    #[error(transparent)]
    Game(#[from] GameError),
}

impl LedgerError {
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::UserExists(_) => "user_exists",
            LedgerError::UnknownUser(_) => "unknown_user",
            LedgerError::GameNotFound(_) => "game_not_found",
            LedgerError::NotOwner(_) => "not_owner",
            LedgerError::CannotCancelFinished(_) => "cannot_cancel_finished",
            LedgerError::Game(e) => e.kind(),
        }
    }
}

pub struct Ledger<D = RngDice<SmallRng>> {
    users: HashMap<OwnerId, UserRecord>,
    games: BTreeMap<GameId, Game>,
    scores: Vec<ScoreRecord>,
    next_game_id: GameId,
    dice: D,
}

impl Ledger {
    /// Ledger rolling with a `SmallRng`; seeded when `seed` is given, from OS
    /// entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_os_rng(),
        };
        Self::with_dice(RngDice(rng))
    }
}

impl<D: DiceSource> Ledger<D> {
    pub fn with_dice(dice: D) -> Self {
        Self {
            users: HashMap::new(),
            games: BTreeMap::new(),
            scores: Vec::new(),
            next_game_id: 1,
            dice,
        }
    }

    pub fn create_user(&mut self, name: OwnerId, email: Option<String>) -> Result<(), LedgerError> {
        if self.users.contains_key(&name) {
            return Err(LedgerError::UserExists(name));
        }
        info!(user = %name, "user created");
        self.users.insert(
            name.clone(),
            UserRecord {
                name,
                email,
                best_score: None,
                games_completed: 0,
            },
        );
        Ok(())
    }

    pub fn user(&self, name: &OwnerId) -> Result<&UserRecord, LedgerError> {
        self.users
            .get(name)
            .ok_or_else(|| LedgerError::UnknownUser(name.clone()))
    }

    pub fn new_game(&mut self, owner: &OwnerId) -> Result<GameId, LedgerError> {
        self.user(owner)?;
        let id = self.next_game_id;
        self.next_game_id += 1;
        self.games.insert(id, Game::new(owner.clone()));
        debug!(user = %owner, game_id = id, "game created");
        Ok(id)
    }

    pub fn game(&self, owner: &OwnerId, id: GameId) -> Result<&Game, LedgerError> {
        let game = self.games.get(&id).ok_or(LedgerError::GameNotFound(id))?;
        if game.owner() != owner {
            return Err(LedgerError::NotOwner(id));
        }
        Ok(game)
    }

    fn game_mut(&mut self, owner: &OwnerId, id: GameId) -> Result<&mut Game, LedgerError> {
        let game = self.games.get_mut(&id).ok_or(LedgerError::GameNotFound(id))?;
        if game.owner() != owner {
            return Err(LedgerError::NotOwner(id));
        }
        Ok(game)
    }

    /// Discard an unfinished game.
    pub fn cancel_game(&mut self, owner: &OwnerId, id: GameId) -> Result<(), LedgerError> {
        if self.game(owner, id)?.is_over() {
            return Err(LedgerError::CannotCancelFinished(id));
        }
        self.games.remove(&id);
        info!(user = %owner, game_id = id, "game cancelled");
        Ok(())
    }

    /// Unfinished games of `owner`, fewest rounds remaining first.
    pub fn active_games(&self, owner: &OwnerId) -> Result<Vec<(GameId, &Game)>, LedgerError> {
        self.user(owner)?;
        let mut games: Vec<(GameId, &Game)> = self
            .games
            .iter()
            .filter(|(_, g)| g.owner() == owner && !g.is_over())
            .map(|(&id, g)| (id, g))
            .collect();
        games.sort_by_key(|(id, g)| (g.rounds_remaining(), *id));
        Ok(games)
    }

    pub fn history(&self, owner: &OwnerId, id: GameId) -> Result<&[HistoryEntry], LedgerError> {
        Ok(self.game(owner, id)?.history())
    }

    pub fn roll(
        &mut self,
        owner: &OwnerId,
        id: GameId,
        keep: &[usize],
    ) -> Result<RollOutcome, LedgerError> {
        let Self { games, dice, .. } = self;
        let game = games.get_mut(&id).ok_or(LedgerError::GameNotFound(id))?;
        if game.owner() != owner {
            return Err(LedgerError::NotOwner(id));
        }
        Ok(game.roll(keep, dice)?)
    }

    pub fn choose_category(
        &mut self,
        owner: &OwnerId,
        id: GameId,
        category: Category,
    ) -> Result<CategoryOutcome, LedgerError> {
        let outcome = self.game_mut(owner, id)?.choose_category(category)?;
        if let Some(summary) = &outcome.completion {
            self.record_completion(id, summary);
        }
        Ok(outcome)
    }

    fn record_completion(&mut self, id: GameId, summary: &CompletionSummary) {
        let recorded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.scores.push(ScoreRecord {
            owner: summary.owner.clone(),
            game_id: id,
            recorded_at,
            result: summary.grand_total,
        });
        if let Some(user) = self.users.get_mut(&summary.owner) {
            if user.best_score.map_or(true, |best| summary.grand_total > best) {
                user.best_score = Some(summary.grand_total);
            }
            user.games_completed += 1;
        }
        info!(
            user = %summary.owner,
            game_id = id,
            grand_total = summary.grand_total,
            "game finished"
        );
    }

    /// Best `limit` score records, highest first.
    pub fn high_scores(&self, limit: usize) -> Vec<&ScoreRecord> {
        let mut scores: Vec<&ScoreRecord> = self.scores.iter().collect();
        scores.sort_by(|a, b| b.result.cmp(&a.result).then(a.game_id.cmp(&b.game_id)));
        scores.truncate(limit);
        scores
    }

    /// Users by best score (highest first, no score last), then fewest games.
    pub fn user_rankings(&self) -> Vec<&UserRecord> {
        let mut users: Vec<&UserRecord> = self.users.values().collect();
        users.sort_by(|a, b| {
            b.best_score
                .cmp(&a.best_score)
                .then(a.games_completed.cmp(&b.games_completed))
                .then(a.name.cmp(&b.name))
        });
        users
    }
}
