//! Axum HTTP server: thin JSON endpoints over the [`Ledger`].
//!
//! The ledger sits behind one mutex, so at most one mutation per game is in
//! flight. The owner of a game is passed explicitly with every call.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/users` | Create a user |
//! | POST | `/games` | Start a game |
//! | GET | `/games/{id}?user=` | Game state |
//! | POST | `/games/{id}/cancel` | Discard an unfinished game |
//! | GET | `/users/{name}/games` | Active games of a user |
//! | GET | `/games/{id}/history?user=` | Scored rounds of a game |
//! | GET | `/high_scores?limit=` | Best finished games |
//! | GET | `/rankings` | Users by best score |
//! | PUT | `/games/{id}/roll` | Roll, keeping some dice |
//! | POST | `/games/{id}/category` | Score the dice in a category |

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use crate::constants::DEFAULT_HIGH_SCORE_LIMIT;
use crate::error::GameError;
use crate::game::Game;
use crate::ledger::{GameId, Ledger, LedgerError};
use crate::types::{Category, OwnerId};

pub type AppState = Arc<Mutex<Ledger>>;

pub fn create_router(ledger: Ledger) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health_check))
        .route("/users", post(handle_create_user))
        .route("/users/{name}/games", get(handle_user_games))
        .route("/games", post(handle_new_game))
        .route("/games/{id}", get(handle_get_game))
        .route("/games/{id}/cancel", post(handle_cancel_game))
        .route("/games/{id}/history", get(handle_game_history))
        .route("/games/{id}/roll", put(handle_roll))
        .route("/games/{id}/category", post(handle_choose_category))
        .route("/high_scores", get(handle_high_scores))
        .route("/rankings", get(handle_rankings))
        .layer(cors)
        .with_state(Arc::new(Mutex::new(ledger)))
}

// ── Request types ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct CreateUserRequest {
    name: OwnerId,
    email: Option<String>,
}

#[derive(Deserialize)]
struct OwnerRequest {
    user: OwnerId,
}

#[derive(Deserialize)]
struct OwnerQuery {
    user: OwnerId,
}

#[derive(Deserialize)]
struct RollRequest {
    user: OwnerId,
    #[serde(default)]
    keep: Vec<usize>,
}

#[derive(Deserialize)]
struct CategoryRequest {
    user: OwnerId,
    category: Category,
}

#[derive(Deserialize)]
struct HighScoreQuery {
    limit: Option<usize>,
}

// ── Extractors ──────────────────────────────────────────────────────
//
// Same as axum's `Json`, `Query` and `Path`, but a rejection is answered
// through `ApiError` so every failure carries a JSON body.

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
struct ApiJson<T>(T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
struct ApiQuery<T>(T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
struct ApiPath<T>(T);

// ── Error mapping ───────────────────────────────────────────────────

pub enum ApiError {
    Ledger(LedgerError),
    /// Body, query string or path that could not be decoded.
    Malformed(String),
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        Self::Ledger(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, kind) = match self {
            ApiError::Malformed(message) => {
                (StatusCode::BAD_REQUEST, message, "malformed_request")
            }
            ApiError::Ledger(e) => {
                let status = match &e {
                    LedgerError::UnknownUser(_) | LedgerError::GameNotFound(_) => {
                        StatusCode::NOT_FOUND
                    }
                    LedgerError::NotOwner(_) => StatusCode::FORBIDDEN,
                    LedgerError::Game(GameError::InvalidKeepSelection(_)) => {
                        StatusCode::BAD_REQUEST
                    }
                    LedgerError::UserExists(_)
                    | LedgerError::CannotCancelFinished(_)
                    | LedgerError::Game(_) => StatusCode::CONFLICT,
                };
                (status, e.to_string(), e.kind())
            }
        };
        let body = serde_json::json!({ "error": error, "kind": kind });
        (status, Json(body)).into_response()
    }
}

type ApiResult = Result<Json<serde_json::Value>, ApiError>;

fn lock(state: &AppState) -> MutexGuard<'_, Ledger> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Game state with the scorecard spelled out per row (−1 = unfilled).
fn game_json(id: GameId, game: &Game, message: &str) -> serde_json::Value {
    let slots = game.scorecard().slots();
    serde_json::json!({
        "id": id,
        "user_name": game.owner(),
        "phase": game.phase(),
        "rounds_remaining": game.rounds_remaining(),
        "rolls_remaining": game.rolls_remaining(),
        "game_over": game.is_over(),
        "dice": game.dice(),
        "ones": slots[0],
        "twos": slots[1],
        "threes": slots[2],
        "fours": slots[3],
        "fives": slots[4],
        "sixes": slots[5],
        "upper_score": slots[6],
        "upper_bonus": slots[7],
        "three_of_a_kind": slots[8],
        "four_of_a_kind": slots[9],
        "full_house": slots[10],
        "small_straight": slots[11],
        "large_straight": slots[12],
        "yahtzee": slots[13],
        "chance": slots[14],
        "lower_score": slots[15],
        "total": slots[16],
        "message": message,
    })
}

// ── Handlers ────────────────────────────────────────────────────────

async fn handle_health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn handle_create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let message = format!("User {} created!", req.name);
    lock(&state).create_user(req.name, req.email)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": message })),
    ))
}

async fn handle_new_game(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<OwnerRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let mut ledger = lock(&state);
    let id = ledger.new_game(&req.user)?;
    let game = ledger.game(&req.user, id)?;
    Ok((
        StatusCode::CREATED,
        Json(game_json(id, game, "Roll the Dice! Good Luck!")),
    ))
}

async fn handle_get_game(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<GameId>,
    ApiQuery(q): ApiQuery<OwnerQuery>,
) -> ApiResult {
    let ledger = lock(&state);
    let game = ledger.game(&q.user, id)?;
    Ok(Json(game_json(id, game, "Let us roll!")))
}

async fn handle_cancel_game(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<GameId>,
    ApiJson(req): ApiJson<OwnerRequest>,
) -> ApiResult {
    lock(&state).cancel_game(&req.user, id)?;
    Ok(Json(serde_json::json!({ "message": "The game is cancelled." })))
}

async fn handle_user_games(
    State(state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> ApiResult {
    let ledger = lock(&state);
    let items: Vec<serde_json::Value> = ledger
        .active_games(&OwnerId(name))?
        .into_iter()
        .map(|(id, game)| {
            let message = format!("{} remaining rounds.", game.rounds_remaining());
            game_json(id, game, &message)
        })
        .collect();
    Ok(Json(serde_json::json!({ "items": items })))
}

async fn handle_game_history(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<GameId>,
    ApiQuery(q): ApiQuery<OwnerQuery>,
) -> ApiResult {
    let ledger = lock(&state);
    let items: Vec<serde_json::Value> = ledger
        .history(&q.user, id)?
        .iter()
        .map(|entry| {
            serde_json::json!({
                "dice": entry.dice_string(),
                "category": entry.category,
            })
        })
        .collect();
    Ok(Json(serde_json::json!({ "items": items })))
}

async fn handle_high_scores(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<HighScoreQuery>,
) -> Json<serde_json::Value> {
    let ledger = lock(&state);
    let limit = q.limit.unwrap_or(DEFAULT_HIGH_SCORE_LIMIT);
    let items: Vec<serde_json::Value> = ledger
        .high_scores(limit)
        .into_iter()
        .map(|s| {
            serde_json::json!({
                "user_name": s.owner,
                "game_id": s.game_id,
                "recorded_at": s.recorded_at,
                "result": s.result,
            })
        })
        .collect();
    Json(serde_json::json!({ "items": items }))
}

async fn handle_rankings(State(state): State<AppState>) -> Json<serde_json::Value> {
    let ledger = lock(&state);
    let items: Vec<serde_json::Value> = ledger
        .user_rankings()
        .into_iter()
        .map(|u| {
            serde_json::json!({
                "name": u.name,
                "max_score": u.best_score.map_or(-1, i32::from),
                "games_completed": u.games_completed,
            })
        })
        .collect();
    Json(serde_json::json!({ "items": items }))
}

async fn handle_roll(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<GameId>,
    ApiJson(req): ApiJson<RollRequest>,
) -> ApiResult {
    let mut ledger = lock(&state);
    let outcome = ledger.roll(&req.user, id, &req.keep)?;
    let message = format!(
        "{} chances remain to roll in this round.",
        outcome.rolls_remaining
    );
    let game = ledger.game(&req.user, id)?;
    Ok(Json(game_json(id, game, &message)))
}

async fn handle_choose_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<GameId>,
    ApiJson(req): ApiJson<CategoryRequest>,
) -> ApiResult {
    let mut ledger = lock(&state);
    let outcome = ledger.choose_category(&req.user, id, req.category)?;
    let message = match &outcome.completion {
        Some(summary) => format!("You got total {} ! Game End.", summary.grand_total),
        None => format!("You got {} points.", outcome.points),
    };
    let game = ledger.game(&req.user, id)?;
    Ok(Json(game_json(id, game, &message)))
}
