//! HTTP adapter over a running [`GameLoop`](crate::runtime::GameLoop).
//!
//! Routes map one-to-one onto [`Game`] queries and mutations. Rejected
//! actions are ordinary `200` responses carrying the [`Outcome`]; unknown
//! keys map to `404`.

use std::{convert::Infallible, net::SocketAddr, time::Duration};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::broadcast};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use tracing::info;

use crate::{
    actions::Outcome,
    config::ServerConfig,
    error::GameError,
    game::Game,
    map::SubTileGrid,
    runtime::{lock, GameLoop, SharedGame},
    state::{GameSnapshot, ResourceState},
};

#[derive(Clone)]
pub struct AppState {
    game: SharedGame,
    frames: broadcast::Sender<GameSnapshot>,
}

impl AppState {
    pub fn new(game: SharedGame, frames: broadcast::Sender<GameSnapshot>) -> Self {
        Self { game, frames }
    }

    pub fn for_loop(game_loop: &GameLoop) -> Self {
        Self::new(game_loop.game().clone(), game_loop.frames())
    }

    fn with_game<T>(&self, action: impl FnOnce(&mut Game) -> Result<T, GameError>) -> Result<Json<T>, ApiError> {
        let mut guard = lock(&self.game);
        action(&mut guard).map(Json).map_err(ApiError)
    }
}

#[derive(Debug)]
pub struct ApiError(pub GameError);

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GameError::UnknownResource(_) | GameError::UnknownRecipe(_) | GameError::UnknownHome(_) => {
                StatusCode::NOT_FOUND
            }
            GameError::UnknownToolCategory(_) => StatusCode::BAD_REQUEST,
            GameError::InvalidCatalog(_) | GameError::InvalidConfig(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct SellRequest {
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct SellPercentageRequest {
    pub percent: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct AutoSellRequest {
    pub threshold: Option<f64>,
    pub enabled: Option<bool>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/state", get(game_state))
        .route("/api/resources/:key", get(resource))
        .route("/api/resources/:key/gather", post(gather))
        .route("/api/resources/:key/hire", post(hire))
        .route("/api/resources/:key/sell", post(sell))
        .route("/api/resources/:key/sell-percentage", post(sell_percentage))
        .route("/api/resources/:key/sell-all", post(sell_all))
        .route("/api/resources/:key/auto-sell", post(auto_sell))
        .route("/api/tools/:key/equip", post(equip))
        .route("/api/tools/:key/unequip", post(unequip))
        .route("/api/tools/:key/swap", post(swap))
        .route("/api/homes", post(build_home))
        .route("/api/homes/:id/upgrade", post(upgrade_home))
        .route("/api/recipes/:id/craft", post(craft))
        .route("/api/map/:x/:y/gather", post(gather_at))
        .route("/api/map/:x/:y/path", get(path_tile))
        .route("/api/events", get(stream_events))
        .with_state(state)
}

pub async fn serve(state: AppState, config: &ServerConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "http api listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down http api");
}

async fn game_state(State(state): State<AppState>) -> Json<GameSnapshot> {
    Json(lock(&state.game).snapshot())
}

async fn resource(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ResourceState>, ApiError> {
    state.with_game(|game| game.resource(&key))
}

async fn gather(State(state): State<AppState>, Path(key): Path<String>) -> Result<Json<Outcome>, ApiError> {
    state.with_game(|game| game.start_gathering(&key))
}

async fn hire(State(state): State<AppState>, Path(key): Path<String>) -> Result<Json<Outcome>, ApiError> {
    state.with_game(|game| game.hire_worker(&key))
}

async fn sell(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<SellRequest>,
) -> Result<Json<Outcome>, ApiError> {
    state.with_game(|game| game.sell_resource(&key, request.amount))
}

async fn sell_percentage(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<SellPercentageRequest>,
) -> Result<Json<Outcome>, ApiError> {
    state.with_game(|game| game.sell_resource_percentage(&key, request.percent))
}

async fn sell_all(State(state): State<AppState>, Path(key): Path<String>) -> Result<Json<Outcome>, ApiError> {
    state.with_game(|game| game.sell_all_resource(&key))
}

async fn auto_sell(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<AutoSellRequest>,
) -> Result<Json<ResourceState>, ApiError> {
    state.with_game(|game| {
        if let Some(threshold) = request.threshold {
            game.set_auto_sell_threshold(&key, threshold)?;
        }
        if let Some(enabled) = request.enabled {
            game.set_auto_sell_enabled(&key, enabled)?;
        }
        game.resource(&key)
    })
}

async fn equip(State(state): State<AppState>, Path(key): Path<String>) -> Result<Json<Outcome>, ApiError> {
    state.with_game(|game| game.equip_tool(&key))
}

async fn unequip(State(state): State<AppState>, Path(key): Path<String>) -> Result<Json<Outcome>, ApiError> {
    state.with_game(|game| game.unequip_tool(&key))
}

async fn swap(State(state): State<AppState>, Path(key): Path<String>) -> Result<Json<Outcome>, ApiError> {
    state.with_game(|game| game.swap_tool(&key))
}

async fn build_home(State(state): State<AppState>) -> Result<Json<Outcome>, ApiError> {
    state.with_game(|game| game.build_home())
}

async fn upgrade_home(State(state): State<AppState>, Path(id): Path<u32>) -> Result<Json<Outcome>, ApiError> {
    state.with_game(|game| game.upgrade_home(id))
}

async fn craft(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Outcome>, ApiError> {
    state.with_game(|game| game.craft(&id))
}

async fn gather_at(
    State(state): State<AppState>,
    Path((x, y)): Path<(i32, i32)>,
) -> Result<Json<Outcome>, ApiError> {
    state.with_game(|game| game.gather_at(x, y))
}

async fn path_tile(
    State(state): State<AppState>,
    Path((x, y)): Path<(i32, i32)>,
) -> Result<Json<SubTileGrid>, StatusCode> {
    lock(&state.game)
        .path_variants(x, y)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.frames.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|frame| {
        let frame = frame.ok()?;
        let payload = serde_json::to_string(&frame).ok()?;
        Some(Ok(Event::default().data(payload)))
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(2))
            .text("keep-alive"),
    )
}
