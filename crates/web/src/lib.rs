pub mod accounts;
pub mod api;
pub mod error;
pub mod roster;

pub use accounts::{AccountError, Accounts, PlayerStats};
pub use error::ApiError;
pub use roster::{Roster, RosterEntry, RosterError};

use arena_lobby::{Lobby, LobbyConfig};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

/// Shared state behind every handler.
pub struct AppState {
    /// Records every battle into `accounts` before answering either player.
    pub lobby: Arc<Lobby<Accounts>>,
    pub accounts: Arc<Accounts>,
}

impl AppState {
    pub fn new(config: LobbyConfig, accounts: Arc<Accounts>) -> Self {
        let lobby = Arc::new(Lobby::with_recorder(config, Arc::clone(&accounts)));
        Self { lobby, accounts }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/battles", post(api::join_battle))
        .route("/stats", get(api::stats))
        .route("/scoreboard", get(api::scoreboard))
        .route("/lobby", get(api::lobby_status))
        .fallback(api::not_found)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
