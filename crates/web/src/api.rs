//! HTTP handlers.

use crate::AppState;
use crate::accounts::PlayerStats;
use crate::error::ApiError;
use arena_core::BattleResult;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize, Debug)]
pub struct PlayerRef {
    pub username: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BattleResponse {
    pub message: &'static str,
    pub player_one: PlayerRef,
    pub player_two: PlayerRef,
    pub winner: Option<String>,
    pub battle_log: Vec<String>,
}

impl From<&BattleResult> for BattleResponse {
    fn from(result: &BattleResult) -> Self {
        Self {
            message: "Battle finished!",
            player_one: PlayerRef {
                username: result.player_one.clone(),
            },
            player_two: PlayerRef {
                username: result.player_two.clone(),
            },
            winner: result.winner.clone(),
            battle_log: result.log.clone(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ScoreboardResponse {
    pub leaderboard: Vec<PlayerStats>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LobbyResponse {
    pub waiting: Option<String>,
    pub battles_fought: u64,
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// POST /battles
///
/// Suspends until a second player arrives. Both callers get the same battle.
pub async fn join_battle(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<BattleResponse>, ApiError> {
    let Some(token) = bearer_token(&headers) else {
        tracing::debug!("battle request without bearer token");
        return Err(ApiError::Unauthorized);
    };
    let Some(player) = state.accounts.authenticate(token).await else {
        tracing::debug!("battle request with unknown token");
        return Err(ApiError::Unauthorized);
    };
    if player.deck.is_empty() {
        return Err(ApiError::EmptyDeck);
    }

    // Both fighters' stats and decks are stored before either caller resumes.
    let pairing = state.lobby.enter(player).await?;
    Ok(Json(BattleResponse::from(pairing.result.as_ref())))
}

/// GET /stats
pub async fn stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<PlayerStats>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;
    state
        .accounts
        .stats_for_token(token)
        .await
        .map(Json)
        .ok_or(ApiError::Unauthorized)
}

/// GET /scoreboard
pub async fn scoreboard(State(state): State<Arc<AppState>>) -> Json<ScoreboardResponse> {
    Json(ScoreboardResponse {
        leaderboard: state.accounts.scoreboard().await,
    })
}

/// GET /lobby
pub async fn lobby_status(State(state): State<Arc<AppState>>) -> Json<LobbyResponse> {
    let status = state.lobby.status().await;
    Json(LobbyResponse {
        waiting: status.waiting,
        battles_fought: status.battles_fought,
    })
}

pub async fn not_found() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not Found" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer alice-token"));
        assert_eq!(bearer_token(&headers), Some("alice-token"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert_eq!(bearer_token(&headers), None);
    }
}
