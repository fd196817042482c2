//! HTTP front end issuing room credentials.
//!
//! One route does the real work: `GET /token?identity=<name>&roomName=<name>`
//! answers with a meeting token plus the room URL, creating the room on
//! demand. Rooms the service has already resolved are cached until shortly
//! before their upstream expiry so repeated token requests for the same room
//! skip the lookup round-trip.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ProvisionConfig;
use crate::error::ProvisionError;
use crate::rooms::RoomsClient;

/// Margin subtracted from a room's expiry before the cache refuses to serve
/// it, so issued credentials do not point at a room about to close
const CACHE_EXPIRY_MARGIN_SECS: i64 = 30;

/// Shared state behind the HTTP routes
#[derive(Clone)]
pub struct AppState {
    client: RoomsClient,
    rooms: Arc<DashMap<String, CachedRoom>>,
}

#[derive(Debug, Clone)]
struct CachedRoom {
    name: String,
    url: String,
    expires_at: Option<i64>,
}

impl AppState {
    /// Build the service state from configuration
    pub fn new(config: &ProvisionConfig) -> Result<Self, ProvisionError> {
        Ok(Self {
            client: RoomsClient::new(config)?,
            rooms: Arc::new(DashMap::new()),
        })
    }

    async fn room(&self, name: &str) -> Result<CachedRoom, ProvisionError> {
        let now = Utc::now().timestamp();
        let cached = self.rooms.get(name).map(|entry| entry.clone());
        if let Some(room) = cached {
            let fresh = room
                .expires_at
                .map_or(true, |exp| exp > now + CACHE_EXPIRY_MARGIN_SECS);
            if fresh {
                debug!("room {} served from cache", name);
                return Ok(room);
            }
            self.rooms.remove(name);
        }

        let info = self.client.get_or_create_room(name).await?;
        let room = CachedRoom {
            name: info.name.clone(),
            url: info.url.clone(),
            expires_at: info.config.exp,
        };
        self.rooms.insert(name.to_string(), room.clone());
        Ok(room)
    }
}

/// Query parameters accepted by `GET /token`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenQuery {
    /// Display name baked into the issued token; defaults to "guest"
    pub identity: Option<String>,
    /// Room to issue credentials for; a unique name is generated when absent
    pub room_name: Option<String>,
}

/// Response body of `GET /token`
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed meeting token for the room
    pub token: String,
    /// Join URL of the room
    #[serde(rename = "roomURL")]
    pub room_url: String,
    /// Name of the room the token is valid for
    #[serde(rename = "roomName")]
    pub room_name: String,
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/token", get(issue_token))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn issue_token(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<TokenResponse>, ProvisionError> {
    let identity = query.identity.unwrap_or_else(|| "guest".to_string());
    let room_name = query.room_name.unwrap_or_else(generated_room_name);

    let room = state.room(&room_name).await?;
    let token = state.client.create_meeting_token(&room.name, &identity).await?;
    info!("issued token for {} in room {}", identity, room.name);

    Ok(Json(TokenResponse {
        token,
        room_url: room.url,
        room_name: room.name,
    }))
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// Fresh room name for requests that did not specify one
fn generated_room_name() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("callstage-{}", &suffix[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_room_names_are_unique_and_prefixed() {
        let first = generated_room_name();
        let second = generated_room_name();
        assert!(first.starts_with("callstage-"));
        assert_eq!(first.len(), "callstage-".len() + 12);
        assert_ne!(first, second);
    }

    #[test]
    fn test_token_response_wire_keys() {
        let response = TokenResponse {
            token: "tok".to_string(),
            room_url: "https://calls.example.com/demo".to_string(),
            room_name: "demo".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token"], "tok");
        assert_eq!(json["roomURL"], "https://calls.example.com/demo");
        assert_eq!(json["roomName"], "demo");
    }
}
