//! Typed client for the upstream rooms API.
//!
//! The upstream (a hosted video-call platform) owns room lifecycle and token
//! signing; this client wraps the three calls the provisioning service
//! needs: look up a room, create a room with a bounded lifetime, and mint a
//! meeting token for a room/user pair.

use chrono::Utc;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ProvisionConfig;
use crate::error::ProvisionError;

/// Room record as returned by the upstream API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomInfo {
    /// Room name (unique per upstream account)
    pub name: String,
    /// Join URL for the room
    pub url: String,
    /// Room configuration, including its expiry
    #[serde(default)]
    pub config: RoomProperties,
}

/// Room configuration properties understood by the upstream API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomProperties {
    /// Unix timestamp after which the room expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Debug, Serialize)]
struct CreateRoomRequest {
    name: String,
    properties: RoomProperties,
}

#[derive(Debug, Serialize)]
struct MeetingTokenRequest {
    properties: TokenProperties,
}

#[derive(Debug, Serialize)]
struct TokenProperties {
    room_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    exp: i64,
    is_owner: bool,
}

#[derive(Debug, Deserialize)]
struct MeetingTokenResponse {
    token: String,
}

/// Client for the upstream rooms API
#[derive(Debug, Clone)]
pub struct RoomsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    room_ttl_secs: i64,
    token_ttl_secs: i64,
}

impl RoomsClient {
    /// Build a client from the service configuration.
    ///
    /// Fails with [`ProvisionError::MissingApiKey`] when no key is
    /// configured, since every upstream call requires one.
    pub fn new(config: &ProvisionConfig) -> Result<Self, ProvisionError> {
        if config.api_key.is_empty() {
            return Err(ProvisionError::MissingApiKey);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|error| ProvisionError::Network {
                reason: error.to_string(),
            })?;
        Ok(Self {
            http,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            room_ttl_secs: config.room_ttl_secs,
            token_ttl_secs: config.token_ttl_secs,
        })
    }

    /// Look up a room by name. Returns `Ok(None)` when the upstream does
    /// not know the room.
    pub async fn get_room(&self, name: &str) -> Result<Option<RoomInfo>, ProvisionError> {
        let url = format!("{}/rooms/{}", self.base_url, name);
        debug!("looking up room {}", name);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("room {} does not exist upstream", name);
            return Ok(None);
        }
        let response = ensure_success(response)?;
        Ok(Some(response.json().await?))
    }

    /// Create a room with the configured bounded lifetime
    pub async fn create_room(&self, name: &str) -> Result<RoomInfo, ProvisionError> {
        let url = format!("{}/rooms", self.base_url);
        let expires_at = Utc::now().timestamp() + self.room_ttl_secs;
        let request = CreateRoomRequest {
            name: name.to_string(),
            properties: RoomProperties {
                exp: Some(expires_at),
            },
        };
        info!("creating room {} (expires at {})", name, expires_at);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(response)?;
        Ok(response.json().await?)
    }

    /// Fetch the room if it exists, otherwise create it.
    ///
    /// This is what makes token issuance idempotent with respect to room
    /// lifecycle: asking for a token never tears down or recreates a live
    /// room.
    pub async fn get_or_create_room(&self, name: &str) -> Result<RoomInfo, ProvisionError> {
        match self.get_room(name).await? {
            Some(room) => Ok(room),
            None => self.create_room(name).await,
        }
    }

    /// Mint a meeting token for the given room and user
    pub async fn create_meeting_token(
        &self,
        room_name: &str,
        user_name: &str,
    ) -> Result<String, ProvisionError> {
        let url = format!("{}/meeting-tokens", self.base_url);
        let expires_at = Utc::now().timestamp() + self.token_ttl_secs;
        let request = MeetingTokenRequest {
            properties: TokenProperties {
                room_name: room_name.to_string(),
                user_name: Some(user_name.to_string()),
                exp: expires_at,
                is_owner: true,
            },
        };
        debug!("minting meeting token for {} in {}", user_name, room_name);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(response)?;
        let body: MeetingTokenResponse = response.json().await?;
        Ok(body.token)
    }
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ProvisionError> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(ProvisionError::Upstream {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    Ok(response)
}
