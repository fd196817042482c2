//! Client for the token provisioning service

use std::time::Duration;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors raised while fetching room credentials
#[derive(Error, Debug)]
pub enum CredentialsError {
    /// Provisioning service answered with a non-success status
    #[error("credentials request failed with status {status}")]
    Status {
        /// HTTP status the service returned
        status: u16,
    },

    /// Request failed before a response arrived
    #[error("credentials request failed: {reason}")]
    Network {
        /// Underlying transport error
        reason: String,
    },

    /// Response body was not a valid credentials document
    #[error("credentials response could not be decoded: {reason}")]
    Decode {
        /// Underlying decode error
        reason: String,
    },
}

impl From<reqwest::Error> for CredentialsError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            CredentialsError::Decode {
                reason: error.to_string(),
            }
        } else {
            CredentialsError::Network {
                reason: error.to_string(),
            }
        }
    }
}

/// Credentials needed to join a provisioned room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCredentials {
    /// Meeting token authorizing the join
    pub token: String,
    /// Full URL of the provisioned room
    #[serde(rename = "roomURL")]
    pub room_url: String,
    /// Name of the provisioned room
    #[serde(rename = "roomName")]
    pub room_name: String,
}

/// HTTP client for the token provisioning service.
///
/// Issues `GET {base}/token` requests and decodes the credentials the
/// service returns. Non-success statuses surface as
/// [`CredentialsError::Status`].
#[derive(Debug, Clone)]
pub struct CredentialsClient {
    http: reqwest::Client,
    base_url: String,
}

impl CredentialsClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, CredentialsError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| CredentialsError::Network {
                reason: error.to_string(),
            })?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch credentials for the given identity and room.
    ///
    /// Omitted parameters are left to the service's defaults: a generated
    /// identity and an on-demand room.
    pub async fn fetch(
        &self,
        identity: Option<&str>,
        room_name: Option<&str>,
    ) -> Result<RoomCredentials, CredentialsError> {
        let url = format!("{}/token", self.base_url);
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(identity) = identity {
            query.push(("identity", identity));
        }
        if let Some(room_name) = room_name {
            query.push(("roomName", room_name));
        }

        let response = self.http.get(&url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CredentialsError::Status {
                status: status.as_u16(),
            });
        }
        let credentials: RoomCredentials = response.json().await?;
        debug!("fetched credentials for room {}", credentials.room_name);
        Ok(credentials)
    }
}

const ADJECTIVES: &[&str] = &[
    "Brave", "Calm", "Eager", "Gentle", "Jolly", "Keen", "Lively", "Merry", "Quick", "Witty",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Edsger", "Grace", "Hedy", "Katherine", "Linus", "Margaret", "Radia", "Tim",
];

const LAST_NAMES: &[&str] = &[
    "Brook", "Field", "Glen", "Haven", "Lake", "Marsh", "Ridge", "Stone", "Vale", "Wood",
];

/// Generate an "Adjective First Last" display name for participants that
/// join without one
pub fn random_identity() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).unwrap_or(&"Friendly");
    let first = FIRST_NAMES.choose(&mut rng).unwrap_or(&"Guest");
    let last = LAST_NAMES.choose(&mut rng).unwrap_or(&"Caller");
    format!("{} {} {}", adjective, first, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_wire_shape() {
        let credentials: RoomCredentials = serde_json::from_value(serde_json::json!({
            "token": "tok-1",
            "roomURL": "https://calls.example.com/demo",
            "roomName": "demo"
        }))
        .unwrap();
        assert_eq!(credentials.token, "tok-1");
        assert_eq!(credentials.room_url, "https://calls.example.com/demo");
        assert_eq!(credentials.room_name, "demo");

        let value = serde_json::to_value(&credentials).unwrap();
        assert!(value.get("roomURL").is_some());
        assert!(value.get("roomName").is_some());
        assert!(value.get("room_url").is_none());
    }

    #[test]
    fn test_random_identity_shape() {
        for _ in 0..16 {
            let identity = random_identity();
            let words: Vec<&str> = identity.split(' ').collect();
            assert_eq!(words.len(), 3, "unexpected identity: {identity}");
            assert!(ADJECTIVES.contains(&words[0]));
            assert!(FIRST_NAMES.contains(&words[1]));
            assert!(LAST_NAMES.contains(&words[2]));
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = CredentialsClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
