//! # Callstage Provision
//!
//! Room and meeting-token provisioning for Callstage sessions. The service
//! proxies a hosted rooms API: clients ask `GET /token` for credentials, the
//! service looks the room up (creating it with a bounded lifetime when it
//! does not exist yet) and answers with a signed meeting token plus the join
//! URL. Room lifecycle and token signing stay upstream; this crate only
//! brokers them.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod rooms;
pub mod service;

// Re-export main types
pub use config::ProvisionConfig;
pub use error::ProvisionError;
pub use rooms::{RoomInfo, RoomProperties, RoomsClient};
pub use service::{router, AppState, TokenQuery, TokenResponse};
