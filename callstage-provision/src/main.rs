//! Provisioning service binary

use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use callstage_provision::config::{DEFAULT_ROOM_TTL_SECS, DEFAULT_TOKEN_TTL_SECS};
use callstage_provision::{router, AppState, ProvisionConfig};

/// Room and meeting-token provisioning service
#[derive(Parser, Debug)]
#[command(name = "callstage-provision", version, about)]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Bearer key for the upstream rooms API
    #[arg(long, env = "DAILY_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Base URL of the upstream rooms API
    #[arg(long, env = "DAILY_API_BASE", default_value = "https://api.daily.co/v1")]
    api_base: String,

    /// Lifetime of rooms created on demand, in seconds
    #[arg(long, default_value_t = DEFAULT_ROOM_TTL_SECS)]
    room_ttl: i64,

    /// Lifetime of issued meeting tokens, in seconds
    #[arg(long, default_value_t = DEFAULT_TOKEN_TTL_SECS)]
    token_ttl: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ProvisionConfig {
        port: args.port,
        api_base: args.api_base,
        api_key: args.api_key,
        room_ttl_secs: args.room_ttl,
        token_ttl_secs: args.token_ttl,
    };

    let state = AppState::new(&config).context("failed to initialize service state")?;
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("provisioning service listening on {}", addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
