//! Token client demo
//!
//! Fetches room credentials from a running provisioning service. Start one
//! first (`cargo run -p callstage-provision` with `DAILY_API_KEY` set), then
//! run this example. `CALLSTAGE_TOKEN_URL` overrides the service address.

use callstage::{random_identity, CredentialsClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let base = std::env::var("CALLSTAGE_TOKEN_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());
    let identity = random_identity();
    println!("🪪 Requesting credentials for {} from {}", identity, base);

    let client = CredentialsClient::new(base)?;
    let credentials = client.fetch(Some(&identity), None).await?;

    println!("✅ Room: {} ({})", credentials.room_name, credentials.room_url);
    let preview = credentials.token.len().min(12);
    println!("🔑 Token: {}…", &credentials.token[..preview]);
    Ok(())
}
