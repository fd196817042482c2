//! Scripted call demo
//!
//! Drives the presentation tracker through a short scripted call and prints
//! every effect it emits. No provider connection required.

use async_trait::async_trait;
use callstage::{
    MediaSession, ReceiveTier, Renderer, RoomEvent, SelectionUpdate, Session, SessionError,
    SessionId, SlotUpdate, TrackKind,
};
use futures::stream;
use tracing_subscriber::EnvFilter;

struct PrintRenderer;

#[async_trait]
impl Renderer for PrintRenderer {
    async fn apply_slot(&self, update: SlotUpdate) -> Result<(), SessionError> {
        match &update.track {
            Some(track) => println!("   🖼️  {} {} -> {}", update.slot, update.kind, track),
            None => println!("   🖼️  {} {} cleared", update.slot, update.kind),
        }
        Ok(())
    }

    async fn apply_selection(&self, update: SelectionUpdate) -> Result<(), SessionError> {
        match &update.active {
            Some(active) => println!("   🎯 active: {} (pinned: {})", active, update.pinned),
            None => println!("   🎯 active: nobody"),
        }
        Ok(())
    }
}

struct PrintMedia;

#[async_trait]
impl MediaSession for PrintMedia {
    async fn set_receive_quality(
        &self,
        session_id: SessionId,
        tier: ReceiveTier,
    ) -> Result<(), SessionError> {
        println!("   📶 receive quality for {}: {}", session_id, tier);
        Ok(())
    }

    async fn set_local_audio(&self, enabled: bool) -> Result<(), SessionError> {
        println!("   🎤 microphone {}", if enabled { "on" } else { "off" });
        Ok(())
    }

    async fn set_local_video(&self, enabled: bool) -> Result<(), SessionError> {
        println!("   📷 camera {}", if enabled { "on" } else { "off" });
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🎬 Scripted call");
    let session = Session::new(PrintRenderer, PrintMedia);

    println!("\n▶️  You join and publish, then Ada joins and starts talking");
    let events = stream::iter(vec![
        RoomEvent::ParticipantJoined {
            session_id: SessionId::from("local"),
            user_name: Some("You".to_string()),
            is_local: true,
        },
        RoomEvent::TrackStarted {
            session_id: SessionId::from("local"),
            kind: TrackKind::Video,
            track: "cam-local".into(),
        },
        RoomEvent::ParticipantJoined {
            session_id: SessionId::from("remote-ada"),
            user_name: Some("Ada".to_string()),
            is_local: false,
        },
        RoomEvent::TrackStarted {
            session_id: SessionId::from("remote-ada"),
            kind: TrackKind::Video,
            track: "cam-ada".into(),
        },
        RoomEvent::TrackStarted {
            session_id: SessionId::from("remote-ada"),
            kind: TrackKind::Audio,
            track: "mic-ada".into(),
        },
        RoomEvent::ActiveSpeakerChanged {
            session_id: SessionId::from("remote-ada"),
        },
    ]);
    session.drive(events).await?;

    let ada = SessionId::from("remote-ada");
    println!("\n📌 Pinning Ada");
    session.toggle_pin(&ada).await?;
    println!("   hint for Ada is now: {}", session.receive_quality_hint(&ada));

    println!("\n📌 Unpinning Ada");
    session.toggle_pin(&ada).await?;

    println!("\n🔇 Muting the microphone");
    session.mute_audio().await?;

    println!("\n👋 Leaving the call");
    session.close().await?;

    println!("\n✅ Done");
    Ok(())
}
