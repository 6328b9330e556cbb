//! Entertainer display runner.
//!
//! Headless rendition of the big screen: connects, registers, keeps the
//! stores synchronized, and logs every screen change. A windowed renderer
//! would consume the same [`Stores`] handle this binary does.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

use display::config::{ConfigError, DisplayConfig};
use display::screen;
use display::state::{Cue, StoreKind, Stores, owning_store};
use display::sync::{Commands, Manager};

#[tokio::main]
async fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt::init();

    let config = DisplayConfig::parse();
    let url = config.ws_url()?;
    if config.session.is_none() {
        tracing::warn!("no session configured, staying on the waiting screen");
    }

    let stores = Arc::new(Stores::new(config.viewport()));
    let manager = Manager::new(Arc::clone(&stores), url);
    let commands = manager.connect().await;

    let watcher = tokio::spawn(watch_stores(
        Arc::clone(&stores),
        commands,
        config.session.is_some(),
    ));
    let countdown = tokio::spawn(countdown_loop(Arc::clone(&stores)));
    let audio = tokio::spawn(ambient_audio(stores.cues()));

    match config.run_for {
        Some(seconds) => tokio::time::sleep(Duration::from_secs(seconds)).await,
        None => {
            if let Err(error) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %error, "ctrl-c handler failed, shutting down");
            }
        }
    }

    tracing::info!("shutting down");
    watcher.abort();
    countdown.abort();
    audio.abort();
    manager.disconnect().await;
    Ok(())
}

/// Re-read the stores whenever the revision moves: re-register on each
/// established connection and log screen changes.
async fn watch_stores(stores: Arc<Stores>, commands: Commands, has_session: bool) {
    let mut revisions = stores.revisions();

    let (mut was_connected, mut screen) = {
        let session = stores.session.read().await;
        (session.connected, screen::select(&session, has_session))
    };
    if was_connected {
        register(&commands);
    }
    tracing::info!(screen = %screen, "screen selected");

    while revisions.changed().await.is_ok() {
        let session = stores.session.read().await;
        let connected = session.connected;
        let next = screen::select(&session, has_session);
        drop(session);

        if connected && !was_connected {
            register(&commands);
        }
        was_connected = connected;

        if next != screen {
            tracing::info!(from = %screen, to = %next, "screen changed");
            screen = next;
        }
    }
}

/// The server scopes everything to the registered role, so each established
/// connection starts with a register plus a snapshot request.
fn register(commands: &Commands) {
    tracing::info!("registering display and requesting state");
    commands.register();
    commands.request_state();
}

/// Local once-a-second lobby tick: countdown while the lobby owns the
/// screen, reaction expiry always.
async fn countdown_loop(stores: Arc<Stores>) {
    let start = tokio::time::Instant::now() + Duration::from_secs(1);
    let mut tick = tokio::time::interval_at(start, Duration::from_secs(1));
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tick.tick().await;

        let counting = {
            let session = stores.session.read().await;
            owning_store(session.current_activity) == StoreKind::Lobby
        };

        let mut changed = false;
        {
            let mut lobby = stores.lobby.write().await;
            if counting {
                lobby.decrement_seconds();
                changed = true;
            }
            if lobby.prune_expired(std::time::Instant::now()) > 0 {
                changed = true;
            }
        }
        if changed {
            stores.mark_changed();
        }
    }
}

/// Stand-in for the ambient audio player: follows the energizer loop cues.
async fn ambient_audio(mut cues: broadcast::Receiver<Cue>) {
    loop {
        match cues.recv().await {
            Ok(Cue::EnergizerAmbientStarted) => tracing::info!("ambient loop started"),
            Ok(Cue::EnergizerAmbientStopped) => tracing::info!("ambient loop stopped"),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "ambient cue consumer lagged");
            }
            Err(broadcast::error::RecvError::Closed) => return,
        }
    }
}
