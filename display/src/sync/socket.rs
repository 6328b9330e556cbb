#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;

use std::sync::Arc;
use std::time::Duration;

use events::ClientEvent;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};

use crate::state::Stores;
use crate::sync::commands::Commands;
use crate::sync::router;

const INITIAL_BACKOFF: Duration = Duration::from_millis(1000);
const MAX_BACKOFF: Duration = Duration::from_millis(10_000);

/// Transport-level failure inside the socket task.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("websocket connect failed: {0}")]
    Connect(Box<tungstenite::Error>),
}

/// Owns the single persistent server connection.
///
/// `connect` is idempotent: while a socket task is alive, every call hands
/// out the same task's command handle, so one inbound message dispatches
/// exactly once no matter how many consumers asked for a connection.
pub struct Manager {
    stores: Arc<Stores>,
    url: String,
    active: Mutex<Option<Active>>,
}

struct Active {
    task: JoinHandle<()>,
    commands: Commands,
}

impl Manager {
    /// `url` is the ready-to-dial `ws://`/`wss://` endpoint.
    #[must_use]
    pub fn new(stores: Arc<Stores>, url: String) -> Self {
        Self { stores, url, active: Mutex::new(None) }
    }

    /// Hand out the command handle for the active connection, spawning the
    /// socket task first if none is running.
    ///
    /// Never fails: connection errors are handled inside the socket task's
    /// reconnect loop, and the worst case is a display that stays on the
    /// connecting screen.
    pub async fn connect(&self) -> Commands {
        let mut active = self.active.lock().await;
        if let Some(existing) = active.as_ref() {
            if !existing.task.is_finished() {
                return existing.commands.clone();
            }
        }

        let (commands, queue) = Commands::channel();
        let task = tokio::spawn(socket_loop(Arc::clone(&self.stores), self.url.clone(), queue));
        *active = Some(Active { task, commands: commands.clone() });
        commands
    }

    /// Abort the socket task and mark the session disconnected. Safe to
    /// call when no connection exists.
    pub async fn disconnect(&self) {
        let mut active = self.active.lock().await;
        if let Some(existing) = active.take() {
            existing.task.abort();
        }
        drop(active);

        let mut session = self.stores.session.write().await;
        if session.connected {
            session.set_connected(false);
            drop(session);
            self.stores.mark_changed();
        }
    }

    /// Transport flag as last reported by the socket task.
    pub async fn is_connected(&self) -> bool {
        self.stores.session.read().await.connected
    }
}

/// Dial, run, and redial forever. Owns the outbound queue across
/// reconnects so commands enqueued while offline go out on the next
/// established connection.
async fn socket_loop(stores: Arc<Stores>, url: String, mut queue: mpsc::Receiver<ClientEvent>) {
    let mut backoff = INITIAL_BACKOFF;

    loop {
        match run_connection(&stores, &url, &mut queue).await {
            Ok(()) => {
                tracing::info!("server connection closed");
                backoff = INITIAL_BACKOFF;
            }
            Err(error) => {
                tracing::warn!(error = %error, "server connection failed");
            }
        }

        {
            let mut session = stores.session.write().await;
            if session.connected {
                session.set_connected(false);
                drop(session);
                stores.mark_changed();
            }
        }

        tokio::time::sleep(backoff).await;
        backoff = (backoff * 2).min(MAX_BACKOFF);
    }
}

/// One connection's lifetime: forward queued commands out, route inbound
/// events, end when either side of the transport closes.
async fn run_connection(
    stores: &Stores,
    url: &str,
    queue: &mut mpsc::Receiver<ClientEvent>,
) -> Result<(), SyncError> {
    let (stream, _) = connect_async(url)
        .await
        .map_err(|error| SyncError::Connect(Box::new(error)))?;
    let (mut sink, mut source) = stream.split();

    {
        stores.session.write().await.set_connected(true);
        stores.mark_changed();
    }
    tracing::info!(url, "server connection established");

    let send_task = async {
        while let Some(event) = queue.recv().await {
            let json = events::encode_client_event(&event);
            if sink.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(message) = source.next().await {
            match message {
                Ok(Message::Text(text)) => match events::decode_server_event(&text) {
                    Ok(inbound) => router::apply(stores, inbound).await,
                    Err(error) => {
                        tracing::warn!(error = %error, "discarding undecodable server event");
                    }
                },
                Ok(_) => {}
                Err(error) => {
                    tracing::warn!(error = %error, "websocket receive failed");
                    break;
                }
            }
        }
    };

    futures_util::future::select(Box::pin(send_task), Box::pin(recv_task)).await;
    Ok(())
}
