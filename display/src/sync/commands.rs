#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use events::ClientEvent;
use tokio::sync::mpsc;

pub(crate) const COMMAND_QUEUE_DEPTH: usize = 64;

/// Handle for emitting operator intents on the active connection.
///
/// Every intent is fire and forget: nothing is awaited and no acknowledgment
/// exists at this layer. The server alone decides whether a start request is
/// valid in the current activity; no local state changes on emission.
#[derive(Clone, Debug)]
pub struct Commands {
    outbound: mpsc::Sender<ClientEvent>,
}

impl Commands {
    /// Build a handle plus the queue end the socket task drains.
    pub(crate) fn channel() -> (Self, mpsc::Receiver<ClientEvent>) {
        let (outbound, queue) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        (Self { outbound }, queue)
    }

    /// Announce the display role. Sent once per established connection.
    pub fn register(&self) {
        self.enqueue(ClientEvent::register_entertainer());
    }

    /// Ask the server to push a full state snapshot.
    pub fn request_state(&self) {
        self.enqueue(ClientEvent::RequestState);
    }

    pub fn start_beats(&self) {
        self.enqueue(ClientEvent::RequestStartBeats);
    }

    pub fn start_ar(&self) {
        self.enqueue(ClientEvent::RequestStartAr);
    }

    pub fn start_instruments(&self) {
        self.enqueue(ClientEvent::RequestStartInstruments);
    }

    pub fn start_energizer(&self) {
        self.enqueue(ClientEvent::RequestStartEnergizer);
    }

    /// Send everyone back to the lobby.
    pub fn start_over(&self) {
        self.enqueue(ClientEvent::RequestStartOver);
    }

    fn enqueue(&self, event: ClientEvent) {
        if let Err(error) = self.outbound.try_send(event) {
            tracing::debug!(error = %error, "command dropped, outbound queue full or closed");
        }
    }
}
