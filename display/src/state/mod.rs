//! Client-side view state, one module per activity domain.
//!
//! DESIGN
//! ======
//! Each store holds the normalized server-reported truth for one activity
//! and nothing else. Mutation entry points are plain `&mut self` methods
//! invoked by the event router only; no entry point reads another store, so
//! every store is unit-testable in isolation. [`Stores`] bundles them behind
//! async locks and carries the change-notification channels consumers
//! subscribe to.

pub mod ar;
pub mod beats;
pub mod energizer;
pub mod instruments;
pub mod lobby;
pub mod session;

pub use ar::ArState;
pub use beats::BeatsState;
pub use energizer::EnergizerState;
pub use instruments::InstrumentsState;
pub use lobby::{LobbyState, Viewport};
pub use session::SessionState;

use events::Activity;
use tokio::sync::{RwLock, broadcast, watch};

const CUE_CHANNEL_CAPACITY: usize = 16;

/// Which domain store an activity's view state lives in.
///
/// `start` and `lobby` are two faces of the same pre-game screenful and
/// share the lobby store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Lobby,
    Beats,
    Ar,
    Instruments,
    Energizer,
}

/// Map an activity to the store that owns its view state.
#[must_use]
pub fn owning_store(activity: Activity) -> StoreKind {
    match activity {
        Activity::Start | Activity::Lobby => StoreKind::Lobby,
        Activity::Beats => StoreKind::Beats,
        Activity::Ar => StoreKind::Ar,
        Activity::Instruments => StoreKind::Instruments,
        Activity::Energizer => StoreKind::Energizer,
    }
}

/// One-shot notification for an external consumer (ambient audio).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    EnergizerAmbientStarted,
    EnergizerAmbientStopped,
}

/// Handle to every domain store plus the change-notification channels.
///
/// Created once at process start and shared by reference; stores live for
/// the process lifetime and are only ever reset, never rebuilt.
pub struct Stores {
    pub session: RwLock<SessionState>,
    pub lobby: RwLock<LobbyState>,
    pub beats: RwLock<BeatsState>,
    pub ar: RwLock<ArState>,
    pub instruments: RwLock<InstrumentsState>,
    pub energizer: RwLock<EnergizerState>,
    revision: watch::Sender<u64>,
    cues: broadcast::Sender<Cue>,
}

impl Stores {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let (revision, _) = watch::channel(0);
        let (cues, _) = broadcast::channel(CUE_CHANNEL_CAPACITY);
        Self {
            session: RwLock::new(SessionState::default()),
            lobby: RwLock::new(LobbyState::new(viewport)),
            beats: RwLock::new(BeatsState::default()),
            ar: RwLock::new(ArState::default()),
            instruments: RwLock::new(InstrumentsState::default()),
            energizer: RwLock::new(EnergizerState::default()),
            revision,
            cues,
        }
    }

    /// Subscribe to the store revision counter. The value moves once per
    /// applied change; consumers re-read whatever stores they render.
    #[must_use]
    pub fn revisions(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Current revision counter value.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Bump the revision counter after a batch of mutations.
    pub fn mark_changed(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Subscribe to external-side-effect cues.
    #[must_use]
    pub fn cues(&self) -> broadcast::Receiver<Cue> {
        self.cues.subscribe()
    }

    /// Publish a cue. With no subscriber listening the cue is dropped.
    pub fn publish_cue(&self, cue: Cue) {
        let _ = self.cues.send(cue);
    }

    /// Reset the domain store owned by `kind` to its documented defaults.
    pub async fn reset_store(&self, kind: StoreKind) {
        match kind {
            StoreKind::Lobby => self.lobby.write().await.reset(),
            StoreKind::Beats => self.beats.write().await.reset(),
            StoreKind::Ar => self.ar.write().await.reset(),
            StoreKind::Instruments => self.instruments.write().await.reset(),
            StoreKind::Energizer => self.energizer.write().await.reset(),
        }
    }
}

impl Default for Stores {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}
