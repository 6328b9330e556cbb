//! Shared data model for the party platform wire protocol.
//!
//! These types are the contract between the coordinating server and every
//! display client. Payload field names are camelCase on the wire; type tags
//! and enum values are snake_case.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Role string a display client registers under.
pub const ENTERTAINER_ROLE: &str = "entertainer";

/// Named game mode the server currently has players engaged in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// Pre-lobby idle state shown before a session opens.
    #[default]
    Start,
    Lobby,
    Beats,
    Ar,
    Instruments,
    Energizer,
}

impl Activity {
    /// Wire spelling of the activity id.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Lobby => "lobby",
            Self::Beats => "beats",
            Self::Ar => "ar",
            Self::Instruments => "instruments",
            Self::Energizer => "energizer",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A connected participant as reported by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub nickname: String,
    /// Group the server assigned this player to, if grouping has happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Definition of one player group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub name: String,
    /// Player ids belonging to the group.
    #[serde(default)]
    pub members: Vec<String>,
}

/// Full group layout, keyed by group id. Always replaced wholesale.
pub type GroupDefinitions = HashMap<String, GroupInfo>;

/// Phase of the tap-rhythm game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeatPhase {
    #[default]
    Instructions,
    BeatOn,
    BeatOff,
    Results,
}

/// Per-group accuracy snapshot for one rhythm round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAccuracy {
    pub group_id: String,
    /// Fraction of on-beat taps, in `[0, 1]`.
    pub accuracy: f64,
    pub tap_count: u32,
}

/// Best-performing player of a rhythm game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mvp {
    pub player_id: String,
    pub nickname: String,
    pub accuracy: f64,
}

/// Phase of the AR item hunt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArPhase {
    Instructions,
    #[default]
    Anchoring,
    Hunting,
    Boss,
    Results,
}

/// Phase of the instrument jam.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentsPhase {
    #[default]
    Demo,
    Finale,
}

/// Descriptor for one playable instrument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentInfo {
    pub id: String,
    pub name: String,
    /// Short movement hint shown under the name.
    pub hint: String,
    /// Prop the players mime with.
    pub tool: String,
    /// Display color, `#rrggbb`.
    pub color: String,
}

/// Phase of the energizer activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergizerPhase {
    #[default]
    Instructions1,
    Movement,
    SendEnergy,
    Instructions2,
    SequenceShow,
    SequenceInput,
    Results,
}

/// One instruction slide of the energizer intro.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub text: String,
    /// 1-based position within the deck.
    pub index: u32,
    pub total: u32,
}

/// Per-player energy charge shown on the big screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerEnergy {
    pub id: String,
    /// Charge level in `[0, 1]`.
    pub charge: f64,
}

/// One lit cell of a sequence pattern grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCell {
    /// Row-major cell index.
    pub index: u32,
    pub color: String,
}

/// Sparse grid pattern the players must memorize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencePattern {
    pub rows: u32,
    pub cols: u32,
    #[serde(default)]
    pub cells: Vec<PatternCell>,
}

/// Outcome of a sequence-input round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceResult {
    pub success: bool,
    pub correct_count: u32,
    pub total_participants: u32,
}

/// Full session snapshot pushed by the server on request or reconnect.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub activity: Activity,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<GroupDefinitions>,
}

/// Command sent by a client, discriminated by its `type` tag.
///
/// Commands are fire-and-forget: the server never acknowledges them directly,
/// it answers with subsequent [`ServerEvent`]s.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Announce this connection's role to the server.
    Register { role: String },
    /// Ask for a full [`StateSnapshot`].
    RequestState,
    RequestStartBeats,
    RequestStartAr,
    RequestStartInstruments,
    RequestStartEnergizer,
    RequestStartOver,
}

impl ClientEvent {
    /// `register` command carrying the entertainer role.
    #[must_use]
    pub fn register_entertainer() -> Self {
        Self::Register { role: ENTERTAINER_ROLE.to_owned() }
    }
}

/// Event pushed by the server, discriminated by its `type` tag.
///
/// This union is closed per protocol version: tags a client does not know
/// decode to [`crate::Inbound::Unrecognized`] rather than failing, so older
/// displays keep working against newer servers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    PlayerJoined {
        player: Player,
    },
    PlayerLeft {
        player_id: String,
    },
    ActivityStarted {
        activity: Activity,
    },
    GroupsUpdated {
        groups: GroupDefinitions,
    },
    Reaction {
        emoji: String,
    },
    BeatPhaseChange {
        phase: BeatPhase,
        round: u32,
        bpm: f64,
    },
    BeatTeamSyncUpdate {
        group_accuracies: Vec<GroupAccuracy>,
    },
    BeatResults {
        winner: String,
        group_accuracies: Vec<GroupAccuracy>,
        mvp: Mvp,
    },
    ArPhaseChange {
        phase: ArPhase,
    },
    ArBossHealth {
        health: u32,
        max_health: u32,
    },
    ArItemCollected {
        item_id: String,
        tap_count: u32,
        taps_needed: u32,
    },
    ArResults {
        total_taps: u32,
        participating_players: u32,
    },
    InstrumentsPhase {
        phase: InstrumentsPhase,
    },
    InstrumentsDemoStep {
        instrument: InstrumentInfo,
    },
    InstrumentsEnergy {
        level: f64,
    },
    InstrumentsSpotlight {
        active: bool,
        #[serde(default)]
        instrument: Option<String>,
    },
    EnergizerPhaseChange {
        phase: EnergizerPhase,
    },
    EnergizerInstruction {
        text: String,
        index: u32,
        total: u32,
    },
    EnergizerSpotlight {
        active: bool,
    },
    EnergizerEntertainerUpdate {
        players: Vec<PlayerEnergy>,
    },
    EnergizerSequenceShow {
        pattern: SequencePattern,
    },
    EnergizerSequenceHide,
    EnergizerSequenceResult {
        success: bool,
        correct_count: u32,
        total_participants: u32,
    },
    StateUpdate {
        state: StateSnapshot,
    },
}

#[cfg(test)]
#[path = "data_test.rs"]
mod data_test;
