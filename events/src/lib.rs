//! Shared event model and JSON codec for the party platform wire protocol.
//!
//! This crate owns the wire representation used by the server and every
//! display client. The transport carries JSON text frames over a single
//! WebSocket: client → server frames are [`ClientEvent`]s, server → client
//! frames are [`ServerEvent`]s, both discriminated solely by their `type`
//! tag.

pub mod data;

pub use data::*;

use serde_json::Value;

/// Every inbound type tag this protocol version understands.
///
/// Used to tell a malformed payload for a known event apart from an event
/// from a newer protocol version.
pub const SERVER_EVENT_TAGS: &[&str] = &[
    "player_joined",
    "player_left",
    "activity_started",
    "groups_updated",
    "reaction",
    "beat_phase_change",
    "beat_team_sync_update",
    "beat_results",
    "ar_phase_change",
    "ar_boss_health",
    "ar_item_collected",
    "ar_results",
    "instruments_phase",
    "instruments_demo_step",
    "instruments_energy",
    "instruments_spotlight",
    "energizer_phase_change",
    "energizer_instruction",
    "energizer_spotlight",
    "energizer_entertainer_update",
    "energizer_sequence_show",
    "energizer_sequence_hide",
    "energizer_sequence_result",
    "state_update",
];

/// Error returned by [`decode_server_event`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The frame is not valid JSON at all.
    #[error("invalid JSON frame: {0}")]
    Json(#[source] serde_json::Error),
    /// Valid JSON, but without a string `type` discriminant.
    #[error("frame has no `type` tag")]
    MissingTag,
    /// A known tag whose payload fields failed to decode.
    #[error("malformed `{tag}` payload: {source}")]
    Payload {
        tag: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of decoding one inbound frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Inbound {
    /// A fully decoded event from the known protocol.
    Event(ServerEvent),
    /// A well-formed frame carrying a tag this protocol version does not
    /// know. Dropped by receivers; kept explicit so the drop is a decision,
    /// not an accident.
    Unrecognized { tag: String },
}

/// Decode one inbound text frame.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for frames that are not JSON,
/// [`CodecError::MissingTag`] for JSON without a string `type` field, and
/// [`CodecError::Payload`] when a known tag carries fields that do not
/// decode. Unknown tags are `Ok(Inbound::Unrecognized)`, never an error.
pub fn decode_server_event(text: &str) -> Result<Inbound, CodecError> {
    match serde_json::from_str::<ServerEvent>(text) {
        Ok(event) => Ok(Inbound::Event(event)),
        Err(source) => {
            let value = serde_json::from_str::<Value>(text).map_err(CodecError::Json)?;
            let Some(tag) = value.get("type").and_then(Value::as_str) else {
                return Err(CodecError::MissingTag);
            };
            if SERVER_EVENT_TAGS.contains(&tag) {
                Err(CodecError::Payload { tag: tag.to_owned(), source })
            } else {
                Ok(Inbound::Unrecognized { tag: tag.to_owned() })
            }
        }
    }
}

/// Encode a client command into its wire text frame.
#[must_use]
pub fn encode_client_event(event: &ClientEvent) -> String {
    // Serializing cannot fail here: every payload is plain strings and units.
    serde_json::to_string(event).unwrap_or_default()
}

/// Encode a server event into its wire text frame.
#[must_use]
pub fn encode_server_event(event: &ServerEvent) -> String {
    // Serializing cannot fail here: payloads are string-keyed maps and scalars.
    serde_json::to_string(event).unwrap_or_default()
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
