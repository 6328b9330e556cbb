//! # display
//!
//! Native entertainer display client for the partywall platform.
//!
//! The big screen at a party renders whatever activity the coordinating
//! server says is running. This crate is the synchronization layer behind
//! that screen: a single persistent WebSocket, a central router mapping the
//! inbound event stream onto per-activity state stores, and a small set of
//! operator commands flowing back over the same socket. Rendering is a
//! consumer of [`state::Stores`] and the [`screen`] selector; the bundled
//! binary is that consumer reduced to structured log output.

pub mod config;
pub mod screen;
pub mod state;
pub mod sync;
