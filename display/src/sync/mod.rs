//! Server synchronization: the persistent socket, outbound commands, and
//! inbound event routing.
//!
//! DESIGN
//! ======
//! One socket task per process owns the connection for its whole lifetime,
//! reconnecting with capped exponential backoff. Inbound events flow through
//! a single dispatch point ([`router::apply`]), the only code allowed to
//! mutate the domain stores. Outbound commands are queued on a bounded
//! channel and drained by the socket task, so emitters never block on the
//! network.

pub mod commands;
pub mod router;
pub mod socket;

pub use commands::Commands;
pub use socket::{Manager, SyncError};
