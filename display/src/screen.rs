//! Activity-to-screen selection.

#[cfg(test)]
#[path = "screen_test.rs"]
mod screen_test;

use std::fmt;

use events::Activity;

use crate::state::SessionState;

/// What the big screen should be showing right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Connecting placeholder: transport down or no session configured.
    Waiting,
    Start,
    Lobby,
    Beats,
    Ar,
    Instruments,
    Energizer,
}

impl Screen {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Start => "start",
            Self::Lobby => "lobby",
            Self::Beats => "beats",
            Self::Ar => "ar",
            Self::Instruments => "instruments",
            Self::Energizer => "energizer",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the screen for the current session state. Total and pure: every
/// input maps to a screen, nothing panics, no hidden state.
///
/// Without a configured session, or while the transport is down, the answer
/// is always the waiting placeholder no matter what activity the server
/// last announced.
#[must_use]
pub fn select(session: &SessionState, has_session: bool) -> Screen {
    if !has_session || !session.connected {
        return Screen::Waiting;
    }

    match session.current_activity {
        Activity::Start => Screen::Start,
        Activity::Lobby => Screen::Lobby,
        Activity::Beats => Screen::Beats,
        Activity::Ar => Screen::Ar,
        Activity::Instruments => Screen::Instruments,
        Activity::Energizer => Screen::Energizer,
    }
}
