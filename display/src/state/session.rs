#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;

use events::{Activity, GroupDefinitions, Player, StateSnapshot};

/// Global session state: current activity, transport flag, roster, groups.
///
/// `current_activity` is server-driven only; the client never advances it on
/// its own, not even optimistically after sending a start command.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub current_activity: Activity,
    pub connected: bool,
    pub players: HashMap<String, Player>,
    pub groups: Option<GroupDefinitions>,
}

impl SessionState {
    /// Insert or replace a player by id.
    pub fn upsert_player(&mut self, player: Player) {
        self.players.insert(player.id.clone(), player);
    }

    /// Remove a player by id. Unknown ids are a no-op.
    pub fn remove_player(&mut self, player_id: &str) {
        self.players.remove(player_id);
    }

    pub fn set_activity(&mut self, activity: Activity) {
        self.current_activity = activity;
    }

    /// Replace the group layout wholesale. Groups are never merged.
    pub fn replace_groups(&mut self, groups: GroupDefinitions) {
        self.groups = Some(groups);
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Apply a full snapshot: activity plus wholesale roster and groups.
    pub fn apply_snapshot(&mut self, snapshot: StateSnapshot) {
        self.current_activity = snapshot.activity;
        self.players = snapshot
            .players
            .into_iter()
            .map(|player| (player.id.clone(), player))
            .collect();
        self.groups = snapshot.groups;
    }

    /// Restore defaults. The transport flag reflects the socket, not server
    /// truth, and survives a reset.
    pub fn reset(&mut self) {
        let connected = self.connected;
        *self = Self::default();
        self.connected = connected;
    }
}
