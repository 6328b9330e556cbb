#[cfg(test)]
#[path = "ar_test.rs"]
mod ar_test;

use events::ArPhase;

/// Boss hit-point ceiling assumed before the server reports real values.
pub const BOSS_MAX_HEALTH: u32 = 30;

/// AR item-hunt activity state.
///
/// Health is server-authoritative; no `health <= max` clamp happens here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArState {
    pub phase: ArPhase,
    pub total_taps: u32,
    pub taps_needed: u32,
    pub boss_health: u32,
    pub boss_max_health: u32,
    pub participating_players: u32,
    /// Change trigger for transient pickup effects, no persisted meaning.
    pub last_collected_item_id: Option<String>,
}

impl ArState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: ArPhase::default(),
            total_taps: 0,
            taps_needed: 0,
            boss_health: 0,
            boss_max_health: BOSS_MAX_HEALTH,
            participating_players: 0,
            last_collected_item_id: None,
        }
    }

    pub fn set_phase(&mut self, phase: ArPhase) {
        self.phase = phase;
    }

    pub fn set_boss_health(&mut self, health: u32, max_health: u32) {
        self.boss_health = health;
        self.boss_max_health = max_health;
    }

    /// Record a pickup. The running tap total rides along on every pickup
    /// event, so it is applied here rather than tracked per item.
    pub fn set_item_collected(&mut self, item_id: &str, tap_count: u32, taps_needed: u32) {
        self.last_collected_item_id = Some(item_id.to_owned());
        self.total_taps = tap_count;
        self.taps_needed = taps_needed;
    }

    pub fn set_results(&mut self, total_taps: u32, participating_players: u32) {
        self.total_taps = total_taps;
        self.participating_players = participating_players;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ArState {
    fn default() -> Self {
        Self::new()
    }
}
