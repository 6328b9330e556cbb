#[cfg(test)]
#[path = "energizer_test.rs"]
mod energizer_test;

use events::{EnergizerPhase, PlayerEnergy, SequencePattern, SequenceResult, Slide};

/// Phases backed by the looping ambient track.
#[must_use]
pub fn carries_ambient_loop(phase: EnergizerPhase) -> bool {
    matches!(phase, EnergizerPhase::Movement | EnergizerPhase::SendEnergy)
}

/// Energizer activity state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnergizerState {
    pub phase: EnergizerPhase,
    pub slide: Option<Slide>,
    pub spotlight_active: bool,
    pub players: Vec<PlayerEnergy>,
    pub pattern: Option<SequencePattern>,
    pub pattern_visible: bool,
    pub sequence_result: Option<SequenceResult>,
}

impl EnergizerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a phase announcement. A stale sequence verdict must not leak
    /// into the next round, so it is cleared on every transition except the
    /// one that presents it.
    pub fn set_phase(&mut self, phase: EnergizerPhase) {
        if phase != EnergizerPhase::Results {
            self.sequence_result = None;
        }
        self.phase = phase;
    }

    pub fn set_slide(&mut self, slide: Slide) {
        self.slide = Some(slide);
    }

    pub fn set_spotlight(&mut self, active: bool) {
        self.spotlight_active = active;
    }

    pub fn replace_players(&mut self, players: Vec<PlayerEnergy>) {
        self.players = players;
    }

    pub fn show_pattern(&mut self, pattern: SequencePattern) {
        self.pattern = Some(pattern);
        self.pattern_visible = true;
    }

    /// Hide keeps the pattern itself so the grid can fade out in place.
    pub fn hide_pattern(&mut self) {
        self.pattern_visible = false;
    }

    pub fn set_sequence_result(&mut self, result: SequenceResult) {
        self.sequence_result = Some(result);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
