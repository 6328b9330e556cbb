#[cfg(test)]
#[path = "beats_test.rs"]
mod beats_test;

use events::{BeatPhase, GroupAccuracy, Mvp};

/// Default tempo before the server announces one.
pub const DEFAULT_BPM: f64 = 90.0;

/// Beat-matching activity state.
#[derive(Clone, Debug)]
pub struct BeatsState {
    pub phase: BeatPhase,
    /// 1-based round counter; zero until the first phase announcement.
    pub round: u32,
    pub bpm: f64,
    pub group_accuracies: Vec<GroupAccuracy>,
    pub winner: Option<String>,
    pub mvp: Option<Mvp>,
}

impl BeatsState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: BeatPhase::default(),
            round: 0,
            bpm: DEFAULT_BPM,
            group_accuracies: Vec::new(),
            winner: None,
            mvp: None,
        }
    }

    /// Apply a phase announcement. Round and tempo always travel with the
    /// phase on the wire.
    pub fn set_phase(&mut self, phase: BeatPhase, round: u32, bpm: f64) {
        self.phase = phase;
        self.round = round;
        self.bpm = bpm;
    }

    /// Mid-round standings refresh. Always a wholesale replacement, never a
    /// per-group merge.
    pub fn replace_accuracies(&mut self, group_accuracies: Vec<GroupAccuracy>) {
        self.group_accuracies = group_accuracies;
    }

    /// Apply the final standings. Results arrive as their own event rather
    /// than a phase change, so the phase moves here too.
    pub fn set_results(
        &mut self,
        winner: String,
        group_accuracies: Vec<GroupAccuracy>,
        mvp: Mvp,
    ) {
        self.phase = BeatPhase::Results;
        self.group_accuracies = group_accuracies;
        self.winner = Some(winner);
        self.mvp = Some(mvp);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for BeatsState {
    fn default() -> Self {
        Self::new()
    }
}
