#[cfg(test)]
#[path = "instruments_test.rs"]
mod instruments_test;

use events::{InstrumentInfo, InstrumentsPhase};

/// Instrument-jam activity state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstrumentsState {
    pub phase: InstrumentsPhase,
    pub demo_instrument: Option<InstrumentInfo>,
    /// Crowd energy in `[0, 1]`, clamped on write.
    pub energy_level: f64,
    pub spotlight_instrument: Option<String>,
}

impl InstrumentsState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_phase(&mut self, phase: InstrumentsPhase) {
        self.phase = phase;
    }

    pub fn set_demo_instrument(&mut self, instrument: InstrumentInfo) {
        self.demo_instrument = Some(instrument);
    }

    /// The server occasionally reports overshoot while ramping; the gauge
    /// only renders `[0, 1]`, so clamp here.
    pub fn set_energy_level(&mut self, level: f64) {
        self.energy_level = level.clamp(0.0, 1.0);
    }

    pub fn set_spotlight(&mut self, active: bool, instrument: Option<String>) {
        self.spotlight_instrument = if active { instrument } else { None };
    }

    /// Instruments the current phase puts on screen: the demoed instrument
    /// once a descriptor has arrived, the full catalog before that and
    /// during the finale wall.
    #[must_use]
    pub fn visible_instruments(&self) -> Vec<InstrumentInfo> {
        match (self.phase, &self.demo_instrument) {
            (InstrumentsPhase::Demo, Some(instrument)) => vec![instrument.clone()],
            _ => fallback_catalog(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Instruments shown while no demo descriptor has arrived yet.
#[must_use]
pub fn fallback_catalog() -> Vec<InstrumentInfo> {
    vec![
        InstrumentInfo {
            id: "drums".to_owned(),
            name: "Drums".to_owned(),
            hint: "Big arm hits".to_owned(),
            tool: "Drumsticks".to_owned(),
            color: "#ef4444".to_owned(),
        },
        InstrumentInfo {
            id: "maracas".to_owned(),
            name: "Maracas".to_owned(),
            hint: "Shake".to_owned(),
            tool: "Maracas".to_owned(),
            color: "#f59e0b".to_owned(),
        },
        InstrumentInfo {
            id: "guitar".to_owned(),
            name: "Guitar".to_owned(),
            hint: "Strum action".to_owned(),
            tool: "Guitar pick".to_owned(),
            color: "#22d3ee".to_owned(),
        },
        InstrumentInfo {
            id: "violin".to_owned(),
            name: "Violin".to_owned(),
            hint: "Bow motion".to_owned(),
            tool: "Violin bow".to_owned(),
            color: "#a855f7".to_owned(),
        },
    ]
}
