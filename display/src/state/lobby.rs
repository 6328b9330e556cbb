#[cfg(test)]
#[path = "lobby_test.rs"]
mod lobby_test;

use std::collections::VecDeque;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use rand::Rng;

/// Most reactions kept on screen at once; older ones are dropped first.
pub const EMOJI_CAPACITY: usize = 128;

/// Countdown value the lobby restarts from.
pub const COUNTDOWN_SECONDS: i64 = 60;

const EMOJI_BASELINE_OFFSET: f64 = 50.0;

/// Logical stage dimensions used for reaction spawn geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1920.0, height: 1080.0 }
    }
}

/// One player reaction floating up the screen.
#[derive(Clone, Debug)]
pub struct FloatingEmoji {
    /// Unique per buffer, derived from wall-clock millis plus jitter.
    pub id: u64,
    pub emoji: String,
    pub x: f64,
    pub y: f64,
    /// Horizontal travel over the animation, in (-40, 40).
    pub drift: f64,
    /// Render scale, in [0.8, 1.4).
    pub scale: f64,
    /// Seconds on screen, in [6.8, 8.8).
    pub duration: f64,
    /// Wobble amplitude, in (-10, 10).
    pub jitter: f64,
    pub spawned_at: Instant,
}

/// Lobby view state: the countdown and the floating reaction buffer.
///
/// The buffer is bounded and time-expired here rather than trusting the
/// rendering layer to forget entries.
#[derive(Clone, Debug)]
pub struct LobbyState {
    pub seconds_remaining: i64,
    pub emojis: VecDeque<FloatingEmoji>,
    viewport: Viewport,
}

impl LobbyState {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self { seconds_remaining: COUNTDOWN_SECONDS, emojis: VecDeque::new(), viewport }
    }

    /// Tick the local countdown. May go negative; the next activity start
    /// resets it.
    pub fn decrement_seconds(&mut self) {
        self.seconds_remaining -= 1;
    }

    /// Append a reaction with randomized spawn geometry, expiring and
    /// evicting as needed to keep the buffer bounded.
    pub fn add_reaction(&mut self, emoji: &str, now: Instant) {
        self.prune_expired(now);

        let mut rng = rand::rng();
        let mut id = now_ms() * 1000 + rng.random_range(0..1000);
        while self.emojis.iter().any(|entry| entry.id == id) {
            id += 1;
        }

        self.emojis.push_back(FloatingEmoji {
            id,
            emoji: emoji.to_owned(),
            x: rng.random::<f64>() * self.viewport.width,
            y: self.viewport.height - EMOJI_BASELINE_OFFSET,
            drift: (rng.random::<f64>() - 0.5) * 80.0,
            scale: 0.8 + rng.random::<f64>() * 0.6,
            duration: 6.8 + rng.random::<f64>() * 2.0,
            jitter: (rng.random::<f64>() - 0.5) * 20.0,
            spawned_at: now,
        });

        while self.emojis.len() > EMOJI_CAPACITY {
            self.emojis.pop_front();
        }
    }

    /// Drop reactions whose on-screen duration has elapsed. Returns how many
    /// were removed.
    pub fn prune_expired(&mut self, now: Instant) -> usize {
        let before = self.emojis.len();
        self.emojis
            .retain(|entry| now.duration_since(entry.spawned_at).as_secs_f64() < entry.duration);
        before - self.emojis.len()
    }

    /// Restore defaults, keeping the configured viewport.
    pub fn reset(&mut self) {
        self.seconds_remaining = COUNTDOWN_SECONDS;
        self.emojis.clear();
    }
}

impl Default for LobbyState {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

fn now_ms() -> u64 {
    let Ok(duration) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    u64::try_from(duration.as_millis()).unwrap_or(0)
}
