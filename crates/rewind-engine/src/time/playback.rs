use crate::core::{TimeJump, TimeMachine};

/// Playback controller driving a `TimeMachine` from frame deltas.
///
/// The per-frame delta is clamped to `[0, dt_max]` before the rate is
/// applied, so a debugger pause or a stalled frame cannot produce one huge
/// jump (and, in reverse, one huge rewind).
#[derive(Debug, Clone)]
pub struct Playback {
    rate: f64,
    dt_max: f64,
}

impl Playback {
    /// Real-time forward playback with a 0.25 s delta clamp.
    pub fn new() -> Self {
        Self {
            rate: 1.0,
            dt_max: 0.25,
        }
    }

    /// Creates a controller with a custom delta clamp (seconds).
    pub fn with_clamp(dt_max: f64) -> Self {
        debug_assert!(dt_max > 0.0);
        Self { dt_max, ..Self::new() }
    }

    /// Signed playback rate; negative rewinds.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Non-finite rates are ignored.
    pub fn set_rate(&mut self, rate: f64) {
        if rate.is_finite() {
            self.rate = rate;
        } else {
            log::warn!("ignoring non-finite playback rate {rate}");
        }
    }

    pub fn play(&mut self) {
        self.rate = 1.0;
    }

    pub fn pause(&mut self) {
        self.rate = 0.0;
    }

    pub fn reverse(&mut self) {
        self.rate = -1.0;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.rate == 0.0
    }

    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.rate < 0.0
    }

    /// Moves the machine's clock by `dt * rate`, with `dt` clamped.
    pub fn step(&self, machine: &mut TimeMachine, dt: f64) -> TimeJump {
        let dt = if dt.is_finite() { dt.clamp(0.0, self.dt_max) } else { 0.0 };
        machine.advance(dt * self.rate)
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}
