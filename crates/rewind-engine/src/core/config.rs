use anyhow::{ensure, Result};

/// Time machine construction parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeMachineConfig {
    /// Clock value at construction.
    pub initial_time: f64,

    /// Frame counter at construction. Negative values are coerced to 1.
    pub initial_frame: i64,

    /// Clock changes with magnitude `<= time_epsilon` are ignored.
    ///
    /// `0.0` ignores only exact repeats of the current value.
    pub time_epsilon: f64,

    /// Maximum number of pending undo records; `None` is unbounded.
    pub rewind_capacity: Option<usize>,
}

impl TimeMachineConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.initial_time.is_finite(),
            "initial_time must be finite, got {}",
            self.initial_time
        );
        ensure!(
            self.time_epsilon.is_finite() && self.time_epsilon >= 0.0,
            "time_epsilon must be a finite non-negative number, got {}",
            self.time_epsilon
        );
        ensure!(
            self.rewind_capacity != Some(0),
            "rewind_capacity must be at least 1"
        );
        Ok(())
    }
}

impl Default for TimeMachineConfig {
    fn default() -> Self {
        Self {
            initial_time: 0.0,
            initial_frame: 0,
            time_epsilon: 0.0,
            rewind_capacity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        TimeMachineConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_negative_epsilon() {
        let cfg = TimeMachineConfig { time_epsilon: -0.1, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_nan_epsilon() {
        let cfg = TimeMachineConfig { time_epsilon: f64::NAN, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_infinite_initial_time() {
        let cfg = TimeMachineConfig { initial_time: f64::INFINITY, ..Default::default() };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("initial_time"));
    }

    #[test]
    fn rejects_zero_capacity() {
        let cfg = TimeMachineConfig { rewind_capacity: Some(0), ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
