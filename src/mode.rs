use log::debug;

use crate::parameters::{ParameterId, ParameterModel};

/// Jerk limit used as "no jerk limit" in trapezoidal mode.
pub const UNCONSTRAINED_JERK: f64 = 100_000_000_000.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Bounded jerk: acceleration changes continuously.
    #[default]
    SCurve,
    /// Effectively unbounded jerk: piecewise-constant acceleration.
    Trapezoidal,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::SCurve => Mode::Trapezoidal,
            Mode::Trapezoidal => Mode::SCurve,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::SCurve => "S-Curve",
            Mode::Trapezoidal => "Trapezoidal",
        }
    }
}

/// Jerk-limit settings in force before switching to trapezoidal mode.
#[derive(Clone, Copy, Debug, PartialEq)]
struct JerkMemory {
    max: f64,
    value: f64,
    default: f64,
}

/// Switches the jerk-limit regime. One level of memory: the S-curve settings
/// are remembered on the way into trapezoidal mode and restored on the way out.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeController {
    mode: Mode,
    unconstrained_jerk: f64,
    memory: Option<JerkMemory>,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(UNCONSTRAINED_JERK)
    }
}

impl ModeController {
    pub fn new(unconstrained_jerk: f64) -> Self {
        Self {
            mode: Mode::SCurve,
            unconstrained_jerk,
            memory: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Flips the mode and rewrites the jerk-limit parameter accordingly.
    pub fn toggle(&mut self, params: &mut ParameterModel) -> Mode {
        let jerk = params.get_mut(ParameterId::JerkLimit);
        match self.mode {
            Mode::SCurve => {
                self.memory = Some(JerkMemory {
                    max: jerk.max(),
                    value: jerk.value(),
                    default: jerk.default_value(),
                });
                jerk.reconfigure(self.unconstrained_jerk, self.unconstrained_jerk);
                jerk.force(self.unconstrained_jerk);
                jerk.set_enabled(false);
            }
            Mode::Trapezoidal => {
                if let Some(memory) = self.memory.take() {
                    jerk.reconfigure(memory.max, memory.default);
                    jerk.force(memory.value);
                }
                jerk.set_enabled(true);
            }
        }
        self.mode = self.mode.toggled();
        debug!(
            "mode switched to {} (jerk limit {})",
            self.mode.label(),
            params.value(ParameterId::JerkLimit)
        );
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trapezoidal_mode_unconstrains_and_locks_jerk() {
        let mut params = ParameterModel::default();
        let mut mode = ModeController::default();
        assert_eq!(mode.toggle(&mut params), Mode::Trapezoidal);

        let jerk = params.get(ParameterId::JerkLimit);
        assert_eq!(jerk.value(), UNCONSTRAINED_JERK);
        assert_eq!(jerk.max(), UNCONSTRAINED_JERK);
        assert_eq!(jerk.default_value(), UNCONSTRAINED_JERK);
        assert_eq!(jerk.coarse(), 100_000_000);
        assert!(!jerk.is_enabled());
        assert!(!params.set_coarse(ParameterId::JerkLimit, 5));
    }

    #[test]
    fn toggling_twice_restores_exact_jerk_settings() {
        let mut params = ParameterModel::default();
        params.set_precise(ParameterId::JerkLimit, 1_234_567_891.0);
        let before = params.get(ParameterId::JerkLimit).clone();

        let mut mode = ModeController::default();
        mode.toggle(&mut params);
        mode.toggle(&mut params);

        assert_eq!(mode.mode(), Mode::SCurve);
        assert_eq!(params.get(ParameterId::JerkLimit), &before);
    }

    #[test]
    fn unconstrained_jerk_below_minimum_collapses_onto_it() {
        let mut params = ParameterModel::default();
        let before = params.get(ParameterId::JerkLimit).clone();
        let mut mode = ModeController::new(0.5);

        mode.toggle(&mut params);
        let jerk = params.get(ParameterId::JerkLimit);
        assert_eq!(jerk.value(), 1.0);
        assert_eq!(jerk.max(), 1.0);
        assert_eq!(jerk.default_value(), 1.0);

        mode.toggle(&mut params);
        assert_eq!(params.get(ParameterId::JerkLimit), &before);
    }

    #[test]
    fn reset_in_trapezoidal_mode_keeps_the_unconstrained_jerk() {
        let mut params = ParameterModel::default();
        let mut mode = ModeController::default();
        mode.toggle(&mut params);
        params.reset_all();
        assert_eq!(params.value(ParameterId::JerkLimit), UNCONSTRAINED_JERK);

        mode.toggle(&mut params);
        params.reset_all();
        assert_eq!(params.value(ParameterId::JerkLimit), 2_500_000_000.0);
    }
}
