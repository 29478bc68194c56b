//! The seven bounded parameters of a motion profile and their linked
//! precise/coarse representations.
//!
//! Every edit goes through a single write path per parameter that updates both
//! representations at once, so a coarse edit never bounces back as a precise
//! edit (and vice versa).

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::UnknownParameter;
use crate::evaluator::TrajectoryRequest;

/// Scale between the jerk limit and its coarse control.
pub const JERK_SCALE: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterId {
    VelocityLimit,
    AccelerationLimit,
    JerkLimit,
    StartPosition,
    EndPosition,
    StartVelocity,
    EndVelocity,
}

impl ParameterId {
    pub const ALL: [ParameterId; 7] = [
        ParameterId::VelocityLimit,
        ParameterId::AccelerationLimit,
        ParameterId::JerkLimit,
        ParameterId::StartPosition,
        ParameterId::EndPosition,
        ParameterId::StartVelocity,
        ParameterId::EndVelocity,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Key used in config files and operator commands.
    pub fn key(self) -> &'static str {
        match self {
            ParameterId::VelocityLimit => "velocity_limit",
            ParameterId::AccelerationLimit => "acceleration_limit",
            ParameterId::JerkLimit => "jerk_limit",
            ParameterId::StartPosition => "start_position",
            ParameterId::EndPosition => "end_position",
            ParameterId::StartVelocity => "start_velocity",
            ParameterId::EndVelocity => "end_velocity",
        }
    }

    /// Short alias accepted on the command line.
    pub fn alias(self) -> &'static str {
        match self {
            ParameterId::VelocityLimit => "vmax",
            ParameterId::AccelerationLimit => "amax",
            ParameterId::JerkLimit => "jmax",
            ParameterId::StartPosition => "q0",
            ParameterId::EndPosition => "q1",
            ParameterId::StartVelocity => "v0",
            ParameterId::EndVelocity => "v1",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParameterId::VelocityLimit => "Velocity Limit",
            ParameterId::AccelerationLimit => "Acceleration Limit",
            ParameterId::JerkLimit => "Jerk Limit",
            ParameterId::StartPosition => "Initial Position",
            ParameterId::EndPosition => "Target Position",
            ParameterId::StartVelocity => "Initial Velocity",
            ParameterId::EndVelocity => "Final Velocity",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ParameterId::VelocityLimit | ParameterId::StartVelocity | ParameterId::EndVelocity => {
                "degrees/sec"
            }
            ParameterId::AccelerationLimit => "degrees/sec²",
            ParameterId::JerkLimit => "degrees/sec³",
            ParameterId::StartPosition | ParameterId::EndPosition => "degrees",
        }
    }

    /// Bounds, default and coarse scale the editor starts with.
    pub fn default_spec(self) -> ParameterSpec {
        match self {
            ParameterId::VelocityLimit => ParameterSpec::new(1.0, 50_000.0, 15_750.0),
            ParameterId::AccelerationLimit => ParameterSpec::new(1.0, 12_000_000.0, 3_675_000.0),
            ParameterId::JerkLimit => {
                ParameterSpec::new(1.0, 10_000_000_000.0, 2_500_000_000.0).with_scale(JERK_SCALE)
            }
            ParameterId::StartPosition => ParameterSpec::new(0.0, 180.0, 0.0),
            ParameterId::EndPosition => ParameterSpec::new(0.0, 180.0, 90.0),
            ParameterId::StartVelocity => ParameterSpec::new(-50_000.0, 50_000.0, 0.0),
            ParameterId::EndVelocity => ParameterSpec::new(-50_000.0, 50_000.0, 0.0),
        }
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ParameterId {
    type Err = UnknownParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('-', "_");
        ParameterId::ALL
            .into_iter()
            .find(|id| id.key() == needle || id.alias() == needle)
            .ok_or_else(|| UnknownParameter(s.to_string()))
    }
}

/// Static description of one parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterSpec {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Precise units per coarse step.
    pub scale: f64,
}

impl ParameterSpec {
    pub fn new(min: f64, max: f64, default: f64) -> Self {
        Self {
            min,
            max,
            default,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// A bounded parameter with a precise value and a linked coarse (integer step) value.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    id: ParameterId,
    spec: ParameterSpec,
    value: f64,
    coarse: i64,
    enabled: bool,
}

impl Parameter {
    pub fn new(id: ParameterId, mut spec: ParameterSpec) -> Self {
        spec.max = spec.max.max(spec.min);
        let mut param = Self {
            id,
            spec,
            value: spec.default,
            coarse: 0,
            enabled: true,
        };
        param.write(spec.default);
        param
    }

    pub fn id(&self) -> ParameterId {
        self.id
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn coarse(&self) -> i64 {
        self.coarse
    }

    pub fn min(&self) -> f64 {
        self.spec.min
    }

    pub fn max(&self) -> f64 {
        self.spec.max
    }

    pub fn default_value(&self) -> f64 {
        self.spec.default
    }

    pub fn scale(&self) -> f64 {
        self.spec.scale
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Integer bounds of the coarse control; both lie inside `[min, max]`
    /// once multiplied by the scale.
    pub fn coarse_range(&self) -> (i64, i64) {
        let lo = (self.spec.min / self.spec.scale).ceil() as i64;
        let hi = (self.spec.max / self.spec.scale).trunc() as i64;
        (lo, hi.max(lo))
    }

    /// Single write path for precise edits: clamps and derives the coarse value.
    fn write(&mut self, value: f64) {
        let value = value.clamp(self.spec.min, self.spec.max);
        self.value = value;
        self.coarse = (value / self.spec.scale).trunc() as i64;
    }

    /// Single write path for coarse edits: clamps the step and derives the precise value.
    fn write_coarse(&mut self, step: i64) {
        let (lo, hi) = self.coarse_range();
        let step = step.clamp(lo, hi);
        self.coarse = step;
        self.value = (step as f64 * self.spec.scale).clamp(self.spec.min, self.spec.max);
    }

    /// Replaces the upper bound and default; the current value is re-clamped.
    /// A bound below the minimum collapses the range onto the minimum.
    pub(crate) fn reconfigure(&mut self, max: f64, default: f64) {
        let max = max.max(self.spec.min);
        self.spec.max = max;
        self.spec.default = default.max(self.spec.min).min(max);
        self.write(self.value);
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub(crate) fn force(&mut self, value: f64) {
        self.write(value);
    }
}

/// The seven parameters of a single-axis profile.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterModel {
    params: [Parameter; 7],
}

impl Default for ParameterModel {
    fn default() -> Self {
        Self::new(|id| id.default_spec())
    }
}

impl ParameterModel {
    pub fn new(spec_for: impl Fn(ParameterId) -> ParameterSpec) -> Self {
        Self {
            params: ParameterId::ALL.map(|id| Parameter::new(id, spec_for(id))),
        }
    }

    pub fn get(&self, id: ParameterId) -> &Parameter {
        &self.params[id.index()]
    }

    pub fn value(&self, id: ParameterId) -> f64 {
        self.get(id).value()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    pub(crate) fn get_mut(&mut self, id: ParameterId) -> &mut Parameter {
        &mut self.params[id.index()]
    }

    /// Sets the precise value (clamped). Returns `false` when the edit was
    /// ignored: non-finite input or a disabled parameter.
    pub fn set_precise(&mut self, id: ParameterId, value: f64) -> bool {
        let param = self.get_mut(id);
        if !param.enabled || !value.is_finite() {
            debug!("ignoring precise edit of {id} to {value}");
            return false;
        }
        param.write(value);
        debug!("{id} = {} (coarse {})", param.value, param.coarse);
        true
    }

    /// Sets the coarse value (clamped to the coarse range); the precise value
    /// becomes `step * scale`.
    pub fn set_coarse(&mut self, id: ParameterId, step: i64) -> bool {
        let param = self.get_mut(id);
        if !param.enabled {
            debug!("ignoring coarse edit of disabled {id}");
            return false;
        }
        param.write_coarse(step);
        debug!("{id} = {} (coarse {})", param.value, param.coarse);
        true
    }

    /// Restores the default, even for a disabled parameter.
    pub fn reset(&mut self, id: ParameterId) {
        let param = self.get_mut(id);
        param.write(param.spec.default);
    }

    pub fn reset_all(&mut self) {
        for param in &mut self.params {
            param.write(param.spec.default);
        }
    }

    /// Builds the evaluator request from the current values.
    pub fn snapshot(&self) -> TrajectoryRequest {
        TrajectoryRequest {
            start_pos: self.value(ParameterId::StartPosition),
            end_pos: self.value(ParameterId::EndPosition),
            start_vel: self.value(ParameterId::StartVelocity),
            end_vel: self.value(ParameterId::EndVelocity),
            vel_limit: self.value(ParameterId::VelocityLimit),
            accel_limit: self.value(ParameterId::AccelerationLimit),
            jerk_limit: self.value(ParameterId::JerkLimit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_editor_table() {
        let model = ParameterModel::default();
        let req = model.snapshot();
        assert_eq!(req.start_pos, 0.0);
        assert_eq!(req.end_pos, 90.0);
        assert_eq!(req.vel_limit, 15_750.0);
        assert_eq!(req.accel_limit, 3_675_000.0);
        assert_eq!(req.jerk_limit, 2_500_000_000.0);
        assert_eq!(model.get(ParameterId::JerkLimit).coarse(), 2_500_000);
    }

    #[test]
    fn jerk_precise_and_coarse_round_trip() {
        let mut model = ParameterModel::default();
        assert!(model.set_precise(ParameterId::JerkLimit, 2_500_000_000.0));
        let coarse = model.get(ParameterId::JerkLimit).coarse();
        assert_eq!(coarse, 2_500_000);

        assert!(model.set_coarse(ParameterId::JerkLimit, coarse));
        assert_eq!(model.value(ParameterId::JerkLimit), 2_500_000_000.0);
        assert_eq!(model.get(ParameterId::JerkLimit).coarse(), coarse);
    }

    #[test]
    fn repeated_coarse_edits_do_not_drift() {
        let mut model = ParameterModel::default();
        for _ in 0..100 {
            model.set_coarse(ParameterId::JerkLimit, 1_234_567);
            let param = model.get(ParameterId::JerkLimit);
            assert_eq!(param.coarse() as f64 * param.scale(), param.value());
        }
        assert_eq!(model.value(ParameterId::JerkLimit), 1_234_567_000.0);
    }

    #[test]
    fn precise_edit_truncates_coarse_toward_zero() {
        let mut model = ParameterModel::default();
        model.set_precise(ParameterId::JerkLimit, 1_999_999.0);
        assert_eq!(model.get(ParameterId::JerkLimit).coarse(), 1_999);

        model.set_precise(ParameterId::StartVelocity, -12.75);
        assert_eq!(model.get(ParameterId::StartVelocity).coarse(), -12);
        assert_eq!(model.value(ParameterId::StartVelocity), -12.75);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut model = ParameterModel::default();
        assert!(model.set_precise(ParameterId::EndPosition, 500.0));
        assert_eq!(model.value(ParameterId::EndPosition), 180.0);

        assert!(model.set_coarse(ParameterId::JerkLimit, -5));
        assert_eq!(model.get(ParameterId::JerkLimit).coarse(), 1);
        assert_eq!(model.value(ParameterId::JerkLimit), 1_000.0);

        assert!(model.set_coarse(ParameterId::JerkLimit, i64::MAX));
        assert_eq!(model.value(ParameterId::JerkLimit), 10_000_000_000.0);
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut model = ParameterModel::default();
        assert!(!model.set_precise(ParameterId::VelocityLimit, f64::NAN));
        assert_eq!(model.value(ParameterId::VelocityLimit), 15_750.0);
    }

    #[test]
    fn disabled_parameter_ignores_edits_but_resets() {
        let mut model = ParameterModel::default();
        model.set_precise(ParameterId::JerkLimit, 5_000_000.0);
        model.get_mut(ParameterId::JerkLimit).set_enabled(false);
        assert!(!model.set_precise(ParameterId::JerkLimit, 1.0));
        assert!(!model.set_coarse(ParameterId::JerkLimit, 1));
        assert_eq!(model.value(ParameterId::JerkLimit), 5_000_000.0);

        model.reset_all();
        assert_eq!(model.value(ParameterId::JerkLimit), 2_500_000_000.0);
    }

    #[test]
    fn parses_keys_and_aliases() {
        assert_eq!("jerk_limit".parse(), Ok(ParameterId::JerkLimit));
        assert_eq!("JMAX".parse(), Ok(ParameterId::JerkLimit));
        assert_eq!("start-velocity".parse(), Ok(ParameterId::StartVelocity));
        assert!("speed".parse::<ParameterId>().is_err());
    }
}
