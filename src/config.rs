//! Editor settings read from TOML. Every field is optional; a missing file
//! section falls back to the built-in defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::axis::{AxisLayout, DEFAULT_PADDING, DEFAULT_TICK_COUNT};
use crate::error::ConfigError;
use crate::mode::UNCONSTRAINED_JERK;
use crate::parameters::{ParameterId, ParameterModel, ParameterSpec};
use crate::sampler::DEFAULT_RESOLUTION;
use crate::statistics::DEFAULT_DWELL_EPSILON;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn foreground(self) -> &'static str {
        match self {
            Theme::Dark => "#d1d1d6",
            Theme::Light => "#000000",
        }
    }

    pub fn grid(self) -> &'static str {
        match self {
            Theme::Dark => "#48484a",
            Theme::Light => "#c7c7cc",
        }
    }
}

/// Partial replacement of one parameter's bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterOverride {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub default: Option<f64>,
    pub scale: Option<f64>,
}

impl ParameterOverride {
    fn apply(&self, spec: ParameterSpec) -> ParameterSpec {
        ParameterSpec {
            min: self.min.unwrap_or(spec.min),
            max: self.max.unwrap_or(spec.max),
            default: self.default.unwrap_or(spec.default),
            scale: self.scale.unwrap_or(spec.scale),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Samples per profile.
    pub resolution: usize,
    /// Relative tolerance for limit dwell.
    pub dwell_epsilon: f64,
    /// Share of the tick span added to each side of a value axis.
    pub axis_padding: f64,
    pub value_tick_count: usize,
    /// Jerk limit substituted in trapezoidal mode.
    pub unconstrained_jerk: f64,
    pub theme: Theme,
    /// Keyed by parameter name or alias, e.g. `[parameters.jerk_limit]`.
    pub parameters: BTreeMap<String, ParameterOverride>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            dwell_epsilon: DEFAULT_DWELL_EPSILON,
            axis_padding: DEFAULT_PADDING,
            value_tick_count: DEFAULT_TICK_COUNT,
            unconstrained_jerk: UNCONSTRAINED_JERK,
            theme: Theme::default(),
            parameters: BTreeMap::new(),
        }
    }
}

impl EditorConfig {
    /// Reads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution < 2 {
            return Err(invalid(format!(
                "resolution must be at least 2, got {}",
                self.resolution
            )));
        }
        if !(self.dwell_epsilon.is_finite() && self.dwell_epsilon > 0.0) {
            return Err(invalid(format!(
                "dwell_epsilon must be positive, got {}",
                self.dwell_epsilon
            )));
        }
        if !(self.axis_padding.is_finite() && self.axis_padding > 0.0) {
            return Err(invalid(format!(
                "axis_padding must be positive, got {}",
                self.axis_padding
            )));
        }
        if self.value_tick_count < 2 {
            return Err(invalid(format!(
                "value_tick_count must be at least 2, got {}",
                self.value_tick_count
            )));
        }
        if !(self.unconstrained_jerk.is_finite() && self.unconstrained_jerk > 0.0) {
            return Err(invalid(format!(
                "unconstrained_jerk must be positive, got {}",
                self.unconstrained_jerk
            )));
        }

        for key in self.parameters.keys() {
            key.parse::<ParameterId>()
                .map_err(|err| invalid(err.to_string()))?;
        }
        for id in ParameterId::ALL {
            let spec = self.parameter_spec(id);
            let finite = [spec.min, spec.max, spec.default, spec.scale]
                .iter()
                .all(|v| v.is_finite());
            if !finite {
                return Err(invalid(format!("{id}: bounds must be finite")));
            }
            if spec.min > spec.max {
                return Err(invalid(format!(
                    "{id}: min {} is larger than max {}",
                    spec.min, spec.max
                )));
            }
            if !(spec.min..=spec.max).contains(&spec.default) {
                return Err(invalid(format!(
                    "{id}: default {} is outside [{}, {}]",
                    spec.default, spec.min, spec.max
                )));
            }
            if spec.scale <= 0.0 {
                return Err(invalid(format!(
                    "{id}: scale must be positive, got {}",
                    spec.scale
                )));
            }
        }

        let jerk = self.parameter_spec(ParameterId::JerkLimit);
        if self.unconstrained_jerk < jerk.min {
            return Err(invalid(format!(
                "unconstrained_jerk {} is below the jerk limit minimum {}",
                self.unconstrained_jerk, jerk.min
            )));
        }
        Ok(())
    }

    /// Built-in bounds of `id` with any configured override applied.
    pub fn parameter_spec(&self, id: ParameterId) -> ParameterSpec {
        self.parameters
            .iter()
            .filter(|(key, _)| key.parse::<ParameterId>().ok() == Some(id))
            .fold(id.default_spec(), |spec, (_, over)| over.apply(spec))
    }

    pub fn parameter_model(&self) -> ParameterModel {
        ParameterModel::new(|id| self.parameter_spec(id))
    }

    pub fn axis_layout(&self) -> AxisLayout {
        AxisLayout {
            tick_count: self.value_tick_count,
            padding: self.axis_padding,
        }
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}
