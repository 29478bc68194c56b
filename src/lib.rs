//! # motion_profile_editor
//!
//! Core of an interactive single-axis motion profile editor: bounded
//! parameters in, sampled S-curve profiles, limit statistics and chart axes out.
//!
//! This library provides the following modules:
//! - `parameters` for the seven bounded parameters and their linked coarse/precise values.
//! - `scurve` for planning a jerk-limited double-S profile under the given limits.
//! - `scurve_task` for the planned phase durations and the seven constant-jerk phases.
//! - `motion_polynomial` for describing a single constant-jerk segment in time.
//! - `trajectory` for evaluating a chain of segments at any instant.
//! - `evaluator` for the evaluator contract and the client that wraps its failures.
//! - `sampler` for fixed-resolution time series with a numerical jerk channel.
//! - `statistics` for time spent at each kinematic limit.
//! - `axis` for ticks, padded ranges and gridlines of the value and time axes.
//! - `mode` for switching between S-curve and trapezoidal profiles.
//! - `editor` for the recompute pipeline and the presentation sink contract.
//! - `console` for the line-oriented operator commands and a text sink.
//! - `config` for TOML editor settings.

pub mod axis;
pub mod config;
pub mod console;
pub mod editor;
pub mod error;
pub mod evaluator;
pub mod mode;
pub mod motion_polynomial;
pub mod parameters;
pub mod sampler;
pub mod scurve;
pub mod scurve_task;
pub mod statistics;
pub mod trajectory;

// Re-export main structs for convenience:
pub use axis::{AxisLayout, AxisSpec, Emphasis, Gridline, TimeAxis};
pub use config::{EditorConfig, Theme};
pub use editor::{Frame, MotionProfileEditor, NullSink, PresentationSink, RenderedProfile, Update};
pub use error::{ConfigError, EvaluationFailure, PlanningError};
pub use evaluator::{EvaluatorClient, Limits, ProfileEvaluator, ScurvePlanner, TrajectoryRequest};
pub use mode::{Mode, ModeController};
pub use motion_polynomial::{KinematicState, MotionPolynomial};
pub use parameters::{ParameterId, ParameterModel};
pub use sampler::{Channel, Sample, SampleSeries};
pub use scurve::SCurve;
pub use scurve_task::SCurveTask;
pub use statistics::{LimitCategory, Statistics};
pub use trajectory::{Profile, Trajectory};
