//! The editor pipeline: parameter edits in, rendered frames out.
//!
//! Every accepted edit runs one synchronous recompute: snapshot, evaluate,
//! sample, statistics, axes, present. A failed evaluation stops after the
//! evaluator step; the previous render stays on screen with a warning.

use log::warn;

use crate::axis::{AxisLayout, AxisSpec, TimeAxis};
use crate::config::EditorConfig;
use crate::error::{ConfigError, EvaluationFailure};
use crate::evaluator::{EvaluatorClient, ProfileEvaluator, TrajectoryRequest};
use crate::mode::{Mode, ModeController};
use crate::parameters::{ParameterId, ParameterModel};
use crate::sampler::{sample, SampleSeries};
use crate::statistics::{compute_statistics, Statistics};

/// Everything derived from one successful evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedProfile {
    pub request: TrajectoryRequest,
    pub samples: SampleSeries,
    pub statistics: Statistics,
    /// In [`Channel::ALL`](crate::sampler::Channel::ALL) order.
    pub axes: [AxisSpec; 4],
    pub time_axis: TimeAxis,
}

/// What a sink gets to draw after each update.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub mode: Mode,
    pub parameters: &'a ParameterModel,
    /// `None` until the first evaluation succeeds.
    pub profile: Option<&'a RenderedProfile>,
    pub warning: Option<&'a str>,
}

pub trait PresentationSink {
    fn present(&mut self, frame: &Frame<'_>);
}

/// Discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn present(&mut self, _frame: &Frame<'_>) {}
}

/// Outcome of one operator action.
#[derive(Clone, Debug, PartialEq)]
pub enum Update {
    Rendered,
    Failed(EvaluationFailure),
    /// The edit was rejected by the parameter model; nothing was recomputed.
    Ignored,
}

pub struct MotionProfileEditor<E, S> {
    params: ParameterModel,
    mode: ModeController,
    client: EvaluatorClient<E>,
    layout: AxisLayout,
    resolution: usize,
    dwell_epsilon: f64,
    rendered: Option<RenderedProfile>,
    warning: Option<String>,
    evaluations: usize,
    sink: S,
}

impl<E: ProfileEvaluator, S: PresentationSink> MotionProfileEditor<E, S> {
    /// Validates `config`, builds the editor and renders the default
    /// parameters once.
    pub fn new(config: &EditorConfig, evaluator: E, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut editor = Self {
            params: config.parameter_model(),
            mode: ModeController::new(config.unconstrained_jerk),
            client: EvaluatorClient::new(evaluator),
            layout: config.axis_layout(),
            resolution: config.resolution,
            dwell_epsilon: config.dwell_epsilon,
            rendered: None,
            warning: None,
            evaluations: 0,
            sink,
        };
        editor.recompute();
        Ok(editor)
    }

    pub fn parameters(&self) -> &ParameterModel {
        &self.params
    }

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn rendered(&self) -> Option<&RenderedProfile> {
        self.rendered.as_ref()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Number of evaluator calls so far, including the initial one.
    pub fn evaluation_count(&self) -> usize {
        self.evaluations
    }

    pub fn set_precise(&mut self, id: ParameterId, value: f64) -> Update {
        if self.params.set_precise(id, value) {
            self.recompute()
        } else {
            Update::Ignored
        }
    }

    pub fn set_coarse(&mut self, id: ParameterId, step: i64) -> Update {
        if self.params.set_coarse(id, step) {
            self.recompute()
        } else {
            Update::Ignored
        }
    }

    pub fn reset(&mut self, id: ParameterId) -> Update {
        self.params.reset(id);
        self.recompute()
    }

    pub fn reset_all(&mut self) -> Update {
        self.params.reset_all();
        self.recompute()
    }

    pub fn toggle_mode(&mut self) -> Update {
        self.mode.toggle(&mut self.params);
        self.recompute()
    }

    /// Re-runs the pipeline on the current parameters and presents the result.
    pub fn recompute(&mut self) -> Update {
        let update = match self.render() {
            Ok(rendered) => {
                self.rendered = Some(rendered);
                self.warning = None;
                Update::Rendered
            }
            Err(failure) => {
                warn!("evaluation failed: {failure}");
                self.warning = Some(format!("Warning: {failure}"));
                Update::Failed(failure)
            }
        };
        self.present();
        update
    }

    /// Pushes the current state to the sink without evaluating.
    pub fn present(&mut self) {
        let frame = Frame {
            mode: self.mode.mode(),
            parameters: &self.params,
            profile: self.rendered.as_ref(),
            warning: self.warning.as_deref(),
        };
        self.sink.present(&frame);
    }

    fn render(&mut self) -> Result<RenderedProfile, EvaluationFailure> {
        let request = self.params.snapshot();
        self.evaluations += 1;
        let result = self.client.evaluate(&request)?;

        let samples = sample(&result.profile, result.duration, self.resolution);
        let statistics = compute_statistics(&samples, &request.limits(), self.dwell_epsilon);
        Ok(RenderedProfile {
            axes: self.layout.channel_axes(&request),
            time_axis: self.layout.time_axis(result.duration),
            request,
            samples,
            statistics,
        })
    }
}
