//! Contract with the motion-profile evaluator and the client that shields the
//! editor pipeline from its failures.

use log::{debug, info};

use crate::error::{EvaluationFailure, PlanningError};
use crate::scurve::SCurve;
use crate::trajectory::{Profile, Trajectory};

/// Boundary conditions and limits for one evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectoryRequest {
    pub start_pos: f64,
    pub end_pos: f64,
    pub start_vel: f64,
    pub end_vel: f64,
    pub vel_limit: f64,
    pub accel_limit: f64,
    pub jerk_limit: f64,
}

impl TrajectoryRequest {
    pub fn limits(&self) -> Limits {
        Limits {
            velocity: self.vel_limit,
            acceleration: self.accel_limit,
            jerk: self.jerk_limit,
        }
    }

    /// +1.0 when travelling towards larger positions (or not at all), -1.0 otherwise.
    pub fn direction(&self) -> f64 {
        if self.end_pos < self.start_pos {
            -1.0
        } else {
            1.0
        }
    }
}

/// Kinematic limits a profile was planned with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    pub velocity: f64,
    pub acceleration: f64,
    pub jerk: f64,
}

/// Anything that turns a request into a continuous profile.
pub trait ProfileEvaluator {
    type Profile: Profile;

    fn evaluate(&self, request: &TrajectoryRequest) -> Result<Self::Profile, PlanningError>;
}

/// Double-S planner backed by [`SCurve`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ScurvePlanner;

impl ProfileEvaluator for ScurvePlanner {
    type Profile = Trajectory;

    fn evaluate(&self, request: &TrajectoryRequest) -> Result<Trajectory, PlanningError> {
        let scurve = SCurve::new(request.vel_limit, request.accel_limit, request.jerk_limit)?;
        let task = scurve.plan(
            (request.start_pos, request.end_pos),
            (request.start_vel, request.end_vel),
        )?;
        debug!(
            "planned: t_acc={:.6} t_vel={:.6} t_dec={:.6} peak velocity {:.3}",
            task.t_acc,
            task.t_vel,
            task.t_dec,
            task.vel_peak() * task.direction
        );
        Ok(task.trajectory())
    }
}

/// Outcome of one successful evaluation. Superseded, never mutated.
#[derive(Clone, Debug)]
pub struct TrajectoryResult<P> {
    pub request: TrajectoryRequest,
    pub duration: f64,
    pub profile: P,
}

/// Calls the evaluator synchronously and converts every rejection into an
/// [`EvaluationFailure`].
#[derive(Clone, Debug)]
pub struct EvaluatorClient<E> {
    evaluator: E,
}

impl<E: ProfileEvaluator> EvaluatorClient<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    pub fn evaluate(
        &self,
        request: &TrajectoryRequest,
    ) -> Result<TrajectoryResult<E::Profile>, EvaluationFailure> {
        let profile = self.evaluator.evaluate(request)?;
        let duration = profile.duration();
        if !duration.is_finite() || duration <= 0.0 {
            return Err(EvaluationFailure::new(format!(
                "degenerate profile duration {duration}"
            )));
        }
        info!("evaluated profile lasting {:.3} ms", duration * 1e3);
        Ok(TrajectoryResult {
            request: *request,
            duration,
            profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion_polynomial::KinematicState;

    fn default_request() -> TrajectoryRequest {
        TrajectoryRequest {
            start_pos: 0.0,
            end_pos: 90.0,
            start_vel: 0.0,
            end_vel: 0.0,
            vel_limit: 15_750.0,
            accel_limit: 3_675_000.0,
            jerk_limit: 2_500_000_000.0,
        }
    }

    #[derive(Debug)]
    struct Frozen;

    impl Profile for Frozen {
        fn duration(&self) -> f64 {
            0.0
        }

        fn at(&self, _t: f64) -> KinematicState {
            KinematicState::default()
        }
    }

    struct FrozenEvaluator;

    impl ProfileEvaluator for FrozenEvaluator {
        type Profile = Frozen;

        fn evaluate(&self, _request: &TrajectoryRequest) -> Result<Frozen, PlanningError> {
            Ok(Frozen)
        }
    }

    #[test]
    fn default_request_is_feasible() {
        let client = EvaluatorClient::new(ScurvePlanner);
        let result = client.evaluate(&default_request()).unwrap();
        assert!(result.duration > 0.0);
        assert_eq!(result.request, default_request());
        let end = result.profile.at(result.duration);
        assert!((end.position - 90.0).abs() < 1e-6);
    }

    #[test]
    fn planner_rejection_becomes_evaluation_failure() {
        let client = EvaluatorClient::new(ScurvePlanner);
        let request = TrajectoryRequest {
            start_pos: 0.0,
            end_pos: 180.0,
            start_vel: 50_000.0,
            end_vel: -50_000.0,
            vel_limit: 1.0,
            accel_limit: 1.0,
            jerk_limit: 1.0,
        };
        let failure = client.evaluate(&request).unwrap_err();
        assert!(failure.reason.contains("velocity limit"), "{}", failure.reason);
    }

    #[test]
    fn zero_duration_is_degenerate() {
        let client = EvaluatorClient::new(FrozenEvaluator);
        let failure = client.evaluate(&default_request()).unwrap_err();
        assert!(failure.reason.contains("degenerate"));
    }

    #[test]
    fn direction_follows_travel() {
        let mut request = default_request();
        assert_eq!(request.direction(), 1.0);
        request.end_pos = -1.0;
        assert_eq!(request.direction(), -1.0);
    }
}
