use crate::motion_polynomial::{KinematicState, MotionPolynomial};

/// Continuous single-axis motion profile as seen by the editor pipeline.
pub trait Profile {
    /// Total duration in seconds.
    fn duration(&self) -> f64;

    /// Kinematic state at `t`, clamped into `[0, duration]`.
    fn at(&self, t: f64) -> KinematicState;
}

/// A planned trajectory: seven constant-jerk phases laid end to end.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    phases: [MotionPolynomial; 7],
    /// Start time of each phase.
    starts: [f64; 7],
    duration: f64,
}

impl Trajectory {
    pub fn new(phases: [MotionPolynomial; 7]) -> Self {
        let mut starts = [0.0; 7];
        let mut time = 0.0;
        for (start, phase) in starts.iter_mut().zip(&phases) {
            *start = time;
            time += phase.time;
        }
        Self {
            phases,
            starts,
            duration: time,
        }
    }

    /// Index of the phase active at `t`; zero-length phases are skipped.
    fn phase_index(&self, t: f64) -> usize {
        let mut idx = 0;
        for (i, (start, phase)) in self.starts.iter().zip(&self.phases).enumerate() {
            if phase.time > 0.0 && *start <= t {
                idx = i;
            }
        }
        idx
    }
}

impl Profile for Trajectory {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn at(&self, t: f64) -> KinematicState {
        let t = t.clamp(0.0, self.duration);
        let idx = self.phase_index(t);
        let phase = &self.phases[idx];
        let dt = (t - self.starts[idx]).clamp(0.0, phase.time);
        phase.state_at(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Trajectory {
        // accelerate at 2 for 1 s, then cruise for 2 s
        let accel = MotionPolynomial::new(1.0, 0.0, 0.0, 2.0, 0.0);
        let end = accel.end_state();
        let cruise = MotionPolynomial::new(2.0, end.position, end.velocity, 0.0, 0.0);
        let idle = MotionPolynomial::default();
        Trajectory::new([accel, idle, cruise, idle, idle, idle, idle])
    }

    #[test]
    fn duration_is_the_sum_of_phase_times() {
        assert_eq!(ramp().duration(), 3.0);
    }

    #[test]
    fn evaluates_inside_the_active_phase() {
        let traj = ramp();
        let s = traj.at(0.5);
        assert!((s.velocity - 1.0).abs() < 1e-12);
        assert!((s.position - 0.25).abs() < 1e-12);

        let s = traj.at(2.0);
        assert_eq!(s.acceleration, 0.0);
        assert!((s.velocity - 2.0).abs() < 1e-12);
        assert!((s.position - 3.0).abs() < 1e-12);
    }

    #[test]
    fn clamps_time_outside_the_profile() {
        let traj = ramp();
        assert_eq!(traj.at(-1.0), traj.at(0.0));
        assert_eq!(traj.at(10.0), traj.at(3.0));
        assert!((traj.at(3.0).position - 5.0).abs() < 1e-12);
    }
}
