/// Describes a single constant-jerk segment of a motion profile.
///
/// `pos`, `vel` and `acc` are the kinematic state at the start of the segment,
/// `time` its duration and `jrk` the jerk held across it.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct MotionPolynomial {
    pub time: f64,
    pub pos: f64,
    pub vel: f64,
    pub acc: f64,
    pub jrk: f64,
}

/// Acceleration, velocity and position at one instant, in that order to match
/// the evaluator contract `at(t) -> (acceleration, velocity, position)`.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct KinematicState {
    pub acceleration: f64,
    pub velocity: f64,
    pub position: f64,
}

impl MotionPolynomial {
    /// Creates a new segment.
    pub fn new(time: f64, pos: f64, vel: f64, acc: f64, jrk: f64) -> Self {
        Self {
            time,
            pos,
            vel,
            acc,
            jrk,
        }
    }

    /// Closed-form state `dt` seconds into the segment.
    pub fn state_at(&self, dt: f64) -> KinematicState {
        let (j0, a0, v0, s0) = (self.jrk, self.acc, self.vel, self.pos);

        // acc(t) = a0 + j0*t
        let acc = a0 + j0 * dt;

        // vel(t) = v0 + a0*t + j0*t^2/2
        let vel = v0 + (a0 + acc) * dt * 0.5;

        // pos(t) = s0 + v0*t + a0*t^2/2 + j0*t^3/6, written with the average velocity
        let vel_avg = v0 + (2.0 * a0 + acc) * dt / 6.0;
        let pos = s0 + vel_avg * dt;

        KinematicState {
            acceleration: acc,
            velocity: vel,
            position: pos,
        }
    }

    /// State at the end of the segment.
    pub fn end_state(&self) -> KinematicState {
        self.state_at(self.time)
    }

    /// Same segment seen from a mirrored axis (`direction` is +1 or -1).
    pub fn mirrored(&self, direction: f64) -> Self {
        Self {
            time: self.time,
            pos: self.pos * direction,
            vel: self.vel * direction,
            acc: self.acc * direction,
            jrk: self.jrk * direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_jerk_segment_integrates_in_closed_form() {
        let seg = MotionPolynomial::new(2.0, 1.0, 3.0, 0.5, 6.0);
        let s = seg.state_at(2.0);
        assert!((s.acceleration - 12.5).abs() < 1e-12);
        // 3 + 0.5*2 + 6*4/2
        assert!((s.velocity - 16.0).abs() < 1e-12);
        // 1 + 3*2 + 0.5*4/2 + 6*8/6
        assert!((s.position - 16.0).abs() < 1e-12);
    }

    #[test]
    fn mirrored_segment_flips_every_signed_quantity() {
        let seg = MotionPolynomial::new(1.0, 2.0, -3.0, 4.0, -5.0).mirrored(-1.0);
        assert_eq!(seg, MotionPolynomial::new(1.0, -2.0, 3.0, -4.0, 5.0));
    }
}
