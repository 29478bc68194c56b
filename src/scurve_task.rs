use crate::motion_polynomial::MotionPolynomial;
use crate::trajectory::Trajectory;

/// Phase timing of a planned double-S profile.
///
/// All values live in the positive frame (travel along +x); `direction`
/// maps them back onto the requested axis when the phases are built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SCurveTask {
    /// Start position in the positive frame.
    pub pos: f64,
    /// Start velocity in the positive frame.
    pub vel: f64,
    /// Jerk magnitude used by every jerk phase.
    pub jrk: f64,
    /// Duration of each jerk phase while accelerating.
    pub t_j1: f64,
    /// Whole acceleration stretch, jerk phases included.
    pub t_acc: f64,
    /// Cruise at peak velocity.
    pub t_vel: f64,
    /// Whole deceleration stretch, jerk phases included.
    pub t_dec: f64,
    /// Duration of each jerk phase while decelerating.
    pub t_j2: f64,
    /// +1.0 or -1.0.
    pub direction: f64,
}

impl Default for SCurveTask {
    fn default() -> Self {
        Self {
            pos: 0.0,
            vel: 0.0,
            jrk: 0.0,
            t_j1: 0.0,
            t_acc: 0.0,
            t_vel: 0.0,
            t_dec: 0.0,
            t_j2: 0.0,
            direction: 1.0,
        }
    }
}

impl SCurveTask {
    pub fn duration(&self) -> f64 {
        self.t_acc + self.t_vel + self.t_dec
    }

    /// Peak acceleration reached while speeding up.
    pub fn acc_peak(&self) -> f64 {
        self.jrk * self.t_j1
    }

    /// Peak deceleration magnitude reached while slowing down.
    pub fn dec_peak(&self) -> f64 {
        self.jrk * self.t_j2
    }

    /// Velocity held during the cruise phase.
    pub fn vel_peak(&self) -> f64 {
        self.vel + (self.t_acc - self.t_j1) * self.acc_peak()
    }

    /// Full 7-phase breakdown: jerk up, hold, jerk down, cruise, jerk down,
    /// hold, jerk up. Every phase starts where the previous one ended.
    pub fn s_curve(&self) -> [MotionPolynomial; 7] {
        let j = self.jrk;
        let timing = [
            (self.t_j1, j),
            ((self.t_acc - 2.0 * self.t_j1).max(0.0), 0.0),
            (self.t_j1, -j),
            (self.t_vel, 0.0),
            (self.t_j2, -j),
            ((self.t_dec - 2.0 * self.t_j2).max(0.0), 0.0),
            (self.t_j2, j),
        ];

        let mut mt = [MotionPolynomial::default(); 7];
        let (mut pos, mut vel, mut acc) = (self.pos, self.vel, 0.0);
        for (motion_task, (time, jrk)) in mt.iter_mut().zip(timing) {
            *motion_task = MotionPolynomial::new(time, pos, vel, acc, jrk);
            let end = motion_task.end_state();
            pos = end.position;
            vel = end.velocity;
            acc = end.acceleration;
        }

        mt.map(|phase| phase.mirrored(self.direction))
    }

    pub fn trajectory(&self) -> Trajectory {
        Trajectory::new(self.s_curve())
    }
}
