use crate::error::PlanningError;
use crate::scurve_task::SCurveTask;

/// The SCurve struct holds the motion constraints used to plan a time-optimal,
/// jerk-limited profile between two positions with arbitrary boundary velocities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SCurve {
    /// Absolute velocity limit that must never be exceeded.
    vel_lim: f64,

    /// Absolute acceleration limit that must never be exceeded.
    acc_lim: f64,

    /// Absolute jerk limit that must never be exceeded.
    jrk_lim: f64,
}

/// Raw phase timing before it is attached to a start state.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Phases {
    t_j1: f64,
    t_acc: f64,
    t_vel: f64,
    t_j2: f64,
    t_dec: f64,
}

impl SCurve {
    /// Factor applied to the acceleration limit on each refinement step when
    /// the peak velocity is not reached.
    const ACC_REDUCTION: f64 = 0.99;

    /// 0.99^2000 is ~2e-9: far below any acceleration that still moves.
    const MAX_REDUCTIONS: usize = 2000;

    // Times below this are treated as zero
    const T_MIN: f64 = 1e-12;

    /// Creates a planner, rejecting non-positive or non-finite limits.
    pub fn new(vel_limit: f64, acc_limit: f64, jrk_limit: f64) -> Result<Self, PlanningError> {
        Ok(Self {
            vel_lim: Self::positive("velocity limit", vel_limit)?,
            acc_lim: Self::positive("acceleration limit", acc_limit)?,
            jrk_lim: Self::positive("jerk limit", jrk_limit)?,
        })
    }

    /// Plans the motion from `pos.0` to `pos.1`, starting at `vel.0` and
    /// finishing at `vel.1`.
    ///
    /// # Detailed explanation of the logic:
    ///
    /// 1. **Direction**. Everything is mirrored onto the positive axis so a single
    ///    set of formulas covers both directions of travel.
    /// 2. **Feasibility**. A velocity change needs a minimal displacement; if the
    ///    requested one is not larger the request is rejected.
    /// 3. **Cruise profile**. Ramp to the velocity limit, cruise, ramp down. Used
    ///    whenever the cruise time comes out positive.
    /// 4. **Peak profile**. No cruise: the acceleration limit is reduced step by
    ///    step until both ramps are long enough to contain their jerk phases. If one
    ///    ramp vanishes entirely the profile is a single acceleration or
    ///    deceleration stretch.
    pub fn plan(&self, pos: (f64, f64), vel: (f64, f64)) -> Result<SCurveTask, PlanningError> {
        Self::finite("initial position", pos.0)?;
        Self::finite("target position", pos.1)?;
        Self::finite("initial velocity", vel.0)?;
        Self::finite("final velocity", vel.1)?;

        let ds_raw = pos.1 - pos.0;
        let direction = if ds_raw < 0.0 { -1.0 } else { 1.0 };
        let ds = ds_raw.abs();

        let v_init = vel.0 * direction;
        let v_exit = vel.1 * direction;
        self.within_vel_lim("initial velocity", vel.0)?;
        self.within_vel_lim("final velocity", vel.1)?;

        self.check_feasible(ds, v_init, v_exit)?;

        let phases = match self.cruise_profile(ds, v_init, v_exit) {
            Some(phases) => phases,
            None => self.peak_profile(ds, v_init, v_exit)?,
        };

        Ok(SCurveTask {
            pos: pos.0 * direction,
            vel: v_init,
            jrk: self.jrk_lim,
            t_j1: phases.t_j1,
            t_acc: phases.t_acc,
            t_vel: phases.t_vel,
            t_dec: phases.t_dec,
            t_j2: phases.t_j2,
            direction,
        })
    }

    // -----------------------------------------------------------------------------------------
    // Below are helper methods for internal calculations:
    // -----------------------------------------------------------------------------------------

    /// Minimal displacement needed to go from `v_init` to `v_exit` with the
    /// current limits; the request must exceed it.
    fn check_feasible(&self, ds: f64, v_init: f64, v_exit: f64) -> Result<(), PlanningError> {
        let dv = (v_exit - v_init).abs();
        let t_acc_peak = self.acc_lim / self.jrk_lim;
        let t_j = (dv / self.jrk_lim).sqrt().min(t_acc_peak);

        let required = if t_j < t_acc_peak {
            t_j * (v_init + v_exit)
        } else {
            0.5 * (v_init + v_exit) * (t_j + dv / self.acc_lim)
        };

        if ds > required {
            Ok(())
        } else {
            Err(PlanningError::Infeasible {
                distance: ds,
                required,
            })
        }
    }

    /// Jerk phase time and total ramp time for a velocity change of `dv`
    /// (>= 0) under the acceleration limit `acc`.
    fn ramp(&self, dv: f64, acc: f64) -> (f64, f64) {
        if dv * self.jrk_lim < acc * acc {
            // acc limit is not reached: triangular acceleration
            let t_j = (dv / self.jrk_lim).sqrt();
            (t_j, 2.0 * t_j)
        } else {
            let t_j = acc / self.jrk_lim;
            (t_j, t_j + dv / acc)
        }
    }

    fn cruise_profile(&self, ds: f64, v_init: f64, v_exit: f64) -> Option<Phases> {
        let v_lim = self.vel_lim;
        let (t_j1, t_acc) = self.ramp(v_lim - v_init, self.acc_lim);
        let (t_j2, t_dec) = self.ramp(v_lim - v_exit, self.acc_lim);

        let t_vel = ds / v_lim
            - t_acc / 2.0 * (1.0 + v_init / v_lim)
            - t_dec / 2.0 * (1.0 + v_exit / v_lim);

        (t_vel > 0.0).then_some(Phases {
            t_j1,
            t_acc,
            t_vel,
            t_j2,
            t_dec,
        })
    }

    fn peak_profile(&self, ds: f64, v_init: f64, v_exit: f64) -> Result<Phases, PlanningError> {
        let jrk = self.jrk_lim;
        let mut acc = self.acc_lim;

        for _ in 0..Self::MAX_REDUCTIONS {
            let t_j = acc / jrk;
            let delta = acc.powi(4) / (jrk * jrk)
                + 2.0 * (v_init * v_init + v_exit * v_exit)
                + acc * (4.0 * ds - 2.0 * acc / jrk * (v_init + v_exit));
            if delta < 0.0 {
                return Err(PlanningError::Degenerate("no real peak velocity"));
            }
            let t_acc = (acc * acc / jrk - 2.0 * v_init + delta.sqrt()) / (2.0 * acc);
            let t_dec = (acc * acc / jrk - 2.0 * v_exit + delta.sqrt()) / (2.0 * acc);

            if t_acc < 0.0 {
                return self.deceleration_only(ds, v_init, v_exit);
            }
            if t_dec < 0.0 {
                return self.acceleration_only(ds, v_init, v_exit);
            }
            if t_acc >= 2.0 * t_j && t_dec >= 2.0 * t_j {
                return Ok(Phases {
                    t_j1: t_j,
                    t_acc,
                    t_vel: 0.0,
                    t_j2: t_j,
                    t_dec,
                });
            }
            acc *= Self::ACC_REDUCTION;
        }
        Err(PlanningError::NotConverged)
    }

    /// The whole motion is a single deceleration from `v_init` to `v_exit`.
    fn deceleration_only(&self, ds: f64, v_init: f64, v_exit: f64) -> Result<Phases, PlanningError> {
        let jrk = self.jrk_lim;
        let v_sum = v_init + v_exit;
        if v_sum <= 0.0 {
            return Err(PlanningError::Degenerate("deceleration cannot cover the displacement"));
        }
        let t_dec = 2.0 * ds / v_sum;
        let root = jrk * (jrk * ds * ds + v_sum * v_sum * (v_exit - v_init));
        if root < 0.0 {
            return Err(PlanningError::Degenerate("deceleration cannot cover the displacement"));
        }
        let t_j2 = Self::safe_t((jrk * ds - root.sqrt()) / (jrk * v_sum));
        Self::single_ramp(t_dec, t_j2).map(|(t_dec, t_j2)| Phases {
            t_j1: 0.0,
            t_acc: 0.0,
            t_vel: 0.0,
            t_j2,
            t_dec,
        })
    }

    /// The whole motion is a single acceleration from `v_init` to `v_exit`.
    fn acceleration_only(&self, ds: f64, v_init: f64, v_exit: f64) -> Result<Phases, PlanningError> {
        let jrk = self.jrk_lim;
        let v_sum = v_init + v_exit;
        if v_sum <= 0.0 {
            return Err(PlanningError::Degenerate("acceleration cannot cover the displacement"));
        }
        let t_acc = 2.0 * ds / v_sum;
        let root = jrk * (jrk * ds * ds - v_sum * v_sum * (v_exit - v_init));
        if root < 0.0 {
            return Err(PlanningError::Degenerate("acceleration cannot cover the displacement"));
        }
        let t_j1 = Self::safe_t((jrk * ds - root.sqrt()) / (jrk * v_sum));
        Self::single_ramp(t_acc, t_j1).map(|(t_acc, t_j1)| Phases {
            t_j1,
            t_acc,
            t_vel: 0.0,
            t_j2: 0.0,
            t_dec: 0.0,
        })
    }

    /// A lone ramp must be able to hold both of its jerk phases.
    fn single_ramp(t_ramp: f64, t_j: f64) -> Result<(f64, f64), PlanningError> {
        if !t_ramp.is_finite() || t_ramp <= 0.0 || 2.0 * t_j > t_ramp * (1.0 + 1e-9) {
            return Err(PlanningError::Degenerate("velocity change does not fit the displacement"));
        }
        Ok((t_ramp, t_j.min(t_ramp / 2.0)))
    }

    fn within_vel_lim(&self, name: &'static str, value: f64) -> Result<(), PlanningError> {
        if value.abs() > self.vel_lim {
            Err(PlanningError::VelocityOutOfRange {
                name,
                value,
                limit: self.vel_lim,
            })
        } else {
            Ok(())
        }
    }

    fn positive(name: &'static str, value: f64) -> Result<f64, PlanningError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(PlanningError::InvalidLimit { name, value })
        }
    }

    fn finite(name: &'static str, value: f64) -> Result<f64, PlanningError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(PlanningError::NonFinite { name, value })
        }
    }

    /// Ensures time `t` is non-negative, or zero if below T_MIN.
    fn safe_t(t: f64) -> f64 {
        if t >= Self::T_MIN {
            t
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::Profile;

    fn assert_reaches(task: &SCurveTask, target: f64, v_exit: f64) {
        let traj = task.trajectory();
        let end = traj.at(traj.duration());
        assert!(
            (end.position - target).abs() < 1e-6 * target.abs().max(1.0),
            "position {} != {}",
            end.position,
            target
        );
        assert!(
            (end.velocity - v_exit).abs() < 1e-6 * v_exit.abs().max(1.0),
            "velocity {} != {}",
            end.velocity,
            v_exit
        );
    }

    #[test]
    fn rejects_non_positive_limits() {
        assert!(matches!(
            SCurve::new(0.0, 1.0, 1.0),
            Err(PlanningError::InvalidLimit { name: "velocity limit", .. })
        ));
        assert!(SCurve::new(1.0, f64::NAN, 1.0).is_err());
        assert!(SCurve::new(1.0, 1.0, -3.0).is_err());
    }

    #[test]
    fn long_move_reaches_cruise_velocity() {
        let scurve = SCurve::new(10.0, 10.0, 30.0).unwrap();
        let task = scurve.plan((0.0, 100.0), (0.0, 0.0)).unwrap();
        assert!(task.t_vel > 0.0);
        assert!((task.vel_peak() - 10.0).abs() < 1e-9);
        assert_reaches(&task, 100.0, 0.0);
    }

    #[test]
    fn short_move_peaks_below_velocity_limit() {
        // q 0->10, v 1->0, vmax 10, amax 10, jmax 30
        let scurve = SCurve::new(10.0, 10.0, 30.0).unwrap();
        let task = scurve.plan((0.0, 10.0), (1.0, 0.0)).unwrap();
        assert_eq!(task.t_vel, 0.0);
        assert!((task.t_j1 - 1.0 / 3.0).abs() < 1e-9);
        assert!((task.t_acc - 1.0747).abs() < 1e-3);
        assert!((task.t_dec - 1.1747).abs() < 1e-3);
        assert!((task.vel_peak() - 8.4136).abs() < 1e-3);
        assert_reaches(&task, 10.0, 0.0);
    }

    #[test]
    fn fast_entry_reduces_acceleration() {
        // q 0->10, v 7->0: the full acceleration leaves no room for its jerk phases
        let scurve = SCurve::new(10.0, 10.0, 30.0).unwrap();
        let task = scurve.plan((0.0, 10.0), (7.0, 0.0)).unwrap();
        assert_eq!(task.t_vel, 0.0);
        assert!(task.acc_peak() < 10.0);
        assert!(task.t_acc >= 2.0 * task.t_j1);
        assert!(task.t_dec >= 2.0 * task.t_j2);
        assert_reaches(&task, 10.0, 0.0);
    }

    #[test]
    fn negative_travel_is_mirrored() {
        let scurve = SCurve::new(10.0, 10.0, 30.0).unwrap();
        let task = scurve.plan((50.0, 0.0), (0.0, 0.0)).unwrap();
        assert_eq!(task.direction, -1.0);
        assert_reaches(&task, 0.0, 0.0);
        let traj = task.trajectory();
        assert!(traj.at(traj.duration() / 2.0).velocity < 0.0);
    }

    #[test]
    fn high_entry_velocity_only_decelerates() {
        let scurve = SCurve::new(10.0, 10.0, 1000.0).unwrap();
        let task = scurve.plan((0.0, 5.0), (9.9, 0.0)).unwrap();
        assert_eq!(task.t_acc, 0.0);
        assert_eq!(task.t_vel, 0.0);
        assert!(task.dec_peak() <= 10.0);
        assert_reaches(&task, 5.0, 0.0);
    }

    #[test]
    fn boundary_velocity_above_limit_is_rejected() {
        let scurve = SCurve::new(1.0, 1.0, 1.0).unwrap();
        let err = scurve.plan((0.0, 180.0), (50_000.0, -50_000.0)).unwrap_err();
        assert!(matches!(err, PlanningError::VelocityOutOfRange { .. }));
    }

    #[test]
    fn zero_displacement_without_velocity_change_is_infeasible() {
        let scurve = SCurve::new(10.0, 10.0, 30.0).unwrap();
        let err = scurve.plan((5.0, 5.0), (0.0, 0.0)).unwrap_err();
        assert!(matches!(err, PlanningError::Infeasible { .. }));
    }

    #[test]
    fn too_short_for_velocity_change_is_infeasible() {
        let scurve = SCurve::new(10.0, 1.0, 1.0).unwrap();
        // stopping from 10 needs far more than 1 unit
        let err = scurve.plan((0.0, 1.0), (10.0, 0.0)).unwrap_err();
        assert!(matches!(err, PlanningError::Infeasible { .. }));
    }
}
