//! Time spent at or near each kinematic limit.
//!
//! Dwell is counted on the sampled series, not integrated: every sample within
//! `epsilon * limit` of its limit contributes one sample spacing. This
//! over-counts around threshold crossings and is meant as an indicator.

use crate::evaluator::Limits;
use crate::sampler::{Channel, Sample, SampleSeries};

/// Relative tolerance around a limit (0.1 %).
pub const DEFAULT_DWELL_EPSILON: f64 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LimitCategory {
    MaxVelocity,
    MaxAcceleration,
    MinAcceleration,
    MaxJerk,
    MinJerk,
}

impl LimitCategory {
    pub const ALL: [LimitCategory; 5] = [
        LimitCategory::MaxVelocity,
        LimitCategory::MaxAcceleration,
        LimitCategory::MinAcceleration,
        LimitCategory::MaxJerk,
        LimitCategory::MinJerk,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LimitCategory::MaxVelocity => "max velocity",
            LimitCategory::MaxAcceleration => "max acceleration",
            LimitCategory::MinAcceleration => "min acceleration",
            LimitCategory::MaxJerk => "max jerk",
            LimitCategory::MinJerk => "min jerk",
        }
    }

    pub fn channel(self) -> Channel {
        match self {
            LimitCategory::MaxVelocity => Channel::Velocity,
            LimitCategory::MaxAcceleration | LimitCategory::MinAcceleration => {
                Channel::Acceleration
            }
            LimitCategory::MaxJerk | LimitCategory::MinJerk => Channel::Jerk,
        }
    }

    /// Signed value a sample is compared with.
    pub fn target(self, limits: &Limits) -> f64 {
        match self {
            LimitCategory::MaxVelocity => limits.velocity,
            LimitCategory::MaxAcceleration => limits.acceleration,
            LimitCategory::MinAcceleration => -limits.acceleration,
            LimitCategory::MaxJerk => limits.jerk,
            LimitCategory::MinJerk => -limits.jerk,
        }
    }

    fn is_at_limit(self, sample: &Sample, limits: &Limits, epsilon: f64) -> bool {
        let target = self.target(limits);
        let value = match self {
            // either direction of travel counts as running at the velocity limit
            LimitCategory::MaxVelocity => sample.velocity.abs(),
            _ => self.channel().value(sample),
        };
        (value - target).abs() <= epsilon * target.abs()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dwell {
    /// Seconds.
    pub time: f64,
    /// Share of the total duration, 0..=100.
    pub percent: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statistics {
    pub total_duration: f64,
    pub max_velocity: Dwell,
    pub max_acceleration: Dwell,
    pub min_acceleration: Dwell,
    pub max_jerk: Dwell,
    pub min_jerk: Dwell,
}

impl Statistics {
    pub fn dwell(&self, category: LimitCategory) -> Dwell {
        match category {
            LimitCategory::MaxVelocity => self.max_velocity,
            LimitCategory::MaxAcceleration => self.max_acceleration,
            LimitCategory::MinAcceleration => self.min_acceleration,
            LimitCategory::MaxJerk => self.max_jerk,
            LimitCategory::MinJerk => self.min_jerk,
        }
    }

    fn dwell_mut(&mut self, category: LimitCategory) -> &mut Dwell {
        match category {
            LimitCategory::MaxVelocity => &mut self.max_velocity,
            LimitCategory::MaxAcceleration => &mut self.max_acceleration,
            LimitCategory::MinAcceleration => &mut self.min_acceleration,
            LimitCategory::MaxJerk => &mut self.max_jerk,
            LimitCategory::MinJerk => &mut self.min_jerk,
        }
    }

    pub fn max_velocity_percent(&self) -> f64 {
        self.max_velocity.percent
    }
}

pub fn compute_statistics(series: &SampleSeries, limits: &Limits, epsilon: f64) -> Statistics {
    let total = series.duration();
    let mut stats = Statistics {
        total_duration: total,
        ..Statistics::default()
    };

    for category in LimitCategory::ALL {
        let count = series
            .samples()
            .iter()
            .filter(|s| category.is_at_limit(s, limits, epsilon))
            .count();
        let time = (count as f64 * series.spacing()).min(total);
        let percent = if total > 0.0 {
            (time / total * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        *stats.dwell_mut(category) = Dwell { time, percent };
    }
    stats
}
