//! Tick, range and gridline layout for the four value channels and the time axis.
//!
//! Every layout is derived from scratch on each update; nothing is appended to
//! a previous layout.

use crate::evaluator::TrajectoryRequest;
use crate::sampler::Channel;

/// Ticks per value axis.
pub const DEFAULT_TICK_COUNT: usize = 6;

/// Share of the tick span added on each side of a value axis.
pub const DEFAULT_PADDING: f64 = 0.15;

/// Interval table for short profiles: `(longest duration, interval)` in ms.
pub const TIME_INTERVALS_MS: [(f64, f64); 4] = [(5.0, 0.5), (10.0, 1.0), (25.0, 2.0), (50.0, 5.0)];

/// Longer profiles get about this many intervals, rounded to 10 ms.
const TARGET_TIME_DIVISIONS: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    /// The line sits on a reference extreme.
    Extreme,
    Interior,
}

impl Emphasis {
    pub fn opacity(self) -> f64 {
        match self {
            Emphasis::Extreme => 0.8,
            Emphasis::Interior => 0.3,
        }
    }

    pub fn line_width(self) -> f64 {
        match self {
            Emphasis::Extreme => 1.2,
            Emphasis::Interior => 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gridline {
    pub position: f64,
    pub emphasis: Emphasis,
}

/// Layout of one value axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    /// Ascending, unique.
    pub ticks: Vec<f64>,
    /// Displayed `(min, max)`.
    pub range: (f64, f64),
    pub gridlines: Vec<Gridline>,
}

/// Layout of the time axis, in milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeAxis {
    pub ticks: Vec<f64>,
    /// One label per tick.
    pub labels: Vec<String>,
    pub range: (f64, f64),
    pub gridlines: Vec<Gridline>,
}

/// `(min, max)` widened by `ratio` of the span on both ends.
pub fn add_padding(min: f64, max: f64, ratio: f64) -> (f64, f64) {
    let padding = (max - min) * ratio;
    (min - padding, max + padding)
}

/// `count` evenly spaced ticks from the smaller to the larger extreme; a
/// zero span collapses to one tick.
pub fn even_ticks(a: f64, b: f64, count: usize) -> Vec<f64> {
    let (min, max) = (a.min(b), a.max(b));
    if max - min == 0.0 || count < 2 {
        return vec![min];
    }
    let step = (max - min) / (count - 1) as f64;
    (0..count)
        .map(|i| if i == count - 1 { max } else { min + step * i as f64 })
        .collect()
}

/// Tick interval in ms for a profile lasting `total_ms`.
pub fn nice_interval(total_ms: f64) -> f64 {
    TIME_INTERVALS_MS
        .iter()
        .find(|(longest, _)| total_ms <= *longest)
        .map(|(_, interval)| *interval)
        .unwrap_or_else(|| ((total_ms / TARGET_TIME_DIVISIONS / 10.0).round() * 10.0).max(10.0))
}

/// Ticks from 0 at the nice interval, strictly below `total_ms`, followed by
/// `total_ms` itself.
pub fn nice_ticks(total_ms: f64) -> Vec<f64> {
    if !total_ms.is_finite() || total_ms <= 0.0 {
        return vec![0.0];
    }
    let interval = nice_interval(total_ms);
    // a tick this close to the end would be a duplicate of it
    let tolerance = total_ms * 1e-9;

    let mut ticks = Vec::new();
    let mut k = 0u32;
    loop {
        let tick = f64::from(k) * interval;
        if tick >= total_ms - tolerance {
            break;
        }
        ticks.push(tick);
        k += 1;
    }
    ticks.push(total_ms);
    ticks
}

/// Final tick with two decimals, the one before it blank, the rest with one.
pub fn time_labels(ticks: &[f64]) -> Vec<String> {
    let n = ticks.len();
    ticks
        .iter()
        .enumerate()
        .map(|(i, tick)| {
            if i + 1 == n {
                format!("{tick:.2}")
            } else if i + 2 == n {
                String::new()
            } else {
                format!("{tick:.1}")
            }
        })
        .collect()
}

fn gridlines(ticks: &[f64], extremes: (f64, f64)) -> Vec<Gridline> {
    let span = (extremes.1 - extremes.0).abs();
    let tolerance = span * 1e-9;
    ticks
        .iter()
        .map(|&position| {
            let on_extreme = (position - extremes.0).abs() <= tolerance
                || (position - extremes.1).abs() <= tolerance;
            Gridline {
                position,
                emphasis: if on_extreme {
                    Emphasis::Extreme
                } else {
                    Emphasis::Interior
                },
            }
        })
        .collect()
}

/// Reference extremes a channel's axis is laid out around.
pub fn channel_extremes(request: &TrajectoryRequest, channel: Channel) -> (f64, f64) {
    match channel {
        Channel::Position => (request.start_pos, request.end_pos),
        Channel::Velocity => (0.0, request.direction() * request.vel_limit),
        Channel::Acceleration => (-request.accel_limit, request.accel_limit),
        Channel::Jerk => (-request.jerk_limit, request.jerk_limit),
    }
}

/// Axis layout rules for one editor session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisLayout {
    pub tick_count: usize,
    pub padding: f64,
}

impl Default for AxisLayout {
    fn default() -> Self {
        Self {
            tick_count: DEFAULT_TICK_COUNT,
            padding: DEFAULT_PADDING,
        }
    }
}

impl AxisLayout {
    pub fn value_axis(&self, extremes: (f64, f64)) -> AxisSpec {
        let ticks = even_ticks(extremes.0, extremes.1, self.tick_count);
        let (min, max) = (ticks[0], ticks[ticks.len() - 1]);
        let range = if max > min {
            add_padding(min, max, self.padding)
        } else {
            (min - 1.0, max + 1.0)
        };
        AxisSpec {
            gridlines: gridlines(&ticks, extremes),
            ticks,
            range,
        }
    }

    /// Axes for position, velocity, acceleration and jerk, in [`Channel::ALL`] order.
    pub fn channel_axes(&self, request: &TrajectoryRequest) -> [AxisSpec; 4] {
        Channel::ALL.map(|channel| self.value_axis(channel_extremes(request, channel)))
    }

    pub fn time_axis(&self, duration_s: f64) -> TimeAxis {
        let total_ms = duration_s * 1e3;
        let ticks = nice_ticks(total_ms);
        TimeAxis {
            labels: time_labels(&ticks),
            gridlines: gridlines(&ticks, (0.0, total_ms)),
            range: (0.0, total_ms.max(0.0)),
            ticks,
        }
    }
}
