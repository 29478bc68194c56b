use crate::trajectory::Profile;

/// Number of points taken from every profile.
pub const DEFAULT_RESOLUTION: usize = 1000;

/// One chart channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Position,
    Velocity,
    Acceleration,
    Jerk,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Position,
        Channel::Velocity,
        Channel::Acceleration,
        Channel::Jerk,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::Position => "Position",
            Channel::Velocity => "Speed",
            Channel::Acceleration => "Acceleration",
            Channel::Jerk => "Jerk",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Channel::Position => "degrees",
            Channel::Velocity => "degrees/sec",
            Channel::Acceleration => "degrees/sec²",
            Channel::Jerk => "degrees/sec³",
        }
    }

    /// Trace colour (hex).
    pub fn color(self) -> &'static str {
        match self {
            Channel::Position => "#bf5af2",
            Channel::Velocity => "#0b84ff",
            Channel::Acceleration => "#ff453a",
            Channel::Jerk => "#ff9f0b",
        }
    }

    pub fn value(self, sample: &Sample) -> f64 {
        match self {
            Channel::Position => sample.position,
            Channel::Velocity => sample.velocity,
            Channel::Acceleration => sample.acceleration,
            Channel::Jerk => sample.jerk,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub jerk: f64,
}

/// Uniformly spaced, time-ascending samples of one profile.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSeries {
    samples: Vec<Sample>,
    duration: f64,
    spacing: f64,
}

impl SampleSeries {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Time between neighbouring samples.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.t).collect()
    }

    pub fn channel(&self, channel: Channel) -> Vec<f64> {
        self.samples.iter().map(|s| channel.value(s)).collect()
    }

    /// `(t, value)` pairs for one channel.
    pub fn series(&self, channel: Channel) -> Vec<[f64; 2]> {
        self.samples
            .iter()
            .map(|s| [s.t, channel.value(s)])
            .collect()
    }
}

/// Samples `profile` at `resolution` evenly spaced instants over `[0, duration]`.
///
/// Jerk is the numerical gradient of acceleration: central differences inside,
/// one-sided differences at both ends. `duration` must be positive (the
/// evaluator client rejects anything else). The output has exactly
/// `resolution` samples for any `resolution >= 2`, which a validated
/// [`EditorConfig`](crate::config::EditorConfig) guarantees; smaller values
/// are raised to 2.
pub fn sample<P: Profile + ?Sized>(profile: &P, duration: f64, resolution: usize) -> SampleSeries {
    let n = resolution.max(2);
    let spacing = duration / (n - 1) as f64;

    let mut samples: Vec<Sample> = (0..n)
        .map(|i| {
            let t = if i == n - 1 {
                duration
            } else {
                i as f64 * spacing
            };
            let state = profile.at(t);
            Sample {
                t,
                position: state.position,
                velocity: state.velocity,
                acceleration: state.acceleration,
                jerk: 0.0,
            }
        })
        .collect();

    let acc: Vec<f64> = samples.iter().map(|s| s.acceleration).collect();
    for (i, sample) in samples.iter_mut().enumerate() {
        sample.jerk = if i == 0 {
            (acc[1] - acc[0]) / spacing
        } else if i == n - 1 {
            (acc[n - 1] - acc[n - 2]) / spacing
        } else {
            (acc[i + 1] - acc[i - 1]) / (2.0 * spacing)
        };
    }

    SampleSeries {
        samples,
        duration,
        spacing,
    }
}
