use std::f64::consts::TAU;
use crate::analysis::{IntervalSeries, RunoutError};
/// Nanoseconds per minute.
pub const NS_PER_MINUTE: f64 = 6.0e10;
/// Instantaneous rotational speed, one RPM value per interval.
#[derive(Clone, Debug, PartialEq)]
pub struct VelocityProfile {
    pub rpm: Vec<f64>,
    pub angle_increment: f64,
}
impl VelocityProfile {
    /// Converts intervals to RPM; any non-positive interval is rejected.
    pub fn from_intervals(
        intervals: &IntervalSeries,
        steps_per_revolution: usize,
    ) -> Result<Self, RunoutError> {
        if steps_per_revolution == 0 {
            return Err(RunoutError::InvalidConfig(
                "steps_per_revolution must be greater than zero".into(),
            ));
        }
        intervals.validate()?;
        let angle_increment = TAU / steps_per_revolution as f64;
        let factor = (angle_increment / TAU) * NS_PER_MINUTE;
        let rpm = intervals
            .as_slice()
            .iter()
            .map(|&interval| factor / interval as f64)
            .collect();
        Ok(Self {
            rpm,
            angle_increment,
        })
    }
    pub fn len(&self) -> usize {
        self.rpm.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rpm.is_empty()
    }
    /// `(angle, rpm)` pairs, the angle advancing by one step per sample.
    pub fn polar_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.rpm
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64 * self.angle_increment, v))
    }
}
/// Average speed over a capture of `sample_count` edges spanning `duration_ns`.
pub fn average_rpm(
    sample_count: usize,
    duration_ns: i64,
    steps_per_revolution: usize,
) -> Result<f64, RunoutError> {
    if sample_count < 2 {
        return Err(RunoutError::InsufficientSamples {
            needed: 2,
            got: sample_count,
        });
    }
    if duration_ns <= 0 {
        return Err(RunoutError::InvalidSample {
            index: 0,
            interval_ns: duration_ns,
        });
    }
    if steps_per_revolution == 0 {
        return Err(RunoutError::InvalidConfig(
            "steps_per_revolution must be greater than zero".into(),
        ));
    }
    Ok(NS_PER_MINUTE * (sample_count - 1) as f64
        / (steps_per_revolution as f64 * duration_ns as f64))
}
/// Interval in nanoseconds between edges at a constant speed.
pub fn interval_for_rpm(rpm: f64, steps_per_revolution: usize) -> f64 {
    NS_PER_MINUTE / (rpm * steps_per_revolution as f64)
}
