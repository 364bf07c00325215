use log::warn;
use crate::analysis::IntervalSeries;
/// Mean interval per step position, folded over every captured revolution.
///
/// Per-revolution timing jitter averages out, leaving the repeatable mechanical
/// signature of the disc. A bucket that received no interval is `NaN`.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseProfile {
    pub mean_interval_ns: Vec<f64>,
    pub counts: Vec<usize>,
    pub angle_increment: f64,
}
impl PhaseProfile {
    pub fn len(&self) -> usize {
        self.mean_interval_ns.len()
    }
    pub fn is_empty(&self) -> bool {
        self.mean_interval_ns.is_empty()
    }
    /// Every bucket has at least one contributing interval.
    pub fn is_complete(&self) -> bool {
        self.counts.iter().all(|&c| c > 0)
    }
    pub fn polar_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.mean_interval_ns
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64 * self.angle_increment, v))
    }
}
struct PhaseBucket {
    sum_ns: i64,
    count: usize,
}
pub fn phase_average(intervals: &IntervalSeries, steps_per_revolution: usize) -> PhaseProfile {
    let mut buckets: Vec<PhaseBucket> = (0..steps_per_revolution)
        .map(|_| PhaseBucket { sum_ns: 0, count: 0 })
        .collect();
    if steps_per_revolution > 0 {
        for (i, &interval) in intervals.as_slice().iter().enumerate() {
            let bucket = &mut buckets[i % steps_per_revolution];
            bucket.sum_ns += interval;
            bucket.count += 1;
        }
    }
    if intervals.len() < steps_per_revolution {
        warn!(
            "phase average over {} intervals leaves {} of {} buckets empty",
            intervals.len(),
            steps_per_revolution - intervals.len(),
            steps_per_revolution
        );
    }
    PhaseProfile {
        mean_interval_ns: buckets
            .iter()
            .map(|b| {
                if b.count == 0 {
                    f64::NAN
                } else {
                    b.sum_ns as f64 / b.count as f64
                }
            })
            .collect(),
        counts: buckets.iter().map(|b| b.count).collect(),
        angle_increment: std::f64::consts::TAU / steps_per_revolution.max(1) as f64,
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn jitter_free_input_gives_constant_buckets() {
        let series = IntervalSeries::from_intervals(vec![200_000; 3 * 500]);
        let profile = phase_average(&series, 500);
        assert_eq!(profile.len(), 500);
        assert!(profile.is_complete());
        assert!(profile.mean_interval_ns.iter().all(|&m| m == 200_000.0));
        assert!(profile.counts.iter().all(|&c| c == 3));
    }
    #[test]
    fn buckets_hold_arithmetic_mean() {
        // Three revolutions of four steps with per-revolution jitter.
        let series = IntervalSeries::from_intervals(vec![
            100, 200, 300, 400, //
            110, 190, 300, 405, //
            93, 210, 301, 400,
        ]);
        let profile = phase_average(&series, 4);
        assert_eq!(profile.mean_interval_ns[0], 101.0);
        assert_eq!(profile.mean_interval_ns[1], 200.0);
        assert_eq!(profile.mean_interval_ns[2], 901.0 / 3.0);
        assert_eq!(profile.mean_interval_ns[3], 1205.0 / 3.0);
    }
    #[test]
    fn partial_revolution_leaves_nan_buckets() {
        let series = IntervalSeries::from_intervals(vec![10, 20, 30, 40, 50, 60]);
        let profile = phase_average(&series, 4);
        assert_eq!(profile.mean_interval_ns[0], 30.0);
        assert_eq!(profile.mean_interval_ns[1], 40.0);
        assert_eq!(profile.counts[2], 1);
        let short = IntervalSeries::from_intervals(vec![10, 20]);
        let profile = phase_average(&short, 4);
        assert!(!profile.is_complete());
        assert!(profile.mean_interval_ns[2].is_nan());
        assert!(profile.mean_interval_ns[3].is_nan());
    }
}
