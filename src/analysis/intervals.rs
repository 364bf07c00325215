use crate::analysis::RunoutError;
use crate::types::RevolutionMark;
/// Successive differences of an edge timestamp sequence, in nanoseconds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalSeries {
    intervals_ns: Vec<i64>,
}
impl IntervalSeries {
    pub fn from_intervals(intervals_ns: Vec<i64>) -> Self {
        Self { intervals_ns }
    }
    pub fn as_slice(&self) -> &[i64] {
        &self.intervals_ns
    }
    pub fn len(&self) -> usize {
        self.intervals_ns.len()
    }
    pub fn is_empty(&self) -> bool {
        self.intervals_ns.is_empty()
    }
    /// Mean interval, or `None` for an empty series.
    pub fn mean_ns(&self) -> Option<f64> {
        if self.intervals_ns.is_empty() {
            return None;
        }
        let total: i64 = self.intervals_ns.iter().sum();
        Some(total as f64 / self.intervals_ns.len() as f64)
    }
    /// Rejects zero or negative durations, which mean an acquisition fault.
    pub fn validate(&self) -> Result<(), RunoutError> {
        match self
            .intervals_ns
            .iter()
            .enumerate()
            .find(|(_, &interval)| interval <= 0)
        {
            Some((index, &interval_ns)) => Err(RunoutError::InvalidSample { index, interval_ns }),
            None => Ok(()),
        }
    }
}
/// Capture duration plus the interval series of a timestamp sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedIntervals {
    pub duration_ns: i64,
    pub intervals: IntervalSeries,
}
/// Turns `n >= 2` ordered timestamps into `n - 1` intervals.
pub fn extract_intervals(timestamps_ns: &[i64]) -> Result<ExtractedIntervals, RunoutError> {
    let (Some(first), Some(last)) = (timestamps_ns.first(), timestamps_ns.last()) else {
        return Err(RunoutError::InsufficientSamples {
            needed: 2,
            got: 0,
        });
    };
    if timestamps_ns.len() < 2 {
        return Err(RunoutError::InsufficientSamples {
            needed: 2,
            got: timestamps_ns.len(),
        });
    }
    let intervals_ns = timestamps_ns.windows(2).map(|w| w[1] - w[0]).collect();
    Ok(ExtractedIntervals {
        duration_ns: last - first,
        intervals: IntervalSeries::from_intervals(intervals_ns),
    })
}
/// Drops the lead-in: every timestamp at or before the mark.
pub fn trim_to_mark(timestamps_ns: &[i64], mark: RevolutionMark) -> &[i64] {
    let start = timestamps_ns.partition_point(|&t| t <= mark.0);
    &timestamps_ns[start..]
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn intervals_are_successive_differences() {
        let ts = [100, 250, 260, 1_000, 1_001];
        let extracted = extract_intervals(&ts).unwrap();
        assert_eq!(extracted.duration_ns, 901);
        assert_eq!(extracted.intervals.len(), ts.len() - 1);
        for (i, interval) in extracted.intervals.as_slice().iter().enumerate() {
            assert_eq!(*interval, ts[i + 1] - ts[i]);
        }
    }
    #[test]
    fn fewer_than_two_samples_is_insufficient() {
        assert!(matches!(
            extract_intervals(&[]),
            Err(RunoutError::InsufficientSamples { got: 0, .. })
        ));
        assert!(matches!(
            extract_intervals(&[42]),
            Err(RunoutError::InsufficientSamples { got: 1, .. })
        ));
    }
    #[test]
    fn trim_discards_up_to_and_including_mark() {
        let ts = [10, 20, 30, 40, 50];
        assert_eq!(trim_to_mark(&ts, RevolutionMark(30)), &[40, 50]);
        assert_eq!(trim_to_mark(&ts, RevolutionMark(35)), &[40, 50]);
        assert_eq!(trim_to_mark(&ts, RevolutionMark(5)), &ts[..]);
        assert!(trim_to_mark(&ts, RevolutionMark(50)).is_empty());
    }
    #[test]
    fn validate_flags_non_positive_interval() {
        let extracted = extract_intervals(&[0, 10, 10, 25]).unwrap();
        assert!(matches!(
            extracted.intervals.validate(),
            Err(RunoutError::InvalidSample {
                index: 1,
                interval_ns: 0
            })
        ));
        assert_eq!(extracted.intervals.mean_ns(), Some(25.0 / 3.0));
    }
}
