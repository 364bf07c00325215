use std::time::Duration;
use log::{debug, warn};
use crate::acquisition::{EdgeSource, WaitOutcome};
use crate::analysis::RunoutError;
use crate::types::ChannelId;
/// Collects exactly `count` timestamps from one channel.
///
/// A wait timeout ends the capture early and is reported as
/// `InsufficientSamples`; a truncated capture is never handed on.
pub fn capture_channel<S: EdgeSource + ?Sized>(
    source: &mut S,
    channel: ChannelId,
    count: usize,
    timeout: Duration,
) -> Result<Vec<i64>, RunoutError> {
    let mut timestamps = Vec::with_capacity(count);
    while timestamps.len() < count {
        match source.wait_for_edges(timeout)? {
            WaitOutcome::Timeout => {
                warn!(
                    "{channel} capture timed out after {} of {count} edges",
                    timestamps.len()
                );
                return Err(RunoutError::InsufficientSamples {
                    needed: count,
                    got: timestamps.len(),
                });
            }
            WaitOutcome::Edges(edges) => {
                for edge in edges {
                    if edge.channel != channel {
                        debug!("ignoring {} edge during {channel} capture", edge.channel);
                        continue;
                    }
                    if timestamps.len() < count {
                        timestamps.push(edge.timestamp_ns);
                    }
                }
            }
        }
    }
    Ok(timestamps)
}
/// Pulse edges plus every index mark seen while they were gathered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CalibrationCapture {
    pub pulse_ns: Vec<i64>,
    pub marks_ns: Vec<i64>,
}
/// Pulse edges until `count` are in, keeping every index mark seen meanwhile.
///
/// Times out as `InsufficientSamples`, like `capture_channel`.
pub fn capture_calibration<S: EdgeSource + ?Sized>(
    source: &mut S,
    count: usize,
    timeout: Duration,
) -> Result<CalibrationCapture, RunoutError> {
    let mut capture = CalibrationCapture {
        pulse_ns: Vec::with_capacity(count),
        marks_ns: Vec::new(),
    };
    while capture.pulse_ns.len() < count {
        match source.wait_for_edges(timeout)? {
            WaitOutcome::Timeout => {
                warn!(
                    "calibration capture timed out after {} of {count} pulse edges",
                    capture.pulse_ns.len()
                );
                return Err(RunoutError::InsufficientSamples {
                    needed: count,
                    got: capture.pulse_ns.len(),
                });
            }
            WaitOutcome::Edges(edges) => {
                for edge in edges {
                    if capture.pulse_ns.len() >= count {
                        break;
                    }
                    match edge.channel {
                        ChannelId::Pulse => capture.pulse_ns.push(edge.timestamp_ns),
                        ChannelId::Index => capture.marks_ns.push(edge.timestamp_ns),
                    }
                }
            }
        }
    }
    debug!(
        "calibration capture: {} pulse edges, {} marks",
        capture.pulse_ns.len(),
        capture.marks_ns.len()
    );
    Ok(capture)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::ManualSource;
    use crate::types::EdgeSample;
    const WAIT: Duration = Duration::from_millis(1);
    #[test]
    fn capture_stops_at_count() {
        let mut source = ManualSource::new(vec![
            WaitOutcome::edges(ChannelId::Pulse, [10, 20, 30]),
            WaitOutcome::edges(ChannelId::Pulse, [40, 50, 60]),
        ]);
        let ts = capture_channel(&mut source, ChannelId::Pulse, 4, WAIT).unwrap();
        assert_eq!(ts, vec![10, 20, 30, 40]);
    }
    #[test]
    fn timeout_before_count_is_insufficient() {
        let mut source = ManualSource::new(vec![
            WaitOutcome::edges(ChannelId::Pulse, (0..600).map(|n| n * 200_000)),
            WaitOutcome::Timeout,
            WaitOutcome::edges(ChannelId::Pulse, [200_000_000]),
        ]);
        assert!(matches!(
            capture_channel(&mut source, ChannelId::Pulse, 1000, WAIT),
            Err(RunoutError::InsufficientSamples {
                needed: 1000,
                got: 600
            })
        ));
        // the edge after the timeout was never consumed
        assert_eq!(source.remaining(), 1);
    }
    #[test]
    fn calibration_timeout_is_insufficient() {
        let mut source = ManualSource::new(vec![
            WaitOutcome::Edges(vec![
                EdgeSample::new(ChannelId::Pulse, 1),
                EdgeSample::new(ChannelId::Index, 2),
            ]),
            WaitOutcome::Timeout,
        ]);
        assert!(matches!(
            capture_calibration(&mut source, 5, WAIT),
            Err(RunoutError::InsufficientSamples { needed: 5, got: 1 })
        ));
    }
    #[test]
    fn calibration_splits_channels() {
        let mut source = ManualSource::new(vec![WaitOutcome::Edges(vec![
            EdgeSample::new(ChannelId::Pulse, 1),
            EdgeSample::new(ChannelId::Index, 2),
            EdgeSample::new(ChannelId::Pulse, 3),
            EdgeSample::new(ChannelId::Pulse, 4),
        ])]);
        let capture = capture_calibration(&mut source, 2, WAIT).unwrap();
        assert_eq!(capture.pulse_ns, vec![1, 3]);
        assert_eq!(capture.marks_ns, vec![2]);
    }
    #[test]
    fn other_channel_ignored() {
        let mut source = ManualSource::new(vec![WaitOutcome::Edges(vec![
            EdgeSample::new(ChannelId::Index, 5),
            EdgeSample::new(ChannelId::Pulse, 6),
        ])]);
        let ts = capture_channel(&mut source, ChannelId::Pulse, 1, WAIT).unwrap();
        assert_eq!(ts, vec![6]);
    }
}
