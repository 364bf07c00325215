use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::thread;
use std::time::Duration;
use log::info;
use crate::acquisition::{EdgeSource, WaitOutcome};
use crate::analysis::RunoutError;
use crate::types::{ChannelId, EdgeSample};
const REPLAY_BATCH: usize = 64;
/// Plays back a recorded edge log of `<channel> <timestamp_ns>` lines.
pub struct ReplaySource {
    edges: VecDeque<EdgeSample>,
}
impl ReplaySource {
    pub fn from_path(path: &Path, only: Option<ChannelId>) -> Result<Self, RunoutError> {
        let file = File::open(path).map_err(|e| {
            RunoutError::AcquisitionFailure(format!("cannot open {}: {e}", path.display()))
        })?;
        let source = Self::from_reader(BufReader::new(file), only)?;
        info!(
            "replaying {} edges from {}",
            source.edges.len(),
            path.display()
        );
        Ok(source)
    }
    pub fn from_reader<R: BufRead>(reader: R, only: Option<ChannelId>) -> Result<Self, RunoutError> {
        let mut edges = VecDeque::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let edge = parse_line(line).map_err(|reason| {
                RunoutError::AcquisitionFailure(format!("edge log line {}: {reason}", number + 1))
            })?;
            if only.map_or(true, |c| c == edge.channel) {
                edges.push_back(edge);
            }
        }
        Ok(Self { edges })
    }
    pub fn len(&self) -> usize {
        self.edges.len()
    }
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
fn parse_line(line: &str) -> Result<EdgeSample, String> {
    let mut fields = line.split_whitespace();
    let (Some(channel), Some(timestamp), None) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(format!("expected '<channel> <timestamp_ns>', got '{line}'"));
    };
    let channel: ChannelId = channel.parse().map_err(|e: RunoutError| e.to_string())?;
    let timestamp_ns = timestamp
        .parse::<i64>()
        .map_err(|e| format!("bad timestamp '{timestamp}': {e}"))?;
    Ok(EdgeSample::new(channel, timestamp_ns))
}
impl EdgeSource for ReplaySource {
    fn wait_for_edges(&mut self, timeout: Duration) -> Result<WaitOutcome, RunoutError> {
        if self.edges.is_empty() {
            thread::sleep(timeout);
            return Ok(WaitOutcome::Timeout);
        }
        let take = REPLAY_BATCH.min(self.edges.len());
        Ok(WaitOutcome::Edges(self.edges.drain(..take).collect()))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use crate::acquisition::capture::capture_calibration;
    #[test]
    fn parses_log_and_skips_comments() {
        let log = "# recorded on the bench\npulse 100\nindex 150\n\npulse 300\n";
        let mut source = ReplaySource::from_reader(Cursor::new(log), None).unwrap();
        assert_eq!(source.len(), 3);
        let capture = capture_calibration(&mut source, 2, Duration::from_millis(1)).unwrap();
        assert_eq!(capture.pulse_ns, vec![100, 300]);
        assert_eq!(capture.marks_ns, vec![150]);
    }
    #[test]
    fn channel_filter_applies() {
        let log = "pulse 1\nid 2\npulse 3\n";
        let source = ReplaySource::from_reader(Cursor::new(log), Some(ChannelId::Index)).unwrap();
        assert_eq!(source.len(), 1);
    }
    #[test]
    fn malformed_line_reports_number() {
        let err = ReplaySource::from_reader(Cursor::new("pulse 1\npulse x\n"), None)
            .err()
            .unwrap();
        assert!(err.to_string().contains("line 2"));
    }
    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pulse 10\npulse 20").unwrap();
        let mut source = ReplaySource::from_path(file.path(), Some(ChannelId::Pulse)).unwrap();
        assert!(!source.is_empty());
        let wait = Duration::from_millis(1);
        assert!(matches!(source.wait_for_edges(wait).unwrap(), WaitOutcome::Edges(e) if e.len() == 2));
        assert!(source.is_empty());
        assert_eq!(source.wait_for_edges(wait).unwrap(), WaitOutcome::Timeout);
    }
    #[test]
    fn missing_file_is_acquisition_failure() {
        assert!(matches!(
            ReplaySource::from_path(Path::new("/nonexistent/edges.log"), None),
            Err(RunoutError::AcquisitionFailure(_))
        ));
    }
}
