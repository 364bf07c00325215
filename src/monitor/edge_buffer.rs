use std::collections::VecDeque;
use std::time::Duration;
use log::debug;
use crate::acquisition::{EdgeSource, WaitOutcome};
use crate::analysis::RunoutError;
use crate::types::ChannelId;
/// Which raw edges of a channel are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeFilter {
    All,
    /// Every other edge, restarting with the next edge after a timeout.
    /// Undoes a mark channel that fires twice per revolution.
    Alternate,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillOutcome {
    Full,
    /// A wait expired; the partial buffer was discarded.
    Timeout,
}
/// Fixed-size timestamp buffer for one channel, refilled once per reading.
pub struct EdgeBuffer {
    channel: ChannelId,
    capacity: usize,
    filter: EdgeFilter,
    keep_next: bool,
    timestamps: Vec<i64>,
    carry: VecDeque<i64>,
}
impl EdgeBuffer {
    pub fn new(channel: ChannelId, capacity: usize, filter: EdgeFilter) -> Self {
        Self {
            channel,
            capacity,
            filter,
            keep_next: true,
            timestamps: Vec::with_capacity(capacity),
            carry: VecDeque::new(),
        }
    }
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }
    /// Blocks until the buffer is full or one wait times out.
    ///
    /// Edges arriving beyond capacity are carried into the next fill.
    pub fn fill<S: EdgeSource + ?Sized>(
        &mut self,
        source: &mut S,
        timeout: Duration,
    ) -> Result<FillOutcome, RunoutError> {
        self.timestamps.clear();
        while self.timestamps.len() < self.capacity {
            let Some(t) = self.carry.pop_front() else {
                break;
            };
            self.offer(t);
        }
        while self.timestamps.len() < self.capacity {
            match source.wait_for_edges(timeout)? {
                WaitOutcome::Timeout => {
                    self.timestamps.clear();
                    self.carry.clear();
                    self.keep_next = true;
                    return Ok(FillOutcome::Timeout);
                }
                WaitOutcome::Edges(edges) => {
                    for edge in edges {
                        if edge.channel != self.channel {
                            debug!("{} buffer ignoring {} edge", self.channel, edge.channel);
                            continue;
                        }
                        if self.timestamps.len() < self.capacity {
                            self.offer(edge.timestamp_ns);
                        } else {
                            self.carry.push_back(edge.timestamp_ns);
                        }
                    }
                }
            }
        }
        Ok(FillOutcome::Full)
    }
    fn offer(&mut self, timestamp_ns: i64) {
        match self.filter {
            EdgeFilter::All => self.timestamps.push(timestamp_ns),
            EdgeFilter::Alternate => {
                if self.keep_next {
                    self.timestamps.push(timestamp_ns);
                }
                self.keep_next = !self.keep_next;
            }
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::ManualSource;
    const WAIT: Duration = Duration::from_millis(1);
    #[test]
    fn overflow_carries_into_next_fill() {
        let mut source = ManualSource::new(vec![WaitOutcome::edges(
            ChannelId::Pulse,
            [1, 2, 3, 4, 5],
        )]);
        let mut buffer = EdgeBuffer::new(ChannelId::Pulse, 3, EdgeFilter::All);
        assert_eq!(buffer.fill(&mut source, WAIT).unwrap(), FillOutcome::Full);
        assert_eq!(buffer.timestamps(), &[1, 2, 3]);
        let mut source = ManualSource::new(vec![WaitOutcome::edges(ChannelId::Pulse, [6])]);
        assert_eq!(buffer.fill(&mut source, WAIT).unwrap(), FillOutcome::Full);
        assert_eq!(buffer.timestamps(), &[4, 5, 6]);
    }
    #[test]
    fn alternate_filter_keeps_every_other_edge() {
        let mut source = ManualSource::new(vec![
            WaitOutcome::edges(ChannelId::Index, [100, 102]),
            WaitOutcome::edges(ChannelId::Index, [200, 202, 300]),
        ]);
        let mut buffer = EdgeBuffer::new(ChannelId::Index, 3, EdgeFilter::Alternate);
        assert_eq!(buffer.fill(&mut source, WAIT).unwrap(), FillOutcome::Full);
        assert_eq!(buffer.timestamps(), &[100, 200, 300]);
        // alternation continues across buffers: 302 is the twin of 300
        let mut source = ManualSource::new(vec![WaitOutcome::edges(
            ChannelId::Index,
            [302, 400, 402, 500, 502, 600],
        )]);
        assert_eq!(buffer.fill(&mut source, WAIT).unwrap(), FillOutcome::Full);
        assert_eq!(buffer.timestamps(), &[400, 500, 600]);
    }
    #[test]
    fn timeout_discards_partial_buffer() {
        let mut source = ManualSource::new(vec![
            WaitOutcome::edges(ChannelId::Pulse, [1, 2]),
            WaitOutcome::Timeout,
            WaitOutcome::edges(ChannelId::Pulse, [10, 20, 30]),
        ]);
        let mut buffer = EdgeBuffer::new(ChannelId::Pulse, 3, EdgeFilter::All);
        assert_eq!(buffer.fill(&mut source, WAIT).unwrap(), FillOutcome::Timeout);
        assert!(buffer.timestamps().is_empty());
        assert_eq!(buffer.fill(&mut source, WAIT).unwrap(), FillOutcome::Full);
        assert_eq!(buffer.timestamps(), &[10, 20, 30]);
    }
}
