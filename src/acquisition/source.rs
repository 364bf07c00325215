use std::collections::VecDeque;
use std::thread;
use std::time::Duration;
use crate::analysis::RunoutError;
use crate::types::{ChannelId, EdgeSample};
/// Result of one bounded wait for edge events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WaitOutcome {
    Edges(Vec<EdgeSample>),
    /// Nothing arrived within the wait window. Not end-of-stream, not data.
    Timeout,
}
impl WaitOutcome {
    pub fn edges(channel: ChannelId, timestamps_ns: impl IntoIterator<Item = i64>) -> Self {
        WaitOutcome::Edges(
            timestamps_ns
                .into_iter()
                .map(|t| EdgeSample::new(channel, t))
                .collect(),
        )
    }
}
/// Something that can block for the next batch of edge events.
pub trait EdgeSource {
    fn wait_for_edges(&mut self, timeout: Duration) -> Result<WaitOutcome, RunoutError>;
}
impl<S: EdgeSource + ?Sized> EdgeSource for Box<S> {
    fn wait_for_edges(&mut self, timeout: Duration) -> Result<WaitOutcome, RunoutError> {
        (**self).wait_for_edges(timeout)
    }
}
/// Scripted source for tests and deterministic playback.
///
/// Once the script is used up every wait sleeps out its timeout and reports
/// `Timeout`, like a line that has gone quiet.
pub struct ManualSource {
    queue: VecDeque<WaitOutcome>,
}
impl ManualSource {
    pub fn new(outcomes: impl IntoIterator<Item = WaitOutcome>) -> Self {
        Self {
            queue: outcomes.into_iter().collect(),
        }
    }
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}
impl EdgeSource for ManualSource {
    fn wait_for_edges(&mut self, timeout: Duration) -> Result<WaitOutcome, RunoutError> {
        match self.queue.pop_front() {
            Some(outcome) => Ok(outcome),
            None => {
                thread::sleep(timeout);
                Ok(WaitOutcome::Timeout)
            }
        }
    }
}
