use std::collections::VecDeque;
use std::f64::consts::TAU;
use std::thread;
use std::time::{Duration, Instant};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use crate::acquisition::{EdgeSource, WaitOutcome};
use crate::analysis::{interval_for_rpm, RunoutError};
use crate::types::{ChannelId, EdgeSample};
/// Synthetic encoder disc used in place of the GPIO lines.
#[derive(Clone, Debug)]
pub struct SimulationParams {
    pub rpm: f64,
    pub steps_per_revolution: usize,
    /// Once-per-revolution interval modulation, as a fraction of the nominal interval.
    pub eccentricity: f64,
    /// Uniform timing noise, +/- this many nanoseconds per interval.
    pub jitter_ns: f64,
    /// Index channel fires a second, close edge every revolution.
    pub index_doubling: bool,
    pub start_ns: i64,
    pub seed: u64,
    /// Upper bound on edges handed out per wait.
    pub batch_size: usize,
    /// Pulse steps generated before the signal disappears.
    pub signal_lost_after: Option<usize>,
    /// Deliver edges at their simulated wall-clock time.
    pub realtime: bool,
    pub channels: Vec<ChannelId>,
}
impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            rpm: 600.0,
            steps_per_revolution: 500,
            eccentricity: 0.002,
            jitter_ns: 200.0,
            index_doubling: false,
            start_ns: 1_000_000_000,
            seed: 0x5eed,
            batch_size: 64,
            signal_lost_after: None,
            realtime: false,
            channels: vec![ChannelId::Pulse, ChannelId::Index],
        }
    }
}
pub struct SimulatedDisc {
    params: SimulationParams,
    rng: StdRng,
    nominal_interval_ns: f64,
    step: usize,
    time_ns: f64,
    pending: VecDeque<EdgeSample>,
    epoch: Option<(Instant, i64)>,
}
impl SimulatedDisc {
    pub fn new(params: SimulationParams) -> Result<Self, RunoutError> {
        if !(params.rpm.is_finite() && params.rpm > 0.0) || params.steps_per_revolution == 0 {
            return Err(RunoutError::InvalidArgument(format!(
                "simulated disc needs a positive speed and step count, got {} rpm / {} steps",
                params.rpm, params.steps_per_revolution
            )));
        }
        if params.eccentricity.abs() >= 0.5 || params.batch_size == 0 {
            return Err(RunoutError::InvalidArgument(
                "simulated eccentricity must be below 0.5 and batch size non-zero".into(),
            ));
        }
        let nominal_interval_ns = interval_for_rpm(params.rpm, params.steps_per_revolution);
        if params.jitter_ns < 0.0 || params.jitter_ns >= nominal_interval_ns / 4.0 {
            return Err(RunoutError::InvalidArgument(format!(
                "simulated jitter {} ns out of range for {nominal_interval_ns:.0} ns steps",
                params.jitter_ns
            )));
        }
        info!(
            "simulated disc: {} rpm, {} steps, eccentricity {}, channels {:?}",
            params.rpm, params.steps_per_revolution, params.eccentricity, params.channels
        );
        Ok(Self {
            rng: StdRng::seed_from_u64(params.seed),
            nominal_interval_ns,
            step: 0,
            time_ns: params.start_ns as f64,
            pending: VecDeque::new(),
            epoch: None,
            params,
        })
    }
    /// Same disc restricted to one channel, for the per-channel monitor loops.
    pub fn for_channel(params: &SimulationParams, channel: ChannelId) -> Result<Self, RunoutError> {
        Self::new(SimulationParams {
            channels: vec![channel],
            ..params.clone()
        })
    }
    fn signal_lost(&self) -> bool {
        self.params
            .signal_lost_after
            .is_some_and(|limit| self.step >= limit)
    }
    fn emits(&self, channel: ChannelId) -> bool {
        self.params.channels.contains(&channel)
    }
    /// Advances one pulse step, queueing whichever edges this source emits.
    fn advance(&mut self) {
        let steps = self.params.steps_per_revolution;
        let position = self.step % steps;
        let t = self.time_ns;
        if self.emits(ChannelId::Pulse) {
            self.pending
                .push_back(EdgeSample::new(ChannelId::Pulse, t.round() as i64));
        }
        let mark_offset = self.nominal_interval_ns / 4.0;
        let doubled = self.params.index_doubling && steps > 2 && position == 2;
        if self.emits(ChannelId::Index) && (position == 0 || doubled) {
            self.pending.push_back(EdgeSample::new(
                ChannelId::Index,
                (t + mark_offset).round() as i64,
            ));
        }
        let phase = TAU * position as f64 / steps as f64;
        let jitter = if self.params.jitter_ns > 0.0 {
            self.rng
                .gen_range(-self.params.jitter_ns..=self.params.jitter_ns)
        } else {
            0.0
        };
        self.time_ns +=
            self.nominal_interval_ns * (1.0 + self.params.eccentricity * phase.sin()) + jitter;
        self.step += 1;
    }
    /// Ensures at least `want` edges are queued unless the signal is gone.
    fn refill(&mut self, want: usize) {
        if self.params.channels.is_empty() {
            return;
        }
        while self.pending.len() < want && !self.signal_lost() {
            self.advance();
        }
    }
    fn wait_realtime(&mut self, timeout: Duration) -> WaitOutcome {
        self.refill(1);
        let Some(first) = self.pending.front().copied() else {
            thread::sleep(timeout);
            return WaitOutcome::Timeout;
        };
        let (epoch, epoch_ns) = *self
            .epoch
            .get_or_insert_with(|| (Instant::now(), first.timestamp_ns));
        let due = |ts: i64| epoch + Duration::from_nanos((ts - epoch_ns).max(0) as u64);
        let first_due = due(first.timestamp_ns);
        let now = Instant::now();
        if first_due > now + timeout {
            thread::sleep(timeout);
            return WaitOutcome::Timeout;
        }
        if first_due > now {
            thread::sleep(first_due - now);
        }
        let now = Instant::now();
        let mut batch = Vec::new();
        while batch.len() < self.params.batch_size {
            self.refill(1);
            match self.pending.front() {
                Some(edge) if batch.is_empty() || due(edge.timestamp_ns) <= now => {
                    batch.push(*edge);
                    self.pending.pop_front();
                }
                _ => break,
            }
        }
        WaitOutcome::Edges(batch)
    }
}
impl EdgeSource for SimulatedDisc {
    fn wait_for_edges(&mut self, timeout: Duration) -> Result<WaitOutcome, RunoutError> {
        if self.params.realtime {
            return Ok(self.wait_realtime(timeout));
        }
        self.refill(self.params.batch_size);
        if self.pending.is_empty() {
            debug!("simulated signal lost at step {}", self.step);
            thread::sleep(timeout);
            return Ok(WaitOutcome::Timeout);
        }
        let take = self.params.batch_size.min(self.pending.len());
        Ok(WaitOutcome::Edges(self.pending.drain(..take).collect()))
    }
}
