use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use log::{debug, error, info, warn};
use crate::acquisition::EdgeSource;
use crate::analysis::{average_rpm, RunoutError};
use crate::config::MonitorConfig;
use crate::monitor::edge_buffer::{EdgeBuffer, EdgeFilter, FillOutcome};
use crate::monitor::stats::LiveStats;
use crate::types::ChannelId;
/// Messages from the monitor loops to whoever displays them.
#[derive(Clone, Debug, PartialEq)]
pub enum MonitorReport {
    Rpm { channel: ChannelId, rpm: f64 },
    /// A wait expired before the buffer filled.
    NoSignal(ChannelId),
    /// Pulse loop extrema, sent once when the loop stops.
    Final(LiveStats),
}
/// One-way stop request shared by the controller and both loops.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);
impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Release);
    }
    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
#[derive(Clone, Copy, Debug)]
pub struct LoopSettings {
    pub buffer_len: usize,
    pub timeout: Duration,
}
impl LoopSettings {
    pub fn pulse(config: &MonitorConfig, steps_per_revolution: usize) -> Self {
        Self {
            buffer_len: steps_per_revolution * config.buffer_revolutions,
            timeout: config.pulse_timeout(),
        }
    }
    pub fn index(config: &MonitorConfig) -> Self {
        Self {
            buffer_len: config.index_buffer_marks,
            timeout: config.index_timeout(),
        }
    }
    /// A reading needs at least two edges to span a duration.
    pub fn validate(&self, channel: ChannelId) -> Result<(), RunoutError> {
        if self.buffer_len < 2 {
            return Err(RunoutError::InvalidConfig(format!(
                "{channel} monitor buffer holds {} edges, at least 2 are needed",
                self.buffer_len
            )));
        }
        Ok(())
    }
}
/// Pulse-channel tachometer.
///
/// Fills a buffer, reports its average speed and folds it into the running
/// extrema; a timeout reports `NoSignal` and starts a fresh buffer. The stop
/// signal is only checked between buffers.
pub fn run_pulse_loop<S: EdgeSource + ?Sized>(
    source: &mut S,
    settings: LoopSettings,
    steps_per_revolution: usize,
    stop: &StopSignal,
    reports: &Sender<MonitorReport>,
) -> Result<LiveStats, RunoutError> {
    settings.validate(ChannelId::Pulse)?;
    let mut buffer = EdgeBuffer::new(ChannelId::Pulse, settings.buffer_len, EdgeFilter::All);
    let mut stats = LiveStats::default();
    loop {
        let outcome = buffer.fill(source, settings.timeout)?;
        if stop.is_stop_requested() {
            info!("pulse loop stopping: {stats}");
            reports.send(MonitorReport::Final(stats)).ok();
            return Ok(stats);
        }
        match outcome {
            FillOutcome::Timeout => {
                reports.send(MonitorReport::NoSignal(ChannelId::Pulse)).ok();
            }
            FillOutcome::Full => {
                let ts = buffer.timestamps();
                match average_rpm(ts.len(), ts[ts.len() - 1] - ts[0], steps_per_revolution) {
                    Ok(rpm) => {
                        stats.record(rpm);
                        reports
                            .send(MonitorReport::Rpm {
                                channel: ChannelId::Pulse,
                                rpm,
                            })
                            .ok();
                    }
                    Err(e) => warn!("pulse buffer rejected: {e}"),
                }
            }
        }
    }
}
/// Index-channel tachometer: one qualifying mark per revolution, the doubled
/// edge filtered out.
pub fn run_index_loop<S: EdgeSource + ?Sized>(
    source: &mut S,
    settings: LoopSettings,
    stop: &StopSignal,
    reports: &Sender<MonitorReport>,
) -> Result<(), RunoutError> {
    settings.validate(ChannelId::Index)?;
    let mut buffer = EdgeBuffer::new(ChannelId::Index, settings.buffer_len, EdgeFilter::Alternate);
    loop {
        let outcome = buffer.fill(source, settings.timeout)?;
        if stop.is_stop_requested() {
            debug!("index loop stopping");
            return Ok(());
        }
        match outcome {
            FillOutcome::Timeout => {
                reports.send(MonitorReport::NoSignal(ChannelId::Index)).ok();
            }
            FillOutcome::Full => {
                let ts = buffer.timestamps();
                match average_rpm(ts.len(), ts[ts.len() - 1] - ts[0], 1) {
                    Ok(rpm) => {
                        reports
                            .send(MonitorReport::Rpm {
                                channel: ChannelId::Index,
                                rpm,
                            })
                            .ok();
                    }
                    Err(e) => warn!("index buffer rejected: {e}"),
                }
            }
        }
    }
}
/// Both monitor loops running on their own threads.
pub struct MonitorHandle {
    stop: StopSignal,
    pulse: JoinHandle<Result<LiveStats, RunoutError>>,
    index: JoinHandle<Result<(), RunoutError>>,
}
impl MonitorHandle {
    /// Requests a stop and waits until both loops have finished.
    pub fn stop_and_join(self) -> Result<LiveStats, RunoutError> {
        self.stop.request_stop();
        let pulse = self
            .pulse
            .join()
            .map_err(|_| RunoutError::MonitorPanicked(ChannelId::Pulse))?;
        let index = self
            .index
            .join()
            .map_err(|_| RunoutError::MonitorPanicked(ChannelId::Index))?;
        let stats = pulse?;
        index?;
        Ok(stats)
    }
}
/// Spawns the pulse and index loops; they share nothing but the stop signal.
pub fn start_monitor<P, I>(
    mut pulse_source: P,
    mut index_source: I,
    config: &MonitorConfig,
    steps_per_revolution: usize,
    reports: Sender<MonitorReport>,
) -> Result<MonitorHandle, RunoutError>
where
    P: EdgeSource + Send + 'static,
    I: EdgeSource + Send + 'static,
{
    let pulse_settings = LoopSettings::pulse(config, steps_per_revolution);
    let index_settings = LoopSettings::index(config);
    pulse_settings.validate(ChannelId::Pulse)?;
    index_settings.validate(ChannelId::Index)?;
    let stop = StopSignal::new();
    let pulse = {
        let stop = stop.clone();
        let reports = reports.clone();
        thread::Builder::new()
            .name("tacho-pulse".into())
            .spawn(move || {
                let result = run_pulse_loop(
                    &mut pulse_source,
                    pulse_settings,
                    steps_per_revolution,
                    &stop,
                    &reports,
                );
                if let Err(e) = &result {
                    error!("pulse loop failed: {e}");
                }
                result
            })?
    };
    let index = {
        let stop = stop.clone();
        thread::Builder::new()
            .name("tacho-index".into())
            .spawn(move || {
                let result = run_index_loop(&mut index_source, index_settings, &stop, &reports);
                if let Err(e) = &result {
                    error!("index loop failed: {e}");
                }
                result
            })?
    };
    Ok(MonitorHandle { stop, pulse, index })
}
