// src/cli.rs
// 命令行公共参数：边沿来源（回放文件或模拟圆盘）与配置覆盖
use std::path::PathBuf;
use clap::Args;
use log::info;
use crate::acquisition::{EdgeSource, ReplaySource, SimulatedDisc, SimulationParams};
use crate::analysis::{Baseline, RunoutError};
use crate::config::Config;
use crate::types::ChannelId;
/// Where edges come from.
#[derive(Args, Clone, Debug)]
pub struct SourceArgs {
    /// Replay a recorded edge log (`<channel> <timestamp_ns>` per line) instead of simulating.
    #[clap(long, env = "RUNOUT_REPLAY")]
    pub replay: Option<PathBuf>,
    /// Simulated disc speed.
    #[clap(long, default_value = "600.0")]
    pub sim_rpm: f64,
    /// Simulated once-per-revolution interval modulation (fraction of the nominal interval).
    #[clap(long, default_value = "0.002")]
    pub sim_eccentricity: f64,
    /// Simulated timing noise in nanoseconds.
    #[clap(long, default_value = "200.0")]
    pub sim_jitter: f64,
    /// Simulated index channel fires twice per revolution.
    #[clap(long)]
    pub sim_doubling: bool,
    /// Seed for the simulated timing noise.
    #[clap(long, default_value = "24301")]
    pub sim_seed: u64,
}
impl SourceArgs {
    pub fn simulation(&self, config: &Config, channels: &[ChannelId]) -> SimulationParams {
        SimulationParams {
            rpm: self.sim_rpm,
            steps_per_revolution: config.analysis.steps_per_revolution,
            eccentricity: self.sim_eccentricity,
            jitter_ns: self.sim_jitter,
            index_doubling: self.sim_doubling,
            seed: self.sim_seed,
            channels: channels.to_vec(),
            ..SimulationParams::default()
        }
    }
    /// Opens one source delivering edges of `channels`.
    pub fn open(
        &self,
        config: &Config,
        channels: &[ChannelId],
    ) -> Result<Box<dyn EdgeSource + Send>, RunoutError> {
        match &self.replay {
            Some(path) => {
                let only = match channels {
                    [single] => Some(*single),
                    _ => None,
                };
                Ok(Box::new(ReplaySource::from_path(path, only)?))
            }
            None => {
                let params = self.simulation(config, channels);
                info!(
                    "simulating {} rpm disc, eccentricity {}",
                    params.rpm, params.eccentricity
                );
                Ok(Box::new(SimulatedDisc::new(params)?))
            }
        }
    }
    /// Opens a source for a single channel, paced in real time when simulated.
    pub fn open_live(
        &self,
        config: &Config,
        channel: ChannelId,
    ) -> Result<Box<dyn EdgeSource + Send>, RunoutError> {
        match &self.replay {
            Some(path) => Ok(Box::new(ReplaySource::from_path(path, Some(channel))?)),
            None => {
                let params = SimulationParams {
                    realtime: true,
                    ..self.simulation(config, &[channel])
                };
                Ok(Box::new(SimulatedDisc::for_channel(&params, channel)?))
            }
        }
    }
}
/// Configuration file plus per-run overrides.
#[derive(Args, Clone, Debug, Default)]
pub struct ConfigArgs {
    /// JSON configuration file.
    #[clap(long, env = "RUNOUT_CONFIG")]
    pub config: Option<PathBuf>,
    /// Encoder steps per revolution.
    #[clap(long)]
    pub steps: Option<usize>,
    /// Amplification applied to speed deviations.
    #[clap(long)]
    pub gain: Option<f64>,
    /// Transform width (rounded up to a power of two).
    #[clap(long)]
    pub fft_size: Option<usize>,
    /// Compare against a fixed rpm instead of the measured average.
    #[clap(long)]
    pub target_rpm: Option<f64>,
}
impl ConfigArgs {
    pub fn load(&self) -> Result<Config, RunoutError> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };
        if let Some(steps) = self.steps {
            config.analysis.steps_per_revolution = steps;
        }
        if let Some(gain) = self.gain {
            config.analysis.gain = gain;
        }
        if let Some(fft_size) = self.fft_size {
            config.analysis.fft_size = fft_size;
        }
        if let Some(rpm) = self.target_rpm {
            config.analysis.baseline = Baseline::Target { rpm };
        }
        config.validate()?;
        Ok(config)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    #[derive(Parser)]
    struct Harness {
        #[clap(flatten)]
        source: SourceArgs,
        #[clap(flatten)]
        config: ConfigArgs,
    }
    #[test]
    fn overrides_apply_on_top_of_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"analysis":{{"gain":4.0,"fft_size":1024}}}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_owned();
        let args = Harness::parse_from(["t", "--config", &path, "--steps", "360"]);
        let config = args.config.load().unwrap();
        assert_eq!(config.analysis.steps_per_revolution, 360);
        assert_eq!(config.analysis.gain, 4.0);
        assert_eq!(config.analysis.fft_size, 1024);
    }
    #[test]
    fn invalid_override_is_rejected() {
        let args = Harness::parse_from(["t", "--steps", "0"]);
        assert!(matches!(
            args.config.load(),
            Err(RunoutError::InvalidConfig(_))
        ));
    }
    #[test]
    fn simulation_follows_config_steps() {
        let args = Harness::parse_from(["t", "--sim-rpm", "33.3", "--steps", "200"]);
        let config = args.config.load().unwrap();
        let params = args.source.simulation(&config, &[ChannelId::Pulse]);
        assert_eq!(params.rpm, 33.3);
        assert_eq!(params.steps_per_revolution, 200);
        assert_eq!(params.channels, vec![ChannelId::Pulse]);
    }
}
