use std::fs;
use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::analysis::{Baseline, DetrendMode, RunoutError, WindowFunction};

/// Parameters of the offline signal-processing pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Edges per full turn of the encoder disc.
    pub steps_per_revolution: usize,
    /// Visual amplification applied to the speed deviation.
    pub gain: f64,
    /// Requested transform size; the provider may round it up.
    pub fft_size: usize,
    pub window: WindowFunction,
    /// Detrend mode for the polar dataset.
    pub polar_mode: DetrendMode,
    /// Detrend mode for the signal fed to the spectral averager.
    pub spectrum_mode: DetrendMode,
    pub baseline: Baseline,
}
impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            steps_per_revolution: 500,
            gain: 10.0,
            fft_size: 8192,
            window: WindowFunction::Hamming,
            polar_mode: DetrendMode::Visual,
            spectrum_mode: DetrendMode::PhaseOnly,
            baseline: Baseline::Measured,
        }
    }
}

/// Offline capture sizes and the acquisition wait window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub wait_timeout_ms: u64,
    /// Pulse edges captured by the runout tool.
    pub capture_samples: usize,
    /// Pulse edges captured by calibration: ten revolutions plus lead-in.
    pub calibration_samples: usize,
}
impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            wait_timeout_ms: 1000,
            capture_samples: 10_000,
            calibration_samples: 5_500,
        }
    }
}
impl CaptureConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }
}

/// Live tachometer settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub pulse_timeout_ms: u64,
    /// The mark period is long, so this is about twice the pulse timeout.
    pub index_timeout_ms: u64,
    /// Revolutions of pulse edges per reported reading.
    pub buffer_revolutions: usize,
    /// Qualifying marks per reported index reading.
    pub index_buffer_marks: usize,
}
impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            pulse_timeout_ms: 1000,
            index_timeout_ms: 2000,
            buffer_revolutions: 5,
            index_buffer_marks: 5,
        }
    }
}
impl MonitorConfig {
    pub fn pulse_timeout(&self) -> Duration {
        Duration::from_millis(self.pulse_timeout_ms)
    }
    pub fn index_timeout(&self) -> Duration {
        Duration::from_millis(self.index_timeout_ms)
    }
}

/// Complete tool configuration, passed explicitly into every entry point.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub capture: CaptureConfig,
    pub monitor: MonitorConfig,
}
impl Config {
    /// Reads a JSON file; missing fields keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self, RunoutError> {
        let text = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
    pub fn validate(&self) -> Result<(), RunoutError> {
        let analysis = &self.analysis;
        if analysis.steps_per_revolution == 0 {
            return Err(RunoutError::InvalidConfig(
                "steps_per_revolution must be greater than zero".into(),
            ));
        }
        if !analysis.gain.is_finite() {
            return Err(RunoutError::InvalidConfig("gain must be finite".into()));
        }
        if analysis.fft_size < 2 {
            return Err(RunoutError::InvalidConfig(
                "fft_size must be at least 2".into(),
            ));
        }
        if let Baseline::Target { rpm } = analysis.baseline {
            if !(rpm.is_finite() && rpm > 0.0) {
                return Err(RunoutError::InvalidConfig(format!(
                    "target baseline must be a positive rpm, got {rpm}"
                )));
            }
        }
        if self.capture.capture_samples < 2 || self.capture.calibration_samples < 2 {
            return Err(RunoutError::InvalidConfig(
                "capture sizes must be at least 2 samples".into(),
            ));
        }
        let monitor = &self.monitor;
        if monitor.buffer_revolutions == 0 || monitor.index_buffer_marks < 2 {
            return Err(RunoutError::InvalidConfig(
                "monitor buffers need one revolution of pulses and two index marks".into(),
            ));
        }
        if monitor.pulse_timeout_ms == 0 || monitor.index_timeout_ms == 0 {
            return Err(RunoutError::InvalidConfig(
                "monitor timeouts must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
