use serde::{Deserialize, Serialize};
use crate::analysis::VelocityProfile;
/// How the baseline is handled when the speed deviation is amplified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetrendMode {
    /// `(v - baseline) * gain + baseline`: keeps the absolute RPM scale.
    Visual,
    /// `(v - baseline) * gain`: deviation only.
    PhaseOnly,
}
/// Speed the deviation is measured against.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// Mean RPM measured over the capture.
    Measured,
    /// Externally supplied target speed.
    Target { rpm: f64 },
}
impl Baseline {
    pub fn resolve(&self, measured_rpm: f64) -> f64 {
        match *self {
            Baseline::Measured => measured_rpm,
            Baseline::Target { rpm } => rpm,
        }
    }
}
#[derive(Clone, Copy, Debug)]
pub struct Detrend {
    pub mode: DetrendMode,
    pub gain: f64,
    pub baseline_rpm: f64,
}
impl Detrend {
    pub fn new(mode: DetrendMode, gain: f64, baseline_rpm: f64) -> Self {
        Self {
            mode,
            gain,
            baseline_rpm,
        }
    }
    pub fn apply_one(&self, v: f64) -> f64 {
        let deviation = (v - self.baseline_rpm) * self.gain;
        match self.mode {
            DetrendMode::Visual => deviation + self.baseline_rpm,
            DetrendMode::PhaseOnly => deviation,
        }
    }
    pub fn apply(&self, profile: &VelocityProfile) -> Vec<f64> {
        profile.rpm.iter().map(|&v| self.apply_one(v)).collect()
    }
}
