use log::{debug, info};
use crate::analysis::detrend::Detrend;
use crate::analysis::intervals::{extract_intervals, trim_to_mark};
use crate::analysis::phase::{phase_average, PhaseProfile};
use crate::analysis::spectrum::{average_spectrum, step_sample_rate_hz, Spectrum};
use crate::analysis::velocity::{average_rpm, VelocityProfile};
use crate::analysis::{RunoutError, SpectralTransform};
use crate::config::AnalysisConfig;
use crate::types::RevolutionMark;
/// Speed profile and averaged spectrum of one pulse-channel capture.
#[derive(Clone, Debug)]
pub struct RunoutReport {
    pub interval_count: usize,
    pub duration_ns: i64,
    pub mean_interval_ns: f64,
    pub rpm: f64,
    pub baseline_rpm: f64,
    pub gain: f64,
    pub velocity: VelocityProfile,
    /// Detrended with the polar mode, paired with `velocity.angle_increment`.
    pub polar: Vec<f64>,
    pub spectrum: Spectrum,
}
impl RunoutReport {
    pub fn polar_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let step = self.velocity.angle_increment;
        self.polar
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i as f64 * step, v))
    }
}
/// Full runout analysis: intervals, velocity, amplified polar trace and spectrum.
pub fn analyse_runout<T: SpectralTransform + ?Sized>(
    timestamps_ns: &[i64],
    config: &AnalysisConfig,
    transform: &T,
) -> Result<RunoutReport, RunoutError> {
    let steps = config.steps_per_revolution;
    let extracted = extract_intervals(timestamps_ns)?;
    let rpm = average_rpm(timestamps_ns.len(), extracted.duration_ns, steps)?;
    let velocity = VelocityProfile::from_intervals(&extracted.intervals, steps)?;
    let baseline_rpm = config.baseline.resolve(rpm);
    info!(
        "{} intervals over {} ns, {rpm:.3} rpm",
        extracted.intervals.len(),
        extracted.duration_ns
    );
    let polar = Detrend::new(config.polar_mode, config.gain, baseline_rpm).apply(&velocity);
    let deviation = Detrend::new(config.spectrum_mode, config.gain, baseline_rpm).apply(&velocity);
    let averaged = average_spectrum(&deviation, transform)?;
    let bin_hz = step_sample_rate_hz(rpm, steps) / transform.width() as f64;
    debug!("{} segments, {bin_hz:.4} Hz per bin", averaged.segments);
    Ok(RunoutReport {
        interval_count: extracted.intervals.len(),
        duration_ns: extracted.duration_ns,
        mean_interval_ns: extracted.intervals.mean_ns().unwrap_or(f64::NAN),
        rpm,
        baseline_rpm,
        gain: config.gain,
        velocity,
        polar,
        spectrum: averaged.with_bin_spacing(bin_hz),
    })
}
/// One idealised revolution of the disc, aligned to the index mark.
#[derive(Clone, Debug)]
pub struct CalibrationReport {
    /// Speed over the whole capture, lead-in included.
    pub rpm: f64,
    pub mark: RevolutionMark,
    pub trimmed_samples: usize,
    pub profile: PhaseProfile,
}
pub fn calibrate(
    pulse_ns: &[i64],
    marks_ns: &[i64],
    config: &AnalysisConfig,
) -> Result<CalibrationReport, RunoutError> {
    let mark = RevolutionMark::first_of(marks_ns).ok_or(RunoutError::NoRevolutionMark)?;
    let steps = config.steps_per_revolution;
    let whole = extract_intervals(pulse_ns)?;
    let rpm = average_rpm(pulse_ns.len(), whole.duration_ns, steps)?;
    let aligned = trim_to_mark(pulse_ns, mark);
    debug!(
        "mark at {} ns, {} lead-in samples dropped",
        mark.0,
        pulse_ns.len() - aligned.len()
    );
    let extracted = extract_intervals(aligned)?;
    extracted.intervals.validate()?;
    Ok(CalibrationReport {
        rpm,
        mark,
        trimmed_samples: aligned.len(),
        profile: phase_average(&extracted.intervals, steps),
    })
}
/// Amplified speed over an arbitrary number of revolutions.
#[derive(Clone, Debug)]
pub struct PolarReport {
    pub rpm: f64,
    pub angle_increment: f64,
    pub values: Vec<f64>,
}
pub fn polar_capture(
    timestamps_ns: &[i64],
    config: &AnalysisConfig,
) -> Result<PolarReport, RunoutError> {
    let steps = config.steps_per_revolution;
    let extracted = extract_intervals(timestamps_ns)?;
    let rpm = average_rpm(timestamps_ns.len(), extracted.duration_ns, steps)?;
    let velocity = VelocityProfile::from_intervals(&extracted.intervals, steps)?;
    let detrend = Detrend::new(config.polar_mode, config.gain, config.baseline.resolve(rpm));
    Ok(PolarReport {
        rpm,
        angle_increment: velocity.angle_increment,
        values: detrend.apply(&velocity),
    })
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FftTransform;
    use assert_approx_eq::assert_approx_eq;
    fn steady(count: usize, interval: i64) -> Vec<i64> {
        (0..count as i64).map(|n| 1_000 + n * interval).collect()
    }
    #[test]
    fn steady_disc_has_flat_polar_trace() {
        let config = AnalysisConfig {
            fft_size: 512,
            ..AnalysisConfig::default()
        };
        let transform = FftTransform::new(config.fft_size, config.window);
        let report = analyse_runout(&steady(1501, 200_000), &config, &transform).unwrap();
        assert_eq!(report.interval_count, 1500);
        assert_approx_eq!(report.rpm, 600.0, 1e-9);
        assert_approx_eq!(report.mean_interval_ns, 200_000.0);
        assert!(report.polar.iter().all(|v| (v - 600.0).abs() < 1e-6));
        assert_eq!(report.spectrum.segments, 3);
        assert_approx_eq!(report.spectrum.bin_hz, 5000.0 / 512.0);
    }
    #[test]
    fn short_capture_keeps_zero_spectrum() {
        let config = AnalysisConfig::default();
        let transform = FftTransform::new(config.fft_size, config.window);
        let report = analyse_runout(&steady(100, 200_000), &config, &transform).unwrap();
        assert_eq!(report.spectrum.segments, 0);
        assert_eq!(report.spectrum.magnitudes.len(), 8192);
    }
    #[test]
    fn calibration_needs_a_mark() {
        let config = AnalysisConfig::default();
        assert!(matches!(
            calibrate(&steady(1000, 200_000), &[], &config),
            Err(RunoutError::NoRevolutionMark)
        ));
    }
    #[test]
    fn calibration_trims_lead_in() {
        let config = AnalysisConfig {
            steps_per_revolution: 10,
            ..AnalysisConfig::default()
        };
        // 1 ms per step at 10 steps per revolution is 6000 rpm
        let pulse = steady(41, 1_000_000);
        // mark just after the fifth edge
        let report = calibrate(&pulse, &[pulse[4] + 10, pulse[14] + 10], &config).unwrap();
        assert_eq!(report.trimmed_samples, 36);
        assert_eq!(report.profile.len(), 10);
        assert!(report.profile.is_complete());
        assert_approx_eq!(report.rpm, 6000.0, 1e-9);
    }
    #[test]
    fn polar_capture_rejects_stalled_edges() {
        let config = AnalysisConfig::default();
        assert!(matches!(
            polar_capture(&[0, 200_000, 200_000, 400_000], &config),
            Err(RunoutError::InvalidSample { index: 1, .. })
        ));
    }
}
