use std::f64::consts::TAU;
use std::sync::Arc;
use rustfft::{num_complex::Complex64, Fft, FftPlanner};
use serde::{Deserialize, Serialize};
use crate::analysis::RunoutError;
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowFunction {
    Hamming,
    /// No weighting.
    Rectangular,
}
impl WindowFunction {
    pub fn coefficients(&self, width: usize) -> Vec<f64> {
        match self {
            WindowFunction::Rectangular => vec![1.0; width],
            WindowFunction::Hamming => {
                if width < 2 {
                    return vec![1.0; width];
                }
                let span = (width - 1) as f64;
                (0..width)
                    .map(|n| 0.54 - 0.46 * (TAU * n as f64 / span).cos())
                    .collect()
            }
        }
    }
}
/// Windowed real-to-magnitude transform of a fixed width.
pub trait SpectralTransform {
    /// Actual transform size, possibly rounded from the requested one.
    fn width(&self) -> usize;
    /// Magnitude spectrum of exactly `width()` samples; the result has the
    /// same length, only the first half carrying distinct information.
    fn magnitudes(&self, samples: &[f64]) -> Result<Vec<f64>, RunoutError>;
}
/// FFT-backed transform, the requested size rounded up to a power of two.
pub struct FftTransform {
    fft: Arc<dyn Fft<f64>>,
    window: Vec<f64>,
    width: usize,
}
impl FftTransform {
    pub fn new(requested_size: usize, window: WindowFunction) -> Self {
        let width = requested_size.max(2).next_power_of_two();
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(width);
        Self {
            fft,
            window: window.coefficients(width),
            width,
        }
    }
}
impl SpectralTransform for FftTransform {
    fn width(&self) -> usize {
        self.width
    }
    fn magnitudes(&self, samples: &[f64]) -> Result<Vec<f64>, RunoutError> {
        if samples.len() != self.width {
            return Err(RunoutError::TransformWidth {
                expected: self.width,
                got: samples.len(),
            });
        }
        let mut buffer: Vec<Complex64> = samples
            .iter()
            .zip(&self.window)
            .map(|(&v, &w)| Complex64::new(v * w, 0.0))
            .collect();
        self.fft.process(&mut buffer);
        Ok(buffer
            .iter()
            .map(|c| c.norm() / self.width as f64)
            .collect())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    #[test]
    fn width_rounds_up_to_power_of_two() {
        assert_eq!(FftTransform::new(500, WindowFunction::Hamming).width(), 512);
        assert_eq!(FftTransform::new(8192, WindowFunction::Hamming).width(), 8192);
    }
    #[test]
    fn hamming_endpoints_and_centre() {
        let w = WindowFunction::Hamming.coefficients(9);
        assert_approx_eq!(w[0], 0.08);
        assert_approx_eq!(w[8], 0.08);
        assert_approx_eq!(w[4], 1.0);
    }
    #[test]
    fn tone_lands_in_its_bin() {
        let transform = FftTransform::new(64, WindowFunction::Rectangular);
        let samples: Vec<f64> = (0..64)
            .map(|n| (TAU * 5.0 * n as f64 / 64.0).cos())
            .collect();
        let mags = transform.magnitudes(&samples).unwrap();
        assert_eq!(mags.len(), 64);
        assert_approx_eq!(mags[5], 0.5, 1e-9);
        assert_approx_eq!(mags[59], 0.5, 1e-9);
        assert!(mags[4] < 1e-9);
    }
    #[test]
    fn wrong_width_is_rejected() {
        let transform = FftTransform::new(16, WindowFunction::Hamming);
        assert!(matches!(
            transform.magnitudes(&[0.0; 8]),
            Err(RunoutError::TransformWidth {
                expected: 16,
                got: 8
            })
        ));
    }
}
