use log::debug;
use crate::analysis::{RunoutError, SpectralTransform};
/// Running element-wise sum of segment spectra.
#[derive(Clone, Debug)]
pub struct SpectralAccumulator {
    sums: Vec<f64>,
    segments: usize,
}
impl SpectralAccumulator {
    pub fn new(width: usize) -> Self {
        Self {
            sums: vec![0.0; width],
            segments: 0,
        }
    }
    pub fn add(&mut self, magnitudes: &[f64]) -> Result<(), RunoutError> {
        if magnitudes.len() != self.sums.len() {
            return Err(RunoutError::TransformWidth {
                expected: self.sums.len(),
                got: magnitudes.len(),
            });
        }
        for (sum, &m) in self.sums.iter_mut().zip(magnitudes) {
            *sum += m;
        }
        self.segments += 1;
        Ok(())
    }
    pub fn segments(&self) -> usize {
        self.segments
    }
    /// Divides through by the segment count; an empty accumulator stays zero.
    pub fn finish(self) -> AveragedSpectrum {
        let divisor = self.segments.max(1) as f64;
        AveragedSpectrum {
            magnitudes: self.sums.into_iter().map(|s| s / divisor).collect(),
            segments: self.segments,
        }
    }
}
/// Mean magnitude spectrum over overlapping segments, full transform width.
#[derive(Clone, Debug, PartialEq)]
pub struct AveragedSpectrum {
    pub magnitudes: Vec<f64>,
    pub segments: usize,
}
impl AveragedSpectrum {
    pub fn width(&self) -> usize {
        self.magnitudes.len()
    }
    /// Too little data for one segment.
    pub fn is_empty(&self) -> bool {
        self.segments == 0
    }
    pub fn with_bin_spacing(self, bin_hz: f64) -> Spectrum {
        Spectrum {
            magnitudes: self.magnitudes,
            bin_hz,
            segments: self.segments,
        }
    }
}
/// Averaged spectrum paired with its frequency resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum {
    pub magnitudes: Vec<f64>,
    pub bin_hz: f64,
    pub segments: usize,
}
impl Spectrum {
    /// `(frequency_hz, magnitude)` over the first half, the part that
    /// carries information for a real-valued signal.
    pub fn half_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.magnitudes
            .iter()
            .take(self.magnitudes.len() / 2)
            .enumerate()
            .map(|(k, &m)| (k as f64 * self.bin_hz, m))
    }
    /// Index of the largest bin in the reported half, skipping DC.
    pub fn peak_bin(&self) -> Option<usize> {
        self.magnitudes
            .iter()
            .take(self.magnitudes.len() / 2)
            .enumerate()
            .skip(1)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| k)
    }
}
/// Segment count for 50% overlap: `floor(len / width) * 2 - 1`, zero when short.
pub fn segment_count(len: usize, width: usize) -> usize {
    if width == 0 || len < width {
        0
    } else {
        len / width * 2 - 1
    }
}
/// Welch-style average: windowed transforms of half-overlapping segments.
///
/// A signal shorter than the transform width gives an all-zero spectrum
/// with zero segments instead of an error.
pub fn average_spectrum<T: SpectralTransform + ?Sized>(
    signal: &[f64],
    transform: &T,
) -> Result<AveragedSpectrum, RunoutError> {
    let width = transform.width();
    let mut accumulator = SpectralAccumulator::new(width);
    let segments = segment_count(signal.len(), width);
    if segments == 0 {
        debug!(
            "{} samples is shorter than transform width {width}, spectrum left empty",
            signal.len()
        );
        return Ok(accumulator.finish());
    }
    debug!("averaging {segments} segments of width {width}");
    let hop = width / 2;
    for k in 0..segments {
        let start = k * hop;
        accumulator.add(&transform.magnitudes(&signal[start..start + width])?)?;
    }
    Ok(accumulator.finish())
}
/// Step-event sample rate in Hz at a given speed.
pub fn step_sample_rate_hz(rpm: f64, steps_per_revolution: usize) -> f64 {
    rpm * steps_per_revolution as f64 / 60.0
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use crate::analysis::{FftTransform, WindowFunction};
    use assert_approx_eq::assert_approx_eq;
    /// Returns each segment's first sample in every bin and counts calls.
    struct FirstSample {
        width: usize,
        calls: Cell<usize>,
    }
    impl SpectralTransform for FirstSample {
        fn width(&self) -> usize {
            self.width
        }
        fn magnitudes(&self, samples: &[f64]) -> Result<Vec<f64>, RunoutError> {
            self.calls.set(self.calls.get() + 1);
            Ok(vec![samples[0]; self.width])
        }
    }
    #[test]
    fn segment_counts() {
        assert_eq!(segment_count(500, 500), 1);
        assert_eq!(segment_count(1000, 500), 3);
        assert_eq!(segment_count(1499, 500), 3);
        assert_eq!(segment_count(1500, 500), 5);
        assert_eq!(segment_count(499, 500), 0);
    }
    #[test]
    fn segments_start_every_half_width() {
        let first = FirstSample {
            width: 4,
            calls: Cell::new(0),
        };
        let signal: Vec<f64> = (0..8).map(|n| n as f64).collect();
        let avg = average_spectrum(&signal, &first).unwrap();
        assert_eq!(first.calls.get(), 3);
        assert_eq!(avg.segments, 3);
        // starts 0, 2, 4
        assert_approx_eq!(avg.magnitudes[0], 2.0);
    }
    #[test]
    fn accumulator_counts_segments_and_checks_width() {
        let mut acc = SpectralAccumulator::new(2);
        acc.add(&[1.0, 4.0]).unwrap();
        acc.add(&[3.0, 0.0]).unwrap();
        assert!(matches!(
            acc.add(&[1.0]),
            Err(RunoutError::TransformWidth {
                expected: 2,
                got: 1
            })
        ));
        assert_eq!(acc.segments(), 2);
        assert_eq!(acc.finish().magnitudes, vec![2.0, 2.0]);
    }
    #[test]
    fn single_segment_is_unaveraged() {
        let transform = FftTransform::new(512, WindowFunction::Hamming);
        let signal: Vec<f64> = (0..512).map(|n| (n as f64 * 0.3).sin()).collect();
        let avg = average_spectrum(&signal, &transform).unwrap();
        assert_eq!(avg.segments, 1);
        assert_eq!(avg.magnitudes, transform.magnitudes(&signal).unwrap());
    }
    #[test]
    fn short_signal_gives_zero_spectrum() {
        let transform = FftTransform::new(512, WindowFunction::Hamming);
        let avg = average_spectrum(&[1.0; 300], &transform).unwrap();
        assert!(avg.is_empty());
        assert_eq!(avg.width(), 512);
        assert!(avg.magnitudes.iter().all(|&m| m == 0.0));
    }
    #[test]
    fn half_points_use_bin_spacing() {
        let spectrum = AveragedSpectrum {
            magnitudes: vec![0.0, 3.0, 1.0, 0.0, 0.0, 1.0, 3.0, 0.0],
            segments: 1,
        }
        .with_bin_spacing(2.5);
        let points: Vec<(f64, f64)> = spectrum.half_points().collect();
        assert_eq!(points.len(), 4);
        assert_eq!(points[2], (5.0, 1.0));
        assert_eq!(spectrum.peak_bin(), Some(1));
        assert_approx_eq!(step_sample_rate_hz(600.0, 500), 5000.0);
    }
}
