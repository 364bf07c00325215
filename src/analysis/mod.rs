// src/analysis/mod.rs
// 离线信号处理：时间戳 -> 间隔 -> 转速 -> 去趋势 -> 相位平均 / 频谱平均
pub mod detrend;
pub mod error;
pub mod fft;
pub mod intervals;
pub mod phase;
pub mod pipeline;
pub mod plot;
pub mod spectrum;
pub mod velocity;
pub use detrend::{Baseline, Detrend, DetrendMode};
pub use error::RunoutError;
pub use fft::{FftTransform, SpectralTransform, WindowFunction};
pub use intervals::{extract_intervals, trim_to_mark, ExtractedIntervals, IntervalSeries};
pub use phase::{phase_average, PhaseProfile};
pub use pipeline::{
    analyse_runout, calibrate, polar_capture, CalibrationReport, PolarReport, RunoutReport,
};
pub use plot::{render_polar_png, render_spectrum_png, PlotStyle};
pub use spectrum::{
    average_spectrum, segment_count, step_sample_rate_hz, AveragedSpectrum, SpectralAccumulator,
    Spectrum,
};
pub use velocity::{average_rpm, interval_for_rpm, VelocityProfile, NS_PER_MINUTE};
