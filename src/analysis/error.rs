use thiserror::Error;
use crate::types::ChannelId;
#[derive(Debug, Error)]
pub enum RunoutError {
    #[error("insufficient samples: need at least {needed}, got {got}")]
    InsufficientSamples { needed: usize, got: usize },
    #[error("invalid sample at interval {index}: {interval_ns} ns is not a positive duration")]
    InvalidSample { index: usize, interval_ns: i64 },
    #[error("no revolution mark found in capture")]
    NoRevolutionMark,
    #[error("acquisition failed: {0}")]
    AcquisitionFailure(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("transform width mismatch: expected {expected} samples, got {got}")]
    TransformWidth { expected: usize, got: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{0} monitor loop panicked")]
    MonitorPanicked(ChannelId),
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for RunoutError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        RunoutError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for RunoutError {
    fn from(value: image::ImageError) -> Self {
        RunoutError::Plot(value.to_string())
    }
}
impl From<serde_json::Error> for RunoutError {
    fn from(value: serde_json::Error) -> Self {
        RunoutError::InvalidConfig(value.to_string())
    }
}
