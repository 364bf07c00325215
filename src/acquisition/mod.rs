// src/acquisition/mod.rs
// 边沿事件采集接口：GPIO 之外的模拟源、回放源与测试用脚本源
pub mod capture;
pub mod replay;
pub mod simulated;
pub mod source;
pub use capture::{capture_calibration, capture_channel, CalibrationCapture};
pub use replay::ReplaySource;
pub use simulated::{SimulatedDisc, SimulationParams};
pub use source::{EdgeSource, ManualSource, WaitOutcome};
