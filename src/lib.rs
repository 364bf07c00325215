// src/lib.rs
// 编码盘跳动诊断：边沿时间戳 -> 角速度 -> 相位剖面 / 跳动频谱，外加实时转速表
pub mod acquisition;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod monitor;
pub mod report;
pub mod types;
pub use analysis::RunoutError;
pub use config::Config;
pub use types::{ChannelId, EdgeSample, RevolutionMark};
