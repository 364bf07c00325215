// src/monitor/mod.rs
// 实时转速监测：脉冲通道与索引通道各一个线程，只共享停止信号
pub mod edge_buffer;
pub mod loops;
pub mod stats;
pub use edge_buffer::{EdgeBuffer, EdgeFilter, FillOutcome};
pub use loops::{
    run_index_loop, run_pulse_loop, start_monitor, LoopSettings, MonitorHandle, MonitorReport,
    StopSignal,
};
pub use stats::LiveStats;
