// src/bin/calibrate.rs
// 校准：同时采集脉冲与索引通道，对齐到第一个索引标记后输出单圈相位平均剖面
use std::io;
use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use encoder_runout::acquisition::capture_calibration;
use encoder_runout::analysis::calibrate;
use encoder_runout::cli::{ConfigArgs, SourceArgs};
use encoder_runout::report::{write_calibration, PlotWriter};
use encoder_runout::{ChannelId, RunoutError};
#[derive(Parser)]
#[clap(author, version, about = "Phase-averaged interval profile of one disc revolution")]
struct Cli {
    #[clap(flatten)]
    source: SourceArgs,
    #[clap(flatten)]
    config: ConfigArgs,
    /// Pulse edges to capture (defaults to the configured calibration size).
    #[clap(long)]
    samples: Option<usize>,
}
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run(Cli::parse()) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
fn run(args: Cli) -> Result<()> {
    let config = args.config.load().context("loading configuration")?;
    let mut source = args
        .source
        .open(&config, &[ChannelId::Pulse, ChannelId::Index])?;
    let samples = args.samples.unwrap_or(config.capture.calibration_samples);
    info!("capturing {samples} pulse edges");
    let capture = capture_calibration(&mut *source, samples, config.capture.wait_timeout())
        .with_context(|| format!("capturing {samples} pulse edges for calibration"))?;
    let mut out = PlotWriter::new(io::BufWriter::new(io::stdout().lock()));
    let report = match calibrate(&capture.pulse_ns, &capture.marks_ns, &config.analysis) {
        Err(RunoutError::NoRevolutionMark) => {
            out.comment("no id mark found.")?;
            out.separator()?;
            out.flush()?;
            return Err(RunoutError::NoRevolutionMark.into());
        }
        other => other?,
    };
    info!(
        "{} of {} samples after the mark at {} ns",
        report.trimmed_samples,
        capture.pulse_ns.len(),
        report.mark.0
    );
    write_calibration(&mut out, &report, ChannelId::Pulse.label())?;
    Ok(())
}
