// src/bin/runout.rs
// 跳动测量：采集脉冲通道，输出放大后的极坐标速度曲线与平均频谱
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use encoder_runout::acquisition::capture_channel;
use encoder_runout::analysis::{
    analyse_runout, render_polar_png, render_spectrum_png, FftTransform, PlotStyle,
    SpectralTransform,
};
use encoder_runout::cli::{ConfigArgs, SourceArgs};
use encoder_runout::report::{write_runout, PlotWriter};
use encoder_runout::ChannelId;
#[derive(Parser)]
#[clap(author, version, about = "Amplified speed trace and runout spectrum of one capture")]
struct Cli {
    /// Free text copied into the output header.
    comment: Option<String>,
    #[clap(flatten)]
    source: SourceArgs,
    #[clap(flatten)]
    config: ConfigArgs,
    /// Pulse edges to capture (defaults to the configured capture size).
    #[clap(long)]
    samples: Option<usize>,
    /// Also render `<PREFIX>-polar.png` and `<PREFIX>-spectrum.png`.
    #[clap(long)]
    png: Option<PathBuf>,
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
    let mut source = args.source.open(&config, &[ChannelId::Pulse])?;
    let samples = args.samples.unwrap_or(config.capture.capture_samples);
    let timestamps = capture_channel(
        &mut *source,
        ChannelId::Pulse,
        samples,
        config.capture.wait_timeout(),
    )
    .with_context(|| format!("capturing {samples} pulse edges"))?;
    let transform = FftTransform::new(config.analysis.fft_size, config.analysis.window);
    info!("{} edges captured, transform width {}", timestamps.len(), transform.width());
    let report = analyse_runout(&timestamps, &config.analysis, &transform)?;
    let mut out = PlotWriter::new(io::BufWriter::new(io::stdout().lock()));
    write_runout(&mut out, &report, args.comment.as_deref().unwrap_or(""))?;
    if let Some(prefix) = &args.png {
        let polar: Vec<(f64, f64)> = report.polar_points().collect();
        let polar_png = render_polar_png(&polar, report.baseline_rpm, PlotStyle::default())?;
        let polar_path = with_suffix(prefix, "polar");
        fs::write(&polar_path, polar_png)
            .with_context(|| format!("writing {}", polar_path.display()))?;
        let spectrum_png = render_spectrum_png(&report.spectrum, PlotStyle::default())?;
        let spectrum_path = with_suffix(prefix, "spectrum");
        fs::write(&spectrum_path, spectrum_png)
            .with_context(|| format!("writing {}", spectrum_path.display()))?;
        info!(
            "plots written to {} and {}",
            polar_path.display(),
            spectrum_path.display()
        );
    }
    Ok(())
}
fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(format!("-{suffix}.png"));
    PathBuf::from(name)
}
