// src/bin/polar.rs
// 任意圈数采集：输出放大后的极坐标速度曲线
use std::io;
use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::{error, info};
use encoder_runout::acquisition::capture_channel;
use encoder_runout::analysis::polar_capture;
use encoder_runout::cli::{ConfigArgs, SourceArgs};
use encoder_runout::report::{write_polar, PlotWriter};
use encoder_runout::ChannelId;
#[derive(Parser)]
#[clap(author, version, about = "Capture an arbitrary number of revolutions as a polar speed trace")]
struct Cli {
    /// Revolutions to capture.
    revs: usize,
    #[clap(flatten)]
    source: SourceArgs,
    #[clap(flatten)]
    config: ConfigArgs,
}
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = match Cli::try_parse() {
        Ok(args) if args.revs > 0 => args,
        Ok(_) => usage("revolution count must be greater than zero"),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => usage(&e.to_string()),
    };
    if let Err(e) = run(args) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
fn usage(reason: &str) -> ! {
    eprintln!("{}", reason.trim_end());
    eprintln!("{}", Cli::command().render_usage());
    eprintln!("writes captured data to stdout");
    std::process::exit(1);
}
fn run(args: Cli) -> Result<()> {
    let config = args.config.load().context("loading configuration")?;
    let samples = args
        .revs
        .checked_mul(config.analysis.steps_per_revolution)
        .context("revolution count too large")?;
    let mut source = args.source.open(&config, &[ChannelId::Pulse])?;
    info!("capturing {} revolutions ({samples} edges)", args.revs);
    let timestamps = capture_channel(
        &mut *source,
        ChannelId::Pulse,
        samples,
        config.capture.wait_timeout(),
    )
    .with_context(|| format!("capturing {samples} pulse edges"))?;
    let report = polar_capture(&timestamps, &config.analysis)?;
    let mut out = PlotWriter::new(io::BufWriter::new(io::stdout().lock()));
    write_polar(&mut out, &report)?;
    Ok(())
}
