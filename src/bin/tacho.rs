// src/bin/tacho.rs
// 实时转速表：脉冲与索引通道各一个监测线程，回车输入 q 退出
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use encoder_runout::cli::{ConfigArgs, SourceArgs};
use encoder_runout::monitor::{start_monitor, MonitorReport};
use encoder_runout::ChannelId;
#[derive(Parser)]
#[clap(author, version, about = "Live tachometer from the pulse and index channels")]
struct Cli {
    #[clap(flatten)]
    source: SourceArgs,
    #[clap(flatten)]
    config: ConfigArgs,
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
    let pulse = args.source.open_live(&config, ChannelId::Pulse)?;
    let index = args.source.open_live(&config, ChannelId::Index)?;
    println!("encoder disc tachometer {}", env!("CARGO_PKG_VERSION"));
    println!("Starting tachometer...");
    let (tx, rx) = channel();
    let monitor = start_monitor(
        pulse,
        index,
        &config.monitor,
        config.analysis.steps_per_revolution,
        tx,
    )?;
    let printer = thread::Builder::new()
        .name("tacho-print".into())
        .spawn(move || print_reports(rx))?;
    println!("\n\npress 'q' and enter to exit.\n");
    wait_for_quit()?;
    println!("Waiting for tachometer exit...");
    let stats = monitor.stop_and_join()?;
    info!("{} pulse readings", stats.count);
    if printer.join().is_err() {
        error!("report printer panicked");
    }
    println!("done\n");
    Ok(())
}
/// Returns once a line starting with `q` is entered or stdin closes.
fn wait_for_quit() -> Result<()> {
    for line in io::stdin().lock().lines() {
        if line?.trim_start().starts_with(['q', 'Q']) {
            return Ok(());
        }
    }
    info!("stdin closed, stopping");
    Ok(())
}
fn print_reports(rx: Receiver<MonitorReport>) {
    let stdout = io::stdout();
    for report in rx {
        let mut out = stdout.lock();
        let written = match report {
            MonitorReport::Rpm { channel, rpm } => writeln!(out, "{rpm} ({channel})"),
            MonitorReport::NoSignal(channel) => write!(out, "No signal ({channel})\r"),
            MonitorReport::Final(stats) => writeln!(out, "{stats}"),
        };
        if written.and_then(|_| out.flush()).is_err() {
            break;
        }
    }
}
