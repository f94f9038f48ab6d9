use crate::engine::{summarize_frame, ChannelSurface, ParticleDiffuser, ParticleSet};
use crate::exercises::{division, power};
use crate::metrics::{self, Sample};
use crate::model::{DiffuseConfig, DiffuseEvent, MedianConvention, Preset, RunResult};
use crate::orchestrator::{self, DiffuseControl, TimerSpec};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "difflab",
    version,
    about = "Statistics, particle diffusion and debugging exercises"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Mean, median and standard deviation of a sample
    Stats(StatsArgs),
    /// Animate a Gaussian random walk of particles
    Diffuse(DiffuseArgs),
    /// Integer division by repeated subtraction on random inputs
    Divide(DivideArgs),
    /// Compare a^b with b^a
    Power(PowerArgs),
}

#[derive(Debug, Args, Clone)]
pub struct StatsArgs {
    /// Comma-separated sample values (defaults to the built-in data set)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub values: Vec<f64>,

    /// Median convention for even-length samples
    #[arg(long, value_enum, default_value_t = MedianConvention::Average)]
    pub median: MedianConvention,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct DiffuseArgs {
    /// Starting configuration; the flags below override individual fields
    #[arg(long, value_enum, default_value_t = Preset::Demo2d)]
    pub preset: Preset,

    /// Dimensionality of each particle (2 or 3)
    #[arg(long)]
    pub dims: Option<usize>,

    /// Number of particles
    #[arg(long)]
    pub count: Option<usize>,

    /// Mean of the initial positions on every axis
    #[arg(long, allow_negative_numbers = true)]
    pub center: Option<f64>,

    /// Standard deviation of the initial positions
    #[arg(long)]
    pub spread: Option<f64>,

    /// Standard deviation of the per-tick noise
    #[arg(long)]
    pub step_size: Option<f64>,

    /// Timer interval between diffusion steps
    #[arg(long)]
    pub interval: Option<humantime::Duration>,

    /// Publish the initial positions only; never attach the timer
    #[arg(long, conflicts_with = "interval")]
    pub no_timer: bool,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many diffusion steps
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Print a cloud summary every N frames in text mode
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..))]
    pub report_every: u64,

    /// Print per-frame summaries as text (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Print the final state as JSON (no TUI)
    #[arg(long, conflicts_with = "text")]
    pub json: bool,

    /// Export the final state as JSON
    #[arg(long)]
    pub export_json: Option<std::path::PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct DivideArgs {
    /// Number of random divisions
    #[arg(long, default_value_t = 10)]
    pub rounds: usize,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct PowerArgs {
    #[arg(long, default_value_t = 11)]
    pub a: u64,

    #[arg(long, default_value_t = 12)]
    pub b: u64,
}

pub async fn run(args: Cli) -> Result<()> {
    match args.command {
        Command::Stats(a) => run_stats(a).await,
        Command::Diffuse(a) => run_diffuse(a).await,
        Command::Divide(a) => run_divide(a).await,
        Command::Power(a) => run_power(a).await,
    }
}

/// Generate a random seed when none was given.
fn gen_seed() -> u64 {
    let mut b = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut b);
    u64::from_le_bytes(b)
}

/// Build a `DiffuseConfig` from the preset and CLI overrides.
pub fn build_config(args: &DiffuseArgs) -> Result<DiffuseConfig> {
    let mut cfg = DiffuseConfig::from_preset(args.preset);
    if let Some(dims) = args.dims {
        cfg.dims = dims;
    }
    if let Some(count) = args.count {
        cfg.count = count;
    }
    if let Some(center) = args.center {
        cfg.center = center;
    }
    if let Some(spread) = args.spread {
        cfg.spread = spread;
    }
    if let Some(step_size) = args.step_size {
        cfg.step_size = step_size;
    }
    if args.no_timer {
        cfg.interval = None;
    } else if let Some(interval) = args.interval {
        let interval = Duration::from(interval);
        if interval.is_zero() {
            anyhow::bail!("--interval must be greater than zero");
        }
        cfg.interval = Some(interval);
    }
    cfg.seed = args.seed;
    cfg.max_ticks = args.ticks;
    Ok(cfg)
}

async fn run_stats(args: StatsArgs) -> Result<()> {
    let sample = if args.values.is_empty() {
        Sample::load()
    } else {
        Sample::new(args.values.clone()).context("invalid sample")?
    };
    debug!(len = sample.values().len(), "sample loaded");
    let report =
        metrics::summarize(&sample, args.median).context("cannot compute statistics")?;

    let (out_tx, out_handle) = spawn_output_writer();
    if args.json {
        let _ = out_tx.send(OutputLine::Stdout(serde_json::to_string_pretty(&report)?));
    } else {
        for line in crate::text_summary::stats_lines(&report) {
            let _ = out_tx.send(OutputLine::Stdout(line));
        }
    }
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

async fn run_diffuse(args: DiffuseArgs) -> Result<()> {
    let cfg = build_config(&args)?;
    let seed = cfg.seed.unwrap_or_else(gen_seed);
    let diffuser = ParticleDiffuser::new(&cfg, seed).context("invalid diffusion settings")?;
    info!(
        dims = cfg.dims,
        count = cfg.count,
        seed,
        interval = ?cfg.interval,
        "particles initialised"
    );

    if !args.json && !args.text {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args, cfg, diffuser).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            return run_text_with_writer(args, cfg, diffuser).await;
        }
    }

    run_text_with_writer(args, cfg, diffuser).await
}

async fn run_text_with_writer(
    args: DiffuseArgs,
    cfg: DiffuseConfig,
    diffuser: ParticleDiffuser,
) -> Result<()> {
    let (out_tx, out_handle) = spawn_output_writer();
    let res = run_text(args, cfg, diffuser, &out_tx).await;
    drop(out_tx);
    let _ = out_handle.await;
    res
}

/// Stop the controller on Ctrl-C so text and JSON runs still report.
fn spawn_ctrl_c_stop(ctrl_tx: mpsc::UnboundedSender<DiffuseControl>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = ctrl_tx.send(DiffuseControl::Stop);
        }
    });
}

/// Text and JSON modes: run the controller as a task and consume its events here.
/// Output goes to `out_tx`; the caller owns the writer.
async fn run_text(
    args: DiffuseArgs,
    cfg: DiffuseConfig,
    diffuser: ParticleDiffuser,
    out_tx: &mpsc::UnboundedSender<OutputLine>,
) -> Result<()> {
    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<DiffuseEvent>();
    let (ctrl_tx, ctrl_rx) = mpsc::unbounded_channel::<DiffuseControl>();
    spawn_ctrl_c_stop(ctrl_tx);

    let timer = TimerSpec {
        interval: cfg.interval,
        max_ticks: cfg.max_ticks,
    };
    let handle = tokio::spawn(async move {
        let mut surface = ChannelSurface::new(evt_tx.clone());
        orchestrator::run_controller(diffuser, timer, &mut surface, evt_tx, ctrl_rx).await
    });

    let verbose = args.text;
    while let Some(ev) = evt_rx.recv().await {
        if !verbose {
            continue;
        }
        match ev {
            DiffuseEvent::StateChanged { state } => {
                let _ = out_tx.send(OutputLine::Stderr(format!("== {state:?} ==")));
            }
            DiffuseEvent::Frame {
                frame,
                dims,
                positions,
            } => {
                if frame % args.report_every == 0 {
                    let set = ParticleSet::from_coords(dims, positions)?;
                    let summary = summarize_frame(&set, frame)?;
                    let _ = out_tx.send(OutputLine::Stderr(crate::text_summary::frame_line(
                        &summary,
                    )));
                }
            }
            DiffuseEvent::Colors { .. } => {
                // Colors only matter to graphical surfaces.
            }
            DiffuseEvent::Info(info) => {
                let _ = out_tx.send(OutputLine::Stderr(info.to_message()));
            }
        }
    }

    let diffuser = handle.await.context("diffusion task failed")?;
    let result = orchestrator::build_run_result(&cfg, &diffuser)?;
    handle_exports(&args, &result)?;

    if args.json {
        let _ = out_tx.send(OutputLine::Stdout(serde_json::to_string_pretty(&result)?));
    } else {
        for line in crate::text_summary::run_lines(&result) {
            let _ = out_tx.send(OutputLine::Stdout(line));
        }
    }
    if let Some(p) = args.export_json.as_deref() {
        let _ = out_tx.send(OutputLine::Stderr(format!("Exported: {}", p.display())));
    }
    Ok(())
}

/// Handle export operations for every diffusion mode.
pub(crate) fn handle_exports(args: &DiffuseArgs, result: &RunResult) -> Result<()> {
    if let Some(p) = args.export_json.as_deref() {
        orchestrator::export_json(p, result)?;
    }
    Ok(())
}

async fn run_divide(args: DivideArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(gen_seed);
    let mut rng = StdRng::seed_from_u64(seed);
    debug!(seed, rounds = args.rounds, "dividing");

    let (out_tx, out_handle) = spawn_output_writer();
    for round in division::random_rounds(args.rounds, &mut rng) {
        let _ = out_tx.send(OutputLine::Stdout(round.to_message()));
    }
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

async fn run_power(args: PowerArgs) -> Result<()> {
    let outcome = power::power_compare(args.a, args.b)
        .with_context(|| format!("cannot compare {}^{} with {}^{}", args.a, args.b, args.b, args.a))?;

    let (out_tx, out_handle) = spawn_output_writer();
    let line = match outcome {
        power::PowerOutcome::Floored { value, letter } => format!(
            "max({a}^{b}, {b}^{a}) is below {value}: {letter}, returning {value}",
            a = args.a,
            b = args.b
        ),
        power::PowerOutcome::Value(_) => format!(
            "max({a}^{b}, {b}^{a}) = {v}",
            a = args.a,
            b = args.b,
            v = outcome.value()
        ),
    };
    let _ = out_tx.send(OutputLine::Stdout(line));
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}
