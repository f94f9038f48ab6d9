use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Named starting points matching the three particle demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Static 2D scatter: no timer, spread 1.0.
    Static2d,
    /// 2D diffusion: 1000 particles, spread 10.0.
    Demo2d,
    /// 3D diffusion with per-particle colors: 2000 particles, spread 10.0.
    Demo3d,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffuseConfig {
    pub dims: usize,
    pub count: usize,
    pub center: f64,
    pub spread: f64,
    pub step_size: f64,
    /// `None` keeps the diffuser idle: positions are published once and never stepped.
    #[serde(default, with = "humantime_serde")]
    pub interval: Option<Duration>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

pub const DEFAULT_STEP_SIZE: f64 = 0.1;
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

impl DiffuseConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let base = Self {
            dims: 2,
            count: 1000,
            center: 0.0,
            spread: 10.0,
            step_size: DEFAULT_STEP_SIZE,
            interval: Some(DEFAULT_INTERVAL),
            seed: None,
            max_ticks: None,
        };
        match preset {
            Preset::Static2d => Self {
                spread: 1.0,
                interval: None,
                ..base
            },
            Preset::Demo2d => base,
            Preset::Demo3d => Self {
                dims: 3,
                count: 2000,
                ..base
            },
        }
    }
}

impl Default for DiffuseConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Demo2d)
    }
}

/// How the median of an even-length sample is chosen.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum MedianConvention {
    /// Mean of the two middle elements.
    #[default]
    Average,
    /// The lower of the two middle elements.
    Lower,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub median_convention: MedianConvention,
    pub sorted: Vec<f64>,
}

/// Lifecycle of the diffuser's timer attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffuserState {
    Idle,
    Running,
    Paused,
    Stopped,
}

#[derive(Debug, Clone)]
pub enum DiffuseEvent {
    StateChanged {
        state: DiffuserState,
    },
    /// Positions as pushed to the surface; `frame` counts publishes from zero.
    Frame {
        frame: u64,
        dims: usize,
        positions: Vec<f64>,
    },
    Colors {
        colors: Vec<[f32; 4]>,
    },
    Info(InfoEvent),
}

/// Structured info events emitted by the controller and consumed by UI/CLI layers.
#[derive(Debug, Clone)]
pub enum InfoEvent {
    Seeded { seed: u64 },
    TickLimitReached { ticks: u64 },
}

impl InfoEvent {
    /// Render a human-readable message for UI/CLI layers.
    pub fn to_message(&self) -> String {
        match self {
            InfoEvent::Seeded { seed } => format!("RNG seed: {}", seed),
            InfoEvent::TickLimitReached { ticks } => format!("Stopped after {} ticks", ticks),
        }
    }
}

/// Per-axis location and spread of a particle cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSummary {
    pub tick: u64,
    pub count: usize,
    pub axis_mean: Vec<f64>,
    pub axis_std_dev: Vec<f64>,
}

/// Final state of a diffusion run, written by `--export-json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub timestamp_utc: String,
    pub config: DiffuseConfig,
    pub seed: u64,
    pub ticks: u64,
    pub summary: FrameSummary,
    pub positions: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<[f32; 4]>>,
}
