//! Post-run processing utilities.
//!
//! Builds the final result of a diffusion run and writes JSON exports.

use crate::engine::ParticleDiffuser;
use crate::model::{DiffuseConfig, RunResult};
use anyhow::{Context, Result};
use std::path::Path;

/// Snapshot the diffuser's final state for presentation or export.
pub(crate) fn build_run_result(cfg: &DiffuseConfig, diffuser: &ParticleDiffuser) -> Result<RunResult> {
    let summary = diffuser
        .summary()
        .context("failed to summarize final particle positions")?;
    Ok(RunResult {
        timestamp_utc: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "now".into()),
        config: cfg.clone(),
        seed: diffuser.seed(),
        ticks: diffuser.tick(),
        summary,
        positions: diffuser.particles().points().map(<[f64]>::to_vec).collect(),
        colors: diffuser.colors().map(|c| c.as_slice().to_vec()),
    })
}

pub(crate) fn export_json(path: &Path, result: &RunResult) -> Result<()> {
    let out = serde_json::to_string_pretty(result)?;
    std::fs::write(path, out).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
