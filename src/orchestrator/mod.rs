//! Application-level orchestration utilities.
//!
//! This module owns the diffusion lifecycle (attach timer, pause, stop) and post-run
//! reporting such as building the exported result. UI/CLI layers call into this module
//! to keep responsibilities separated.

mod controller;
mod post_process;

pub(crate) use controller::{run_controller, DiffuseControl, TimerSpec};
pub(crate) use post_process::{build_run_result, export_json};
