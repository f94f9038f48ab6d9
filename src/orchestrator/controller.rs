//! Timer-driven diffusion lifecycle.
//!
//! Attaches the diffuser to a fixed-interval tick source, applies pause/stop commands,
//! and emits state changes for presentation layers.

use crate::engine::{ParticleDiffuser, RenderSurface};
use crate::model::{DiffuseEvent, DiffuserState, InfoEvent};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::{Duration, MissedTickBehavior};
use tracing::{debug, info};

/// Commands emitted by UI layers to control the running diffusion.
#[derive(Debug, Clone)]
pub(crate) enum DiffuseControl {
    Pause(bool),
    Stop,
}

/// Timer settings for one run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimerSpec {
    /// `None` leaves the diffuser idle until stopped.
    pub interval: Option<Duration>,
    pub max_ticks: Option<u64>,
}

fn set_state(event_tx: &UnboundedSender<DiffuseEvent>, state: DiffuserState) {
    info!(?state, "diffuser state changed");
    let _ = event_tx.send(DiffuseEvent::StateChanged { state });
}

/// Publish the initial frame, then step the diffuser on every timer tick until
/// stopped, the control channel closes, or the tick limit is hit.
///
/// Each step runs to completion inside the tick branch, so a slow step delays the
/// next tick instead of overlapping it. The diffuser is handed back for reporting.
pub(crate) async fn run_controller<S>(
    mut diffuser: ParticleDiffuser,
    timer: TimerSpec,
    surface: &mut S,
    event_tx: UnboundedSender<DiffuseEvent>,
    mut ctrl_rx: UnboundedReceiver<DiffuseControl>,
) -> ParticleDiffuser
where
    S: RenderSurface + ?Sized,
{
    let _ = event_tx.send(DiffuseEvent::Info(InfoEvent::Seeded {
        seed: diffuser.seed(),
    }));
    diffuser.publish(surface);
    set_state(&event_tx, DiffuserState::Idle);

    let mut ticker = timer.interval.map(|period| {
        let mut t = tokio::time::interval(period);
        t.set_missed_tick_behavior(MissedTickBehavior::Delay);
        t
    });
    if let Some(t) = ticker.as_mut() {
        // The first tick of a tokio interval completes immediately; consume it so
        // the first step lands one full period after attaching.
        t.tick().await;
        set_state(&event_tx, DiffuserState::Running);
    }
    let mut paused = false;

    loop {
        tokio::select! {
            cmd = ctrl_rx.recv() => {
                match cmd {
                    // An idle diffuser has nothing to pause.
                    Some(DiffuseControl::Pause(p)) if ticker.is_some() && p != paused => {
                        paused = p;
                        let state = if p { DiffuserState::Paused } else { DiffuserState::Running };
                        set_state(&event_tx, state);
                    }
                    Some(DiffuseControl::Pause(_)) => {}
                    Some(DiffuseControl::Stop) | None => break,
                }
            }
            // Without a timer this branch never completes and only commands are served.
            _ = async {
                match ticker.as_mut() {
                    Some(t) => {
                        t.tick().await;
                    }
                    None => futures::future::pending::<()>().await,
                }
            }, if !paused => {
                diffuser.step(surface);
                debug!(tick = diffuser.tick(), "diffusion step");
                if let Some(limit) = timer.max_ticks {
                    if diffuser.tick() >= limit {
                        let _ = event_tx.send(DiffuseEvent::Info(InfoEvent::TickLimitReached {
                            ticks: diffuser.tick(),
                        }));
                        break;
                    }
                }
            }
        }
    }

    set_state(&event_tx, DiffuserState::Stopped);
    diffuser
}
