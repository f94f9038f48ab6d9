mod charts;
mod help;
mod state;

use crate::cli::DiffuseArgs;
use crate::engine::{ChannelSurface, ParticleDiffuser};
use crate::model::{DiffuseConfig, DiffuseEvent, DiffuserState};
use crate::orchestrator::{self, DiffuseControl, TimerSpec};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Terminal,
};
use state::{UiState, ROTATE_STEP};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: DiffuseArgs, cfg: DiffuseConfig, diffuser: ParticleDiffuser) -> Result<()> {
    // Unbounded channels avoid backpressure on the timer task.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<DiffuseEvent>();
    let (ctrl_tx, ctrl_rx) = mpsc::unbounded_channel::<DiffuseControl>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_cfg = cfg.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(ui_cfg, event_rx, ctrl_tx));

    let timer = TimerSpec {
        interval: cfg.interval,
        max_ticks: cfg.max_ticks,
    };
    let mut surface = ChannelSurface::new(event_tx.clone());
    let diffuser =
        orchestrator::run_controller(diffuser, timer, &mut surface, event_tx, ctrl_rx).await;
    drop(surface);

    let joined = tokio::task::spawn_blocking(move || ui_handle.join())
        .await
        .context("join TUI thread")?;
    match joined {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(e),
        Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
    }

    let result = orchestrator::build_run_result(&cfg, &diffuser)?;
    crate::cli::handle_exports(&args, &result)
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    cfg: DiffuseConfig,
    mut event_rx: UnboundedReceiver<DiffuseEvent>,
    ctrl_tx: UnboundedSender<DiffuseControl>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; no cross-thread mutation.
    let mut state = UiState::new(cfg);

    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking; only the latest frame is drawn.
        while let Ok(ev) = event_rx.try_recv() {
            state.apply_event(ev);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match (k.modifiers, k.code) {
                    (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                        let _ = ctrl_tx.send(DiffuseControl::Stop);
                        break Ok(());
                    }
                    (_, KeyCode::Char('p')) => {
                        if state.state != DiffuserState::Stopped {
                            let _ = ctrl_tx.send(DiffuseControl::Pause(!state.paused));
                        }
                    }
                    (_, KeyCode::Tab) => {
                        state.tab = (state.tab + 1) % 2;
                    }
                    (_, KeyCode::Char('?')) => {
                        state.tab = 1;
                    }
                    (_, KeyCode::Left) => state.azimuth -= ROTATE_STEP,
                    (_, KeyCode::Right) => state.azimuth += ROTATE_STEP,
                    (_, KeyCode::Up) => {
                        state.elevation = (state.elevation + ROTATE_STEP)
                            .min(std::f64::consts::FRAC_PI_2);
                    }
                    (_, KeyCode::Down) => {
                        state.elevation = (state.elevation - ROTATE_STEP)
                            .max(-std::f64::consts::FRAC_PI_2);
                    }
                    (_, KeyCode::Char('0')) => {
                        state.azimuth = 0.0;
                        state.elevation = 0.0;
                    }
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    let tabs = Tabs::new(vec![Line::from("Particles"), Line::from("Help")])
        .select(state.tab)
        .block(Block::default().borders(Borders::ALL).title("difflab"))
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => charts::draw_scatter(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }

    draw_status(chunks[2], f, state);
}

fn draw_status(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let state_color = match state.state {
        DiffuserState::Running => Color::Green,
        DiffuserState::Paused => Color::Yellow,
        DiffuserState::Idle => Color::Cyan,
        DiffuserState::Stopped => Color::Red,
    };
    let mut spans = vec![
        Span::styled(
            format!("{:?}", state.state),
            Style::default().fg(state_color),
        ),
        Span::raw(format!("  step {}", state.config.step_size)),
    ];
    if let Some(summary) = &state.summary {
        let spread = summary
            .axis_std_dev
            .iter()
            .map(|sd| format!("{sd:.2}"))
            .collect::<Vec<_>>()
            .join("/");
        spans.push(Span::raw(format!("  spread {spread}")));
    }
    if !state.info.is_empty() {
        spans.push(Span::raw(format!("  {}", state.info)));
    }
    if let Some(hint) = state.exit_hint() {
        spans.push(Span::styled(
            format!("  {hint}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}
