use crate::engine::{summarize_frame, ParticleSet};
use crate::model::{DiffuseConfig, DiffuseEvent, DiffuserState, FrameSummary};

/// Turntable camera step per key press, in radians.
pub const ROTATE_STEP: f64 = std::f64::consts::PI / 12.0;

pub struct UiState {
    pub tab: usize,
    pub paused: bool,
    pub state: DiffuserState,
    pub info: String,

    pub config: DiffuseConfig,
    pub frame: u64,
    pub dims: usize,
    pub positions: Vec<f64>,
    pub colors: Vec<[f32; 4]>,
    pub summary: Option<FrameSummary>,

    // Only grows, so the view does not jitter as the cloud spreads.
    pub extent: f64,
    pub azimuth: f64,
    pub elevation: f64,
}

impl UiState {
    pub fn new(config: DiffuseConfig) -> Self {
        Self {
            tab: 0,
            paused: false,
            state: DiffuserState::Idle,
            info: String::new(),
            dims: config.dims,
            config,
            frame: 0,
            positions: Vec::new(),
            colors: Vec::new(),
            summary: None,
            extent: 1.0,
            azimuth: 0.0,
            elevation: 0.0,
        }
    }

    pub fn apply_event(&mut self, ev: DiffuseEvent) {
        match ev {
            DiffuseEvent::StateChanged { state } => {
                self.state = state;
                self.paused = state == DiffuserState::Paused;
            }
            DiffuseEvent::Frame {
                frame,
                dims,
                positions,
            } => {
                let radius = positions
                    .chunks_exact(dims.max(1))
                    .map(|p| p.iter().map(|c| c * c).sum::<f64>().sqrt())
                    .fold(0.0, f64::max);
                self.extent = self.extent.max(radius * 1.05);
                self.summary = ParticleSet::from_coords(dims, positions.clone())
                    .and_then(|set| summarize_frame(&set, frame))
                    .ok();
                self.frame = frame;
                self.dims = dims;
                self.positions = positions;
            }
            DiffuseEvent::Colors { colors } => {
                self.colors = colors;
            }
            DiffuseEvent::Info(info) => {
                self.info = info.to_message();
            }
        }
    }

    /// Shown once the run has ended; the view stays up until the user leaves.
    pub fn exit_hint(&self) -> Option<&'static str> {
        (self.state == DiffuserState::Stopped).then_some("press q to exit")
    }

    /// Screen coordinates of every particle under the current camera.
    pub fn projected(&self) -> Vec<(f64, f64)> {
        let dims = self.dims.max(1);
        self.positions
            .chunks_exact(dims)
            .map(|p| match p {
                [x, y] => (*x, *y),
                [x, y, z] => project(*x, *y, *z, self.azimuth, self.elevation),
                _ => (0.0, 0.0),
            })
            .collect()
    }
}

/// Orthographic turntable projection: spin around the vertical (z) axis, then tilt.
pub fn project(x: f64, y: f64, z: f64, azimuth: f64, elevation: f64) -> (f64, f64) {
    let (sa, ca) = azimuth.sin_cos();
    let (se, ce) = elevation.sin_cos();
    let sx = x * ca - y * sa;
    let depth = x * sa + y * ca;
    let sy = z * ce + depth * se;
    (sx, sy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InfoEvent, Preset};

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn front_view_shows_x_and_z() {
        assert!(close(project(1.0, 2.0, 3.0, 0.0, 0.0), (1.0, 3.0)));
    }

    #[test]
    fn quarter_turn_brings_y_to_front() {
        let p = project(0.0, 1.0, 0.0, std::f64::consts::FRAC_PI_2, 0.0);
        assert!(close(p, (-1.0, 0.0)));
    }

    #[test]
    fn frame_updates_positions_and_extent() {
        let mut s = UiState::new(DiffuseConfig::from_preset(Preset::Demo2d));
        s.apply_event(DiffuseEvent::Frame {
            frame: 3,
            dims: 2,
            positions: vec![3.0, 4.0, -1.0, 0.0],
        });
        assert_eq!(s.frame, 3);
        assert_eq!(s.projected(), vec![(3.0, 4.0), (-1.0, 0.0)]);
        assert!(s.extent >= 5.0);
        let summary = s.summary.as_ref().unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.axis_mean, vec![1.0, 2.0]);

        // A tighter cloud never shrinks the view.
        s.apply_event(DiffuseEvent::Frame {
            frame: 4,
            dims: 2,
            positions: vec![0.1, 0.1],
        });
        assert!(s.extent >= 5.0);
    }

    #[test]
    fn state_and_info_events() {
        let mut s = UiState::new(DiffuseConfig::default());
        s.apply_event(DiffuseEvent::StateChanged {
            state: DiffuserState::Paused,
        });
        assert!(s.paused);
        s.apply_event(DiffuseEvent::Info(InfoEvent::Seeded { seed: 5 }));
        assert_eq!(s.info, "RNG seed: 5");
        assert_eq!(s.exit_hint(), None);
    }

    #[test]
    fn stopped_run_asks_user_to_quit() {
        let mut s = UiState::new(DiffuseConfig::default());
        s.apply_event(DiffuseEvent::Info(InfoEvent::TickLimitReached { ticks: 3 }));
        s.apply_event(DiffuseEvent::StateChanged {
            state: DiffuserState::Stopped,
        });
        assert!(!s.paused);
        assert_eq!(s.info, "Stopped after 3 ticks");
        assert_eq!(s.exit_hint(), Some("press q to exit"));
    }
}
