use crate::engine::particles::{ColorSet, ParticleSet};
use crate::model::DiffuseEvent;
use tokio::sync::mpsc::UnboundedSender;

/// Anything that can display a particle cloud.
///
/// Implementations redraw on each call; they never mutate the particles.
pub trait RenderSurface {
    fn set_positions(&mut self, positions: &ParticleSet);

    fn set_colors(&mut self, _colors: &ColorSet) {}
}

/// Forwards published frames to a presentation layer over a channel.
///
/// Colors are forwarded once; later identical pushes are dropped.
pub struct ChannelSurface {
    tx: UnboundedSender<DiffuseEvent>,
    frame: u64,
    colors_sent: bool,
}

impl ChannelSurface {
    pub fn new(tx: UnboundedSender<DiffuseEvent>) -> Self {
        Self {
            tx,
            frame: 0,
            colors_sent: false,
        }
    }
}

impl RenderSurface for ChannelSurface {
    fn set_positions(&mut self, positions: &ParticleSet) {
        let _ = self.tx.send(DiffuseEvent::Frame {
            frame: self.frame,
            dims: positions.dims(),
            positions: positions.coords().to_vec(),
        });
        self.frame += 1;
    }

    fn set_colors(&mut self, colors: &ColorSet) {
        if self.colors_sent {
            return;
        }
        let _ = self.tx.send(DiffuseEvent::Colors {
            colors: colors.as_slice().to_vec(),
        });
        self.colors_sent = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::sync::mpsc;

    #[test]
    fn numbers_frames_and_sends_colors_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut surface = ChannelSurface::new(tx);
        let set = ParticleSet::from_coords(3, vec![0.0; 6]).unwrap();
        let colors = ColorSet::reddish(2, &mut StdRng::seed_from_u64(3));

        for _ in 0..2 {
            surface.set_positions(&set);
            surface.set_colors(&colors);
        }
        drop(surface);

        let mut frames = Vec::new();
        let mut color_events = 0;
        while let Ok(ev) = rx.try_recv() {
            match ev {
                DiffuseEvent::Frame {
                    frame,
                    dims,
                    positions,
                } => {
                    assert_eq!(dims, 3);
                    assert_eq!(positions.len(), 6);
                    frames.push(frame);
                }
                DiffuseEvent::Colors { colors } => {
                    assert_eq!(colors.len(), 2);
                    color_events += 1;
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(frames, vec![0, 1]);
        assert_eq!(color_events, 1);
    }
}
