mod particles;
mod surface;

pub use particles::{ColorSet, ParticleSet};
pub use surface::{ChannelSurface, RenderSurface};

use crate::error::{LabError, LabResult};
use crate::metrics;
use crate::model::{DiffuseConfig, FrameSummary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn positive(name: &'static str, value: f64) -> LabResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LabError::InvalidParameter { name, value })
    }
}

/// Owns a particle cloud and applies one Gaussian random-walk step per tick.
pub struct ParticleDiffuser {
    particles: ParticleSet,
    colors: Option<ColorSet>,
    noise: Normal<f64>,
    rng: StdRng,
    seed: u64,
    tick: u64,
}

impl ParticleDiffuser {
    /// Place `cfg.count` particles around `cfg.center` with standard deviation
    /// `cfg.spread` per axis. 3D sets also get a fixed color per particle.
    pub fn new(cfg: &DiffuseConfig, seed: u64) -> LabResult<Self> {
        if !cfg.center.is_finite() {
            return Err(LabError::InvalidParameter {
                name: "center",
                value: cfg.center,
            });
        }
        let spread = positive("spread", cfg.spread)?;
        let step_size = positive("step size", cfg.step_size)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let initial = Normal::new(cfg.center, spread).map_err(|_| LabError::InvalidParameter {
            name: "spread",
            value: spread,
        })?;
        let particles = ParticleSet::sample(cfg.dims, cfg.count, &initial, &mut rng)?;
        let colors = (cfg.dims == 3).then(|| ColorSet::reddish(cfg.count, &mut rng));
        let noise = Normal::new(0.0, step_size).map_err(|_| LabError::InvalidParameter {
            name: "step size",
            value: step_size,
        })?;

        Ok(Self {
            particles,
            colors,
            noise,
            rng,
            seed,
            tick: 0,
        })
    }

    /// Add independent zero-mean noise to every coordinate of every particle.
    pub fn diffuse(&mut self) {
        for c in self.particles.coords_mut() {
            *c += self.noise.sample(&mut self.rng);
        }
    }

    /// Push the current positions (and colors, for 3D) to `surface`.
    pub fn publish<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        surface.set_positions(&self.particles);
        if let Some(colors) = &self.colors {
            surface.set_colors(colors);
        }
    }

    /// One timer tick: diffuse, then republish.
    pub fn step<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        self.diffuse();
        self.tick += 1;
        self.publish(surface);
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn colors(&self) -> Option<&ColorSet> {
        self.colors.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn summary(&self) -> LabResult<FrameSummary> {
        summarize_frame(&self.particles, self.tick)
    }
}

/// Mean and population standard deviation of each axis.
pub fn summarize_frame(particles: &ParticleSet, tick: u64) -> LabResult<FrameSummary> {
    let mut axis_mean = Vec::with_capacity(particles.dims());
    let mut axis_std_dev = Vec::with_capacity(particles.dims());
    for axis in 0..particles.dims() {
        let values = particles.axis(axis);
        axis_mean.push(metrics::mean(&values)?);
        axis_std_dev.push(metrics::std_dev(&values)?);
    }
    Ok(FrameSummary {
        tick,
        count: particles.len(),
        axis_mean,
        axis_std_dev,
    })
}
