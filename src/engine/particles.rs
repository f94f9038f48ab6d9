use crate::error::{LabError, LabResult};
use rand::Rng;
use rand_distr::Distribution;
use std::slice::ChunksExact;

/// Point positions stored as one flat buffer of `count * dims` coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSet {
    dims: usize,
    coords: Vec<f64>,
}

fn check_dims(dims: usize) -> LabResult<()> {
    match dims {
        2 | 3 => Ok(()),
        other => Err(LabError::InvalidDimensions(other)),
    }
}

impl ParticleSet {
    /// Wrap an existing coordinate buffer, e.g. a frame received over a channel.
    pub fn from_coords(dims: usize, coords: Vec<f64>) -> LabResult<Self> {
        check_dims(dims)?;
        if coords.is_empty() {
            return Err(LabError::EmptyParticleSet);
        }
        if coords.len() % dims != 0 {
            return Err(LabError::IndexOutOfBounds {
                index: coords.len(),
                len: coords.len() - coords.len() % dims,
            });
        }
        Ok(Self { dims, coords })
    }

    /// Draw every coordinate of `count` points independently from `dist`.
    pub fn sample<D, R>(dims: usize, count: usize, dist: &D, rng: &mut R) -> LabResult<Self>
    where
        D: Distribution<f64>,
        R: Rng + ?Sized,
    {
        check_dims(dims)?;
        if count == 0 {
            return Err(LabError::EmptyParticleSet);
        }
        let total = count
            .checked_mul(dims)
            .filter(|&n| n <= isize::MAX as usize / std::mem::size_of::<f64>())
            .ok_or(LabError::InvalidParameter {
                name: "count",
                value: count as f64,
            })?;
        let coords = dist.sample_iter(rng).take(total).collect();
        Ok(Self { dims, coords })
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.coords.len() / self.dims
    }

    pub fn points(&self) -> ChunksExact<'_, f64> {
        self.coords.chunks_exact(self.dims)
    }

    /// All values of one coordinate axis, in particle order.
    pub fn axis(&self, axis: usize) -> Vec<f64> {
        self.points().map(|p| p[axis]).collect()
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub(crate) fn coords_mut(&mut self) -> &mut [f64] {
        &mut self.coords
    }
}

/// One RGBA color per particle, fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSet {
    colors: Vec<[f32; 4]>,
}

impl ColorSet {
    /// Mostly-red opaque colors: red and alpha pinned to 1.0, green and blue random.
    pub fn reddish<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let colors = (0..count)
            .map(|_| [1.0, rng.gen::<f32>(), rng.gen::<f32>(), 1.0])
            .collect();
        Self { colors }
    }

    pub fn as_slice(&self) -> &[[f32; 4]] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::Normal;

    #[test]
    fn sample_has_requested_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let dist = Normal::new(0.0, 1.0).unwrap();
        let set = ParticleSet::sample(3, 20, &dist, &mut rng).unwrap();
        assert_eq!(set.dims(), 3);
        assert_eq!(set.len(), 20);
        assert_eq!(set.coords().len(), 60);
        assert_eq!(set.points().count(), 20);
        assert_eq!(set.axis(2).len(), 20);
    }

    #[test]
    fn rejects_bad_shapes() {
        let mut rng = StdRng::seed_from_u64(7);
        let dist = Normal::new(0.0, 1.0).unwrap();
        assert_eq!(
            ParticleSet::sample(4, 10, &dist, &mut rng),
            Err(LabError::InvalidDimensions(4))
        );
        assert_eq!(
            ParticleSet::sample(2, 0, &dist, &mut rng),
            Err(LabError::EmptyParticleSet)
        );
        assert!(ParticleSet::from_coords(2, vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn oversized_count_is_rejected_before_allocating() {
        let mut rng = StdRng::seed_from_u64(7);
        let dist = Normal::new(0.0, 1.0).unwrap();
        for count in [usize::MAX, usize::MAX / 2, isize::MAX as usize / 8] {
            assert!(matches!(
                ParticleSet::sample(3, count, &dist, &mut rng),
                Err(LabError::InvalidParameter { name: "count", .. })
            ));
        }
    }

    #[test]
    fn ragged_buffer_reports_trailing_index() {
        let set = ParticleSet::from_coords(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.points().nth(1), Some(&[3.0, 4.0][..]));
        assert_eq!(
            ParticleSet::from_coords(3, vec![0.0; 7]),
            Err(LabError::IndexOutOfBounds { index: 7, len: 6 })
        );
    }

    #[test]
    fn colors_are_red_and_opaque() {
        let mut rng = StdRng::seed_from_u64(1);
        let colors = ColorSet::reddish(50, &mut rng);
        assert_eq!(colors.as_slice().len(), 50);
        for c in colors.as_slice() {
            assert_eq!(c[0], 1.0);
            assert_eq!(c[3], 1.0);
            assert!((0.0..1.0).contains(&c[1]));
            assert!((0.0..1.0).contains(&c[2]));
        }
    }
}
