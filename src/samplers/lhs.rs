//! Latin Hypercube sampling.
use crate::dims::Point;
use crate::samplers::Sampler;
use crate::space::Space;
use crate::{ErrorKind, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Draws `n` points so that every dimension's marginal is exactly stratified.
///
/// Per dimension, `[0, 1)` is partitioned into `n` equal strata and exactly
/// one representative variate is taken from each, either the stratum midpoint
/// (the default) or a jittered draw within the stratum. The transformed
/// values are then shuffled with a fresh, independent permutation per
/// dimension, so the set of values along each axis is fixed while their
/// assignment to output points is randomized. No joint-coverage guarantee is
/// made across dimensions.
#[derive(Debug, Default, Clone, Copy)]
pub struct LatinHypercubeSampler {
    jitter: bool,
}
impl LatinHypercubeSampler {
    /// Makes a new `LatinHypercubeSampler` with midpoint stratum placement.
    pub const fn new() -> Self {
        Self { jitter: false }
    }

    /// Makes a new `LatinHypercubeSampler` that draws the representative
    /// uniformly within each stratum instead of using the midpoint.
    pub const fn jittered() -> Self {
        Self { jitter: true }
    }
}
impl Sampler for LatinHypercubeSampler {
    fn sample<R: Rng + ?Sized>(&self, space: &Space, n: usize, rng: &mut R) -> Result<Vec<Point>> {
        track_assert!(n > 0, ErrorKind::InvalidInput; n);

        let mut columns = Vec::with_capacity(space.len());
        for dimension in space.dimensions() {
            let mut column = (0..n)
                .map(|k| {
                    let offset = if self.jitter { rng.gen::<f64>() } else { 0.5 };
                    dimension.transform((k as f64 + offset) / n as f64)
                })
                .collect::<Vec<_>>();
            // One independent permutation per dimension; sharing a single
            // permutation would correlate the axes.
            column.shuffle(rng);
            columns.push(column);
        }

        let mut points = vec![Vec::with_capacity(space.len()); n];
        for column in columns {
            for (point, value) in points.iter_mut().zip(column) {
                point.push(value);
            }
        }
        Ok(points)
    }
}
