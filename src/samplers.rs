//! Sampling strategies over a search space.
use crate::dims::Point;
use crate::space::Space;
use crate::Result;
use rand::Rng;

pub mod lhs;
pub mod random;

/// A strategy for drawing a batch of points from a [`Space`].
///
/// The RNG is threaded explicitly so callers control seeding and no sampler
/// owns hidden global state; [`Space::rvs`](crate::space::Space::rvs) and
/// [`Space::lhs`](crate::space::Space::lhs) provide the seed-handling
/// conveniences on top of this trait.
pub trait Sampler {
    /// Draws `n` points from `space` using `rng` as the sole source of
    /// randomness.
    ///
    /// # Errors
    ///
    /// If `n` is zero, implementations return an `ErrorKind::InvalidInput`
    /// error before consuming any randomness.
    fn sample<R: Rng + ?Sized>(&self, space: &Space, n: usize, rng: &mut R) -> Result<Vec<Point>>;
}
