//! Independent random sampling.
use crate::dims::Point;
use crate::samplers::Sampler;
use crate::space::Space;
use crate::{ErrorKind, Result};
use rand::distributions::Distribution;
use rand::Rng;

/// Draws points by sampling every dimension independently from its prior.
///
/// One uniform variate is drawn per dimension per point and mapped through
/// the dimension's quantile transform; no correlation is modeled across
/// samples or across dimensions within a sample.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSampler;
impl RandomSampler {
    /// Makes a new `RandomSampler` instance.
    pub const fn new() -> Self {
        Self
    }
}
impl Sampler for RandomSampler {
    fn sample<R: Rng + ?Sized>(&self, space: &Space, n: usize, rng: &mut R) -> Result<Vec<Point>> {
        track_assert!(n > 0, ErrorKind::InvalidInput; n);
        let points = (0..n)
            .map(|_| space.dimensions().iter().map(|d| d.sample(rng)).collect())
            .collect();
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::Dimension;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use trackable::result::TestResult;

    #[test]
    fn zero_samples_is_rejected() -> TestResult {
        let space = track!(Space::new(vec![track!(Dimension::real(0.0, 1.0))?]))?;
        assert!(RandomSampler::new()
            .sample(&space, 0, &mut rand::thread_rng())
            .is_err());
        Ok(())
    }

    #[test]
    fn values_stay_inside_their_dimensions() -> TestResult {
        let space = track!(Space::new(vec![
            track!(Dimension::real(-2.0, 3.0))?,
            track!(Dimension::log_real(1e-3, 1e2))?,
            track!(Dimension::integer(-5, 5))?,
            track!(Dimension::categorical(vec!["x", "y"]))?,
        ]))?;
        let mut rng = StdRng::seed_from_u64(11);
        for point in track!(RandomSampler::new().sample(&space, 500, &mut rng))? {
            assert_eq!(point.len(), 4);
            assert!(space.contains(&point));
        }
        Ok(())
    }

    #[test]
    fn log_uniform_values_are_uniform_in_log_space() -> TestResult {
        let space = track!(Space::new(vec![track!(Dimension::log_real(1e-4, 1e-1))?]))?;
        let mut rng = StdRng::seed_from_u64(5);
        let points = track!(RandomSampler::new().sample(&space, 8_000, &mut rng))?;

        // Bucket ln(v) into quartiles of [ln(low), ln(high)]; each quartile
        // should receive about a quarter of the samples.
        let (ln_low, ln_high) = ((1e-4f64).ln(), (1e-1f64).ln());
        let mut counts = [0usize; 4];
        for point in &points {
            let v = point[0].as_float().unwrap_or_else(|| unreachable!());
            let t = (v.ln() - ln_low) / (ln_high - ln_low);
            counts[((t * 4.0).floor() as usize).min(3)] += 1;
        }
        for &c in &counts {
            assert!(1_750 < c && c < 2_250, "counts={:?}", counts);
        }
        Ok(())
    }

    #[test]
    fn categorical_frequencies_are_roughly_uniform() -> TestResult {
        let space = track!(Space::new(vec![track!(Dimension::categorical(vec![
            "a", "b", "c"
        ]))?]))?;
        let mut rng = StdRng::seed_from_u64(9);
        let points = track!(RandomSampler::new().sample(&space, 9_000, &mut rng))?;

        let mut counts = [0usize; 3];
        for point in &points {
            match point[0].as_str() {
                Some("a") => counts[0] += 1,
                Some("b") => counts[1] += 1,
                Some("c") => counts[2] += 1,
                other => panic!("unexpected value: {:?}", other),
            }
        }
        for &c in &counts {
            assert!(2_700 < c && c < 3_300, "counts={:?}", counts);
        }
        Ok(())
    }

    #[test]
    fn same_rng_stream_reproduces_samples() -> TestResult {
        let space = track!(Space::new(vec![
            track!(Dimension::real(0.0, 1.0))?,
            track!(Dimension::integer(0, 100))?,
        ]))?;
        let a = track!(RandomSampler::new().sample(&space, 20, &mut StdRng::seed_from_u64(1)))?;
        let b = track!(RandomSampler::new().sample(&space, 20, &mut StdRng::seed_from_u64(1)))?;
        assert_eq!(a, b);
        Ok(())
    }
}
