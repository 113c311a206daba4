//! Search space over an ordered sequence of dimensions.
use crate::dims::{Dimension, ParamValue, Point};
use crate::samplers::lhs::LatinHypercubeSampler;
use crate::samplers::random::RandomSampler;
use crate::samplers::Sampler;
use crate::{ErrorKind, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// An ordered, immutable sequence of [`Dimension`]s defining the Cartesian
/// product domain that points are drawn from.
///
/// Dimension order is significant: it defines the positional layout of every
/// sampled [`Point`]. A `Space` is immutable after construction and may be
/// shared read-only across any number of sampling calls.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Space {
    dimensions: Vec<Dimension>,
}
impl Space {
    /// Makes a new `Space` from an ordered dimension sequence.
    ///
    /// # Errors
    ///
    /// If `dimensions` is empty, this function returns an
    /// `ErrorKind::InvalidConfig` error. Each dimension validates its own
    /// bounds at its construction.
    pub fn new(dimensions: Vec<Dimension>) -> Result<Self> {
        track_assert!(!dimensions.is_empty(), ErrorKind::InvalidConfig);
        Ok(Self { dimensions })
    }

    /// Returns the number of dimensions.
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Returns `false`; a constructed `Space` is never empty.
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Returns the `i`-th dimension, if any.
    pub fn dimension(&self, i: usize) -> Option<&Dimension> {
        self.dimensions.get(i)
    }

    /// Returns all dimensions in order.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Draws `n_samples` points by independent random sampling.
    ///
    /// With `random_state = Some(seed)` a fresh RNG is derived from the seed
    /// at the start of this call, so repeated calls with the same seed return
    /// the identical sequence. With `None` the thread-local entropy source is
    /// used, which continuously advances and never repeats.
    ///
    /// # Errors
    ///
    /// If `n_samples` is zero, this function returns an
    /// `ErrorKind::InvalidInput` error before consuming any randomness.
    pub fn rvs(&self, n_samples: usize, random_state: Option<u64>) -> Result<Vec<Point>> {
        track!(self.sample_with(&RandomSampler::new(), n_samples, random_state))
    }

    /// Draws `n` points by Latin Hypercube sampling with midpoint stratum
    /// placement.
    ///
    /// Seeding behaves as in [`Space::rvs`]: the same seed reproduces the
    /// identical point set, while different seeds change only the joint
    /// assignment across dimensions, never the per-dimension value sets.
    ///
    /// # Errors
    ///
    /// If `n` is zero, this function returns an `ErrorKind::InvalidInput`
    /// error before consuming any randomness.
    pub fn lhs(&self, n: usize, seed: Option<u64>) -> Result<Vec<Point>> {
        track!(self.sample_with(&LatinHypercubeSampler::new(), n, seed))
    }

    fn sample_with<S: Sampler>(&self, sampler: &S, n: usize, seed: Option<u64>) -> Result<Vec<Point>> {
        match seed {
            Some(seed) => track!(sampler.sample(self, n, &mut StdRng::seed_from_u64(seed))),
            None => track!(sampler.sample(self, n, &mut rand::thread_rng())),
        }
    }

    /// Returns `true` if `point` has one in-domain value per dimension, in order.
    pub fn contains(&self, point: &[ParamValue]) -> bool {
        point.len() == self.dimensions.len()
            && self
                .dimensions
                .iter()
                .zip(point.iter())
                .all(|(d, v)| d.contains(v))
    }

    /// Encodes a point into per-dimension uniform variates in `[0, 1)`.
    ///
    /// This is the whole-point counterpart of
    /// [`Dimension::inverse_transform`], used to re-derive stratum membership
    /// and by downstream optimizers that work in the unit cube.
    ///
    /// # Errors
    ///
    /// If `point` has the wrong length or any value is outside its
    /// dimension's domain, this function returns an `ErrorKind::InvalidInput`
    /// error.
    pub fn encode(&self, point: &[ParamValue]) -> Result<Vec<f64>> {
        track_assert_eq!(point.len(), self.dimensions.len(), ErrorKind::InvalidInput);
        self.dimensions
            .iter()
            .zip(point.iter())
            .map(|(d, v)| track!(d.inverse_transform(v)))
            .collect()
    }

    /// Decodes per-dimension uniform variates into a point.
    ///
    /// Variates may be anywhere in the closed interval `[0, 1]`: `encode`
    /// maps a dimension's upper bound to exactly `1.0`, and every transform
    /// clamps that boundary back into the domain.
    ///
    /// # Errors
    ///
    /// If `unit` has the wrong length or any variate is outside `[0, 1]`,
    /// this function returns an `ErrorKind::InvalidInput` error.
    pub fn decode(&self, unit: &[f64]) -> Result<Point> {
        track_assert_eq!(unit.len(), self.dimensions.len(), ErrorKind::InvalidInput);
        self.dimensions
            .iter()
            .zip(unit.iter())
            .map(|(d, &u)| {
                track_assert!(0.0 <= u && u <= 1.0, ErrorKind::InvalidInput; u);
                Ok(d.transform(u))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackable::result::TestResult;

    fn example_space() -> Result<Space> {
        track!(Space::new(vec![
            track!(Dimension::real(1.0, 10.0))?,
            track!(Dimension::integer(1, 10))?,
            track!(Dimension::categorical(vec!["cat", "dog", "elephant"]))?,
        ]))
    }

    #[test]
    fn empty_space_is_rejected() {
        assert!(Space::new(Vec::new()).is_err());
    }

    #[test]
    fn accessors_work() -> TestResult {
        let space = track!(example_space())?;
        assert_eq!(space.len(), 3);
        assert!(!space.is_empty());
        assert!(space.dimension(2).is_some());
        assert!(space.dimension(3).is_none());
        Ok(())
    }

    #[test]
    fn rvs_is_deterministic_given_a_seed() -> TestResult {
        let space = track!(example_space())?;
        let a = track!(space.rvs(10, Some(42)))?;
        let b = track!(space.rvs(10, Some(42)))?;
        assert_eq!(a, b);

        let c = track!(space.rvs(10, Some(43)))?;
        assert_ne!(a, c);
        Ok(())
    }

    #[test]
    fn unseeded_rvs_never_repeats() -> TestResult {
        let space = track!(example_space())?;
        let a = track!(space.rvs(5, None))?;
        let b = track!(space.rvs(5, None))?;
        assert_ne!(a, b);
        Ok(())
    }

    #[test]
    fn sampled_points_are_contained() -> TestResult {
        let space = track!(example_space())?;
        for point in track!(space.rvs(100, Some(0)))? {
            assert!(space.contains(&point));
        }
        Ok(())
    }

    #[test]
    fn contains_rejects_malformed_points() -> TestResult {
        let space = track!(example_space())?;
        assert!(!space.contains(&[ParamValue::Float(2.0)]));
        assert!(!space.contains(&[
            ParamValue::Float(2.0),
            ParamValue::Int(11),
            ParamValue::Cat("dog".to_owned()),
        ]));
        assert!(!space.contains(&[
            ParamValue::Int(2),
            ParamValue::Int(5),
            ParamValue::Cat("dog".to_owned()),
        ]));
        Ok(())
    }

    #[test]
    fn encode_decode_round_trips() -> TestResult {
        let space = track!(example_space())?;
        for point in track!(space.rvs(20, Some(3)))? {
            let unit = track!(space.encode(&point))?;
            assert!(unit.iter().all(|&u| 0.0 <= u && u < 1.0));
            let decoded = track!(space.decode(&unit))?;
            for (a, b) in decoded.iter().zip(point.iter()) {
                match (a, b) {
                    // Continuous values round-trip within float tolerance only.
                    (ParamValue::Float(x), ParamValue::Float(y)) => {
                        assert!((x - y).abs() < 1e-9)
                    }
                    _ => assert_eq!(a, b),
                }
            }
        }
        Ok(())
    }

    #[test]
    fn boundary_point_round_trips() -> TestResult {
        let space = track!(example_space())?;
        let point = vec![
            ParamValue::Float(10.0),
            ParamValue::Int(10),
            ParamValue::Cat("elephant".to_owned()),
        ];
        assert!(space.contains(&point));

        // The upper bound encodes to exactly 1.0; decode must accept it.
        let unit = track!(space.encode(&point))?;
        assert_eq!(unit[0], 1.0);
        let decoded = track!(space.decode(&unit))?;
        assert!(space.contains(&decoded));
        assert_eq!(decoded[1], point[1]);
        assert_eq!(decoded[2], point[2]);
        let v = decoded[0].as_float().unwrap_or_else(|| unreachable!());
        assert!((v - 10.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn decode_validates_input() -> TestResult {
        let space = track!(example_space())?;
        assert!(space.decode(&[0.5, 0.5]).is_err());
        assert!(space.decode(&[0.5, 1.5, 0.5]).is_err());
        Ok(())
    }
}
