//! Constraints restricting where points may live inside a space.
use crate::dims::{Dimension, ParamValue, Point};
use crate::space::Space;
use crate::{ErrorKind, Result};
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Consecutive rejected draws tolerated per value before sampling gives up.
const MAX_REJECTIONS: usize = 10_000;

/// A sub-domain of a single dimension, used by [`Constraint::Inclusive`] and
/// [`Constraint::Exclusive`].
///
/// The variant must match the constrained dimension's variant; interval ends
/// are inclusive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// The closed interval `[low, high]` of a `Real` dimension.
    Real { low: f64, high: f64 },

    /// The closed integer interval `[low, high]` of an `Integer` dimension.
    Integer { low: i64, high: i64 },

    /// A subset of a `Categorical` dimension's labels.
    Categorical { labels: Vec<String> },
}
impl Region {
    /// Makes a real-interval region.
    ///
    /// # Errors
    ///
    /// If `low` or `high` is not finite, or `low > high`, this function
    /// returns an `ErrorKind::InvalidConfig` error.
    pub fn real(low: f64, high: f64) -> Result<Self> {
        track_assert!(low.is_finite(), ErrorKind::InvalidConfig; low, high);
        track_assert!(high.is_finite(), ErrorKind::InvalidConfig; low, high);
        track_assert!(low <= high, ErrorKind::InvalidConfig; low, high);
        Ok(Region::Real { low, high })
    }

    /// Makes an integer-interval region.
    ///
    /// # Errors
    ///
    /// If `low > high`, this function returns an `ErrorKind::InvalidConfig` error.
    pub fn integer(low: i64, high: i64) -> Result<Self> {
        track_assert!(low <= high, ErrorKind::InvalidConfig; low, high);
        Ok(Region::Integer { low, high })
    }

    /// Makes a label-subset region.
    ///
    /// # Errors
    ///
    /// If `labels` is empty, this function returns an
    /// `ErrorKind::InvalidConfig` error.
    pub fn categorical<I, T>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let labels = labels.into_iter().map(Into::into).collect::<Vec<_>>();
        track_assert!(!labels.is_empty(), ErrorKind::InvalidConfig);
        Ok(Region::Categorical { labels })
    }

    /// Returns `true` if `value` has this region's variant and lies inside it.
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (Region::Real { low, high }, ParamValue::Float(v)) => low <= v && v <= high,
            (Region::Integer { low, high }, ParamValue::Int(v)) => low <= v && v <= high,
            (Region::Categorical { labels }, ParamValue::Cat(v)) => labels.iter().any(|l| l == v),
            _ => false,
        }
    }
}

/// A restriction on one dimension of a space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// The dimension is pinned to exactly `value`.
    Single {
        /// Index of the constrained dimension.
        dim: usize,
        /// The only admissible value.
        value: ParamValue,
    },

    /// The dimension must lie inside `region` (inside any one of them when a
    /// dimension carries several inclusive constraints).
    Inclusive {
        /// Index of the constrained dimension.
        dim: usize,
        /// The admissible sub-domain.
        region: Region,
    },

    /// The dimension must lie outside `region` (outside every one of them
    /// when a dimension carries several exclusive constraints).
    Exclusive {
        /// Index of the constrained dimension.
        dim: usize,
        /// The forbidden sub-domain.
        region: Region,
    },
}
impl Constraint {
    /// Shorthand for a [`Constraint::Single`].
    pub fn single<V: Into<ParamValue>>(dim: usize, value: V) -> Self {
        Constraint::Single {
            dim,
            value: value.into(),
        }
    }

    /// Shorthand for a [`Constraint::Inclusive`].
    pub fn inclusive(dim: usize, region: Region) -> Self {
        Constraint::Inclusive { dim, region }
    }

    /// Shorthand for a [`Constraint::Exclusive`].
    pub fn exclusive(dim: usize, region: Region) -> Self {
        Constraint::Exclusive { dim, region }
    }

    /// Returns the index of the constrained dimension.
    pub fn dim(&self) -> usize {
        match self {
            Constraint::Single { dim, .. }
            | Constraint::Inclusive { dim, .. }
            | Constraint::Exclusive { dim, .. } => *dim,
        }
    }
}

/// A validated set of constraints over a [`Space`].
///
/// Construction checks every constraint against the space: indices must be
/// in range, variants must match the dimension they constrain, and pinned
/// values and regions must lie inside the dimension's own domain. A
/// dimension may carry any number of inclusive and exclusive constraints;
/// a point satisfies the set when every dimension is equal to its pinned
/// value (if any), inside at least one inclusive region (if any exist), and
/// outside all exclusive regions.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraints {
    space: Space,
    constraints: Vec<Constraint>,
    single: Vec<Option<ParamValue>>,
    inclusive: Vec<Vec<Region>>,
    exclusive: Vec<Vec<Region>>,
}
impl Constraints {
    /// Makes a new `Constraints` set over `space`.
    ///
    /// # Errors
    ///
    /// If any constraint references a dimension index outside `space`, has a
    /// variant that does not match its dimension, pins a value the dimension
    /// does not contain, or carries a region that is not a sub-domain of its
    /// dimension, this function returns an `ErrorKind::InvalidConfig` error.
    pub fn new(constraints: Vec<Constraint>, space: Space) -> Result<Self> {
        let mut single = vec![None; space.len()];
        let mut inclusive = vec![Vec::new(); space.len()];
        let mut exclusive = vec![Vec::new(); space.len()];
        for constraint in &constraints {
            let i = constraint.dim();
            let dimension = track_assert_some!(
                space.dimension(i),
                ErrorKind::InvalidConfig,
                "dimension index out of range: {}",
                i
            );
            match constraint {
                Constraint::Single { value, .. } => {
                    track_assert!(
                        dimension.contains(value),
                        ErrorKind::InvalidConfig,
                        "dimension {} does not contain {:?}",
                        i,
                        value
                    );
                    single[i] = Some(value.clone());
                }
                Constraint::Inclusive { region, .. } => {
                    track!(check_region(dimension, region, i))?;
                    inclusive[i].push(region.clone());
                }
                Constraint::Exclusive { region, .. } => {
                    track!(check_region(dimension, region, i))?;
                    exclusive[i].push(region.clone());
                }
            }
        }
        Ok(Self {
            space,
            constraints,
            single,
            inclusive,
            exclusive,
        })
    }

    /// Returns the constrained space.
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Returns the constraint list this set was built from.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns `true` if `point` satisfies every constraint.
    ///
    /// A point of the wrong length never satisfies the set; a value of the
    /// wrong variant fails single and inclusive constraints and trivially
    /// passes exclusive ones (it cannot lie inside the excluded region).
    pub fn validate(&self, point: &[ParamValue]) -> bool {
        point.len() == self.space.len()
            && point
                .iter()
                .enumerate()
                .all(|(i, value)| self.validate_value(i, value))
    }

    fn validate_value(&self, i: usize, value: &ParamValue) -> bool {
        if let Some(pinned) = &self.single[i] {
            if value != pinned {
                return false;
            }
        }
        if !self.inclusive[i].is_empty() && !self.inclusive[i].iter().any(|r| r.contains(value)) {
            return false;
        }
        !self.exclusive[i].iter().any(|r| r.contains(value))
    }

    /// Draws `n_samples` points satisfying every constraint, by independent
    /// random sampling. Seeding behaves as in
    /// [`Space::rvs`](crate::space::Space::rvs).
    ///
    /// Pinned dimensions take their value directly without consuming
    /// randomness; other dimensions redraw until their constraints hold.
    ///
    /// # Errors
    ///
    /// If `n_samples` is zero, this function returns an
    /// `ErrorKind::InvalidInput` error before consuming any randomness.
    /// If a dimension's constraints reject `10_000` consecutive draws (an
    /// effectively unsatisfiable set), an `ErrorKind::Other` error is
    /// returned.
    pub fn rvs(&self, n_samples: usize, random_state: Option<u64>) -> Result<Vec<Point>> {
        match random_state {
            Some(seed) => track!(self.sample(n_samples, &mut StdRng::seed_from_u64(seed))),
            None => track!(self.sample(n_samples, &mut rand::thread_rng())),
        }
    }

    /// Draws `n_samples` satisfying points using `rng` as the sole source of
    /// randomness.
    ///
    /// # Errors
    ///
    /// As for [`Constraints::rvs`].
    pub fn sample<R: Rng + ?Sized>(&self, n_samples: usize, rng: &mut R) -> Result<Vec<Point>> {
        track_assert!(n_samples > 0, ErrorKind::InvalidInput; n_samples);
        (0..n_samples)
            .map(|_| {
                (0..self.space.len())
                    .map(|i| track!(self.draw_value(i, rng)))
                    .collect()
            })
            .collect()
    }

    fn draw_value<R: Rng + ?Sized>(&self, i: usize, rng: &mut R) -> Result<ParamValue> {
        if let Some(pinned) = &self.single[i] {
            return Ok(pinned.clone());
        }
        let dimension = track_assert_some!(self.space.dimension(i), ErrorKind::Bug);
        for _ in 0..MAX_REJECTIONS {
            let value = dimension.sample(rng);
            if self.validate_value(i, &value) {
                return Ok(value);
            }
        }
        track_panic!(
            ErrorKind::Other,
            "constraints on dimension {} rejected {} consecutive draws",
            i,
            MAX_REJECTIONS
        )
    }
}

fn check_region(dimension: &Dimension, region: &Region, i: usize) -> Result<()> {
    match (dimension, region) {
        (Dimension::Real(d), Region::Real { low, high }) => {
            track_assert!(d.low() <= *low, ErrorKind::InvalidConfig; i, low);
            track_assert!(*high <= d.high(), ErrorKind::InvalidConfig; i, high);
        }
        (Dimension::Integer(d), Region::Integer { low, high }) => {
            track_assert!(d.low() <= *low, ErrorKind::InvalidConfig; i, low);
            track_assert!(*high <= d.high(), ErrorKind::InvalidConfig; i, high);
        }
        (Dimension::Categorical(d), Region::Categorical { labels }) => {
            for label in labels {
                track_assert!(
                    d.contains(label),
                    ErrorKind::InvalidConfig,
                    "unknown category {:?} for dimension {}",
                    label,
                    i
                );
            }
        }
        _ => track_panic!(
            ErrorKind::InvalidConfig,
            "constraint variant does not match dimension {}",
            i
        ),
    }
    Ok(())
}
