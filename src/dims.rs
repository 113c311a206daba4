//! Search space dimensions.
use crate::{ErrorKind, Result};
use ordered_float::NotNan;
use rand::distributions::Distribution;
use rand::Rng;
use std::collections::HashSet;

/// One full sample: an ordered sequence of values, positionally aligned
/// with a space's dimension order.
pub type Point = Vec<ParamValue>;

/// A value sampled from a single dimension.
///
/// The runtime variant matches the dimension's variant: `Float` for
/// [`Real`], `Int` for [`Integer`], `Cat` for [`Categorical`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamValue {
    /// A continuous value.
    Float(f64),

    /// A discrete integer value.
    Int(i64),

    /// A categorical label.
    Cat(String),
}
impl ParamValue {
    /// Returns the inner value if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        if let ParamValue::Float(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Returns the inner value if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        if let ParamValue::Int(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Returns the inner label if this is a `Cat`.
    pub fn as_str(&self) -> Option<&str> {
        if let ParamValue::Cat(v) = self {
            Some(v)
        } else {
            None
        }
    }
}
impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}
impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}
impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Cat(v.to_owned())
    }
}
impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Cat(v)
    }
}

/// Prior distribution of a continuous dimension.
///
/// The prior determines the quantile transform used by every sampling
/// strategy, so random and Latin Hypercube sampling see the same density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prior {
    /// Uniform density over `[low, high)`.
    Uniform,

    /// Uniform density over `[ln(low), ln(high))`; concentrates mass near `low`.
    LogUniform,
}

/// Continuous numerical dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Real {
    low: NotNan<f64>,
    high: NotNan<f64>,
    prior: Prior,
}
impl Real {
    /// Makes a new `Real` dimension with a uniform prior.
    ///
    /// # Errors
    ///
    /// If one of the following conditions is satisfied, this function returns
    /// an `ErrorKind::InvalidConfig` error:
    ///
    /// - `low` or `high` is not a finite number
    /// - `low >= high`
    pub fn new(low: f64, high: f64) -> Result<Self> {
        track!(Self::with_prior(low, high, Prior::Uniform))
    }

    /// Makes a new `Real` dimension with a log-uniform prior.
    ///
    /// # Errors
    ///
    /// In addition to the conditions checked by [`Real::new`], `low` must be
    /// positive (the domain of the logarithm), otherwise an
    /// `ErrorKind::InvalidConfig` error is returned.
    pub fn log_uniform(low: f64, high: f64) -> Result<Self> {
        track!(Self::with_prior(low, high, Prior::LogUniform))
    }

    fn with_prior(low: f64, high: f64, prior: Prior) -> Result<Self> {
        track_assert!(low.is_finite(), ErrorKind::InvalidConfig; low, high);
        track_assert!(high.is_finite(), ErrorKind::InvalidConfig; low, high);
        track_assert!(low < high, ErrorKind::InvalidConfig; low, high);
        track_assert!((high - low).is_finite(), ErrorKind::InvalidConfig; low, high);
        if prior == Prior::LogUniform {
            track_assert!(low > 0.0, ErrorKind::InvalidConfig; low, high);
        }
        Ok(unsafe {
            Self {
                low: NotNan::unchecked_new(low),
                high: NotNan::unchecked_new(high),
                prior,
            }
        })
    }

    /// Returns the lower bound of this dimension.
    pub fn low(&self) -> f64 {
        self.low.into_inner()
    }

    /// Returns the upper bound of this dimension.
    pub fn high(&self) -> f64 {
        self.high.into_inner()
    }

    /// Returns the prior of this dimension.
    pub fn prior(&self) -> Prior {
        self.prior
    }

    /// Maps a uniform variate `u` in `[0, 1)` to a value inside this
    /// dimension, following the prior's quantile function.
    pub fn transform(&self, u: f64) -> f64 {
        match self.prior {
            Prior::Uniform => self.low() + u * (self.high() - self.low()),
            Prior::LogUniform => {
                let ln_low = self.low().ln();
                let ln_high = self.high().ln();
                (ln_low + u * (ln_high - ln_low)).exp()
            }
        }
    }

    /// Maps a value back to its uniform variate; the exact left inverse of
    /// [`Real::transform`].
    ///
    /// # Errors
    ///
    /// If `value` lies outside `[low, high]`, this function returns an
    /// `ErrorKind::InvalidInput` error.
    pub fn inverse_transform(&self, value: f64) -> Result<f64> {
        track_assert!(self.contains(value), ErrorKind::InvalidInput; value);
        let u = match self.prior {
            Prior::Uniform => (value - self.low()) / (self.high() - self.low()),
            Prior::LogUniform => {
                let ln_low = self.low().ln();
                let ln_high = self.high().ln();
                (value.ln() - ln_low) / (ln_high - ln_low)
            }
        };
        Ok(u)
    }

    /// Returns `true` if `value` lies inside `[low, high]`.
    pub fn contains(&self, value: f64) -> bool {
        self.low() <= value && value <= self.high()
    }
}
impl Distribution<f64> for Real {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.transform(rng.gen::<f64>())
    }
}

/// Discrete integer dimension over the inclusive range `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Integer {
    low: i64,
    high: i64,
}
impl Integer {
    /// Makes a new `Integer` dimension.
    ///
    /// # Errors
    ///
    /// If `low > high`, or the range width `high - low` does not fit in an
    /// `i64`, this function returns an `ErrorKind::InvalidConfig` error.
    pub fn new(low: i64, high: i64) -> Result<Self> {
        track_assert!(low <= high, ErrorKind::InvalidConfig; low, high);
        track_assert!(high.checked_sub(low).is_some(), ErrorKind::InvalidConfig; low, high);
        Ok(Self { low, high })
    }

    /// Returns the lower bound of this dimension.
    pub fn low(&self) -> i64 {
        self.low
    }

    /// Returns the upper bound of this dimension.
    pub fn high(&self) -> i64 {
        self.high
    }

    /// Returns the number of integers in this dimension.
    pub fn size(&self) -> u64 {
        (self.high - self.low) as u64 + 1
    }

    /// Maps a uniform variate `u` in `[0, 1)` to an integer in `[low, high]`.
    ///
    /// The unit interval is divided into `high - low + 1` equal bins so every
    /// integer is covered with equal probability; the result is clamped to
    /// `high` at the `u = 1` boundary.
    pub fn transform(&self, u: f64) -> i64 {
        let offset = (u * self.size() as f64).floor() as i64;
        self.low + offset.min(self.high - self.low)
    }

    /// Maps an integer back to the midpoint of its bin in `[0, 1)`; a left
    /// inverse of [`Integer::transform`].
    ///
    /// # Errors
    ///
    /// If `value` lies outside `[low, high]`, this function returns an
    /// `ErrorKind::InvalidInput` error.
    pub fn inverse_transform(&self, value: i64) -> Result<f64> {
        track_assert!(self.contains(value), ErrorKind::InvalidInput; value);
        Ok(((value - self.low) as f64 + 0.5) / self.size() as f64)
    }

    /// Returns `true` if `value` lies inside `[low, high]`.
    pub fn contains(&self, value: i64) -> bool {
        self.low <= value && value <= self.high
    }
}
impl Distribution<i64> for Integer {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.transform(rng.gen::<f64>())
    }
}

/// Categorical dimension over a finite set of unique labels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Categorical {
    categories: Vec<String>,

    // Cumulative normalized weight boundaries; `None` means equal bins.
    cumulative: Option<Vec<f64>>,
}
impl Categorical {
    /// Makes a new `Categorical` dimension with a uniform prior over the labels.
    ///
    /// # Errors
    ///
    /// If `categories` is empty or contains duplicate labels, this function
    /// returns an `ErrorKind::InvalidConfig` error.
    pub fn new<I, T>(categories: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let categories = categories.into_iter().map(Into::into).collect::<Vec<_>>();
        track!(Self::validate_labels(&categories))?;
        Ok(Self {
            categories,
            cumulative: None,
        })
    }

    /// Makes a new `Categorical` dimension whose labels are drawn with
    /// probabilities proportional to `weights`.
    ///
    /// The weights are normalized at construction.
    ///
    /// # Errors
    ///
    /// In addition to the conditions checked by [`Categorical::new`], this
    /// function returns an `ErrorKind::InvalidConfig` error if `weights`
    /// differs in length from `categories`, contains a non-finite or negative
    /// entry, or sums to zero.
    pub fn weighted<I, T>(categories: I, weights: Vec<f64>) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let categories = categories.into_iter().map(Into::into).collect::<Vec<_>>();
        track!(Self::validate_labels(&categories))?;
        track_assert_eq!(weights.len(), categories.len(), ErrorKind::InvalidConfig);
        for &w in &weights {
            track_assert!(w.is_finite(), ErrorKind::InvalidConfig; w);
            track_assert!(w >= 0.0, ErrorKind::InvalidConfig; w);
        }
        let total = weights.iter().sum::<f64>();
        track_assert!(total > 0.0, ErrorKind::InvalidConfig; total);

        let mut cumulative = Vec::with_capacity(weights.len());
        let mut acc = 0.0;
        for w in &weights {
            acc += w / total;
            cumulative.push(acc);
        }
        // Guard the last boundary against accumulated rounding.
        *cumulative.last_mut().unwrap_or_else(|| unreachable!()) = 1.0;

        Ok(Self {
            categories,
            cumulative: Some(cumulative),
        })
    }

    fn validate_labels(categories: &[String]) -> Result<()> {
        track_assert!(!categories.is_empty(), ErrorKind::InvalidConfig);
        let unique = categories.iter().collect::<HashSet<_>>();
        track_assert_eq!(unique.len(), categories.len(), ErrorKind::InvalidConfig);
        Ok(())
    }

    /// Returns the labels of this dimension.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns the number of labels.
    pub fn size(&self) -> usize {
        self.categories.len()
    }

    /// Maps a uniform variate `u` in `[0, 1)` to a label.
    ///
    /// Without weights the unit interval is divided into `size()` equal bins;
    /// with weights the bins follow the cumulative normalized weights.
    pub fn transform(&self, u: f64) -> &str {
        &self.categories[self.index_for(u)]
    }

    fn index_for(&self, u: f64) -> usize {
        let last = self.categories.len() - 1;
        match &self.cumulative {
            None => ((u * self.categories.len() as f64).floor() as usize).min(last),
            Some(cumulative) => cumulative
                .iter()
                .position(|&bound| u < bound)
                .unwrap_or(last),
        }
    }

    /// Maps a label back to the midpoint of its bin in `[0, 1)`; a left
    /// inverse of [`Categorical::transform`].
    ///
    /// # Errors
    ///
    /// If `label` is not one of this dimension's categories, this function
    /// returns an `ErrorKind::InvalidInput` error.
    pub fn inverse_transform(&self, label: &str) -> Result<f64> {
        let index = track_assert_some!(
            self.categories.iter().position(|c| c == label),
            ErrorKind::InvalidInput,
            "unknown category: {:?}",
            label
        );
        let (lower, upper) = match &self.cumulative {
            None => {
                let width = 1.0 / self.categories.len() as f64;
                (index as f64 * width, (index as f64 + 1.0) * width)
            }
            Some(cumulative) => {
                let lower = if index == 0 { 0.0 } else { cumulative[index - 1] };
                (lower, cumulative[index])
            }
        };
        Ok((lower + upper) / 2.0)
    }

    /// Returns `true` if `label` is one of this dimension's categories.
    pub fn contains(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }
}
impl Distribution<String> for Categorical {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.categories[self.index_for(rng.gen::<f64>())].clone()
    }
}

/// A single axis of a search space.
///
/// This is a closed sum over the three supported variants; every consumer
/// matches exhaustively so a future variant surfaces as a compile error
/// rather than a silent fallthrough.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    /// Continuous numerical axis.
    Real(Real),

    /// Discrete integer axis.
    Integer(Integer),

    /// Finite unordered labeled axis.
    Categorical(Categorical),
}
impl Dimension {
    /// Shorthand for a uniform [`Real`] dimension.
    pub fn real(low: f64, high: f64) -> Result<Self> {
        track!(Real::new(low, high)).map(Dimension::Real)
    }

    /// Shorthand for a log-uniform [`Real`] dimension.
    pub fn log_real(low: f64, high: f64) -> Result<Self> {
        track!(Real::log_uniform(low, high)).map(Dimension::Real)
    }

    /// Shorthand for an [`Integer`] dimension.
    pub fn integer(low: i64, high: i64) -> Result<Self> {
        track!(Integer::new(low, high)).map(Dimension::Integer)
    }

    /// Shorthand for a uniform [`Categorical`] dimension.
    pub fn categorical<I, T>(categories: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        track!(Categorical::new(categories)).map(Dimension::Categorical)
    }

    /// Maps a uniform variate `u` in `[0, 1)` to a concrete value inside this
    /// dimension, respecting the prior's quantile function.
    pub fn transform(&self, u: f64) -> ParamValue {
        match self {
            Dimension::Real(d) => ParamValue::Float(d.transform(u)),
            Dimension::Integer(d) => ParamValue::Int(d.transform(u)),
            Dimension::Categorical(d) => ParamValue::Cat(d.transform(u).to_owned()),
        }
    }

    /// Maps a value back into `[0, 1)`; the exact left inverse of
    /// [`Dimension::transform`].
    ///
    /// # Errors
    ///
    /// If `value` has the wrong variant for this dimension or lies outside
    /// its domain, this function returns an `ErrorKind::InvalidInput` error.
    pub fn inverse_transform(&self, value: &ParamValue) -> Result<f64> {
        match (self, value) {
            (Dimension::Real(d), ParamValue::Float(v)) => track!(d.inverse_transform(*v)),
            (Dimension::Integer(d), ParamValue::Int(v)) => track!(d.inverse_transform(*v)),
            (Dimension::Categorical(d), ParamValue::Cat(v)) => track!(d.inverse_transform(v)),
            _ => track_panic!(ErrorKind::InvalidInput, "type mismatch: {:?}", value),
        }
    }

    /// Returns `true` if `value` has this dimension's variant and lies inside
    /// its domain.
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (Dimension::Real(d), ParamValue::Float(v)) => d.contains(*v),
            (Dimension::Integer(d), ParamValue::Int(v)) => d.contains(*v),
            (Dimension::Categorical(d), ParamValue::Cat(v)) => d.contains(v),
            _ => false,
        }
    }
}
impl From<Real> for Dimension {
    fn from(d: Real) -> Self {
        Dimension::Real(d)
    }
}
impl From<Integer> for Dimension {
    fn from(d: Integer) -> Self {
        Dimension::Integer(d)
    }
}
impl From<Categorical> for Dimension {
    fn from(d: Categorical) -> Self {
        Dimension::Categorical(d)
    }
}
impl Distribution<ParamValue> for Dimension {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ParamValue {
        self.transform(rng.gen::<f64>())
    }
}
