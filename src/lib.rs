//! A parameterized search space with random and Latin Hypercube sampling.
//!
//! "kukan" is a Japanese translation of "space".
//!
//! A [`Space`](space::Space) is an ordered, immutable sequence of
//! [`Dimension`](dims::Dimension)s (continuous, integer, or categorical),
//! each owning a prior distribution. Two sampling strategies draw candidate
//! points from it: independent random sampling and Latin Hypercube sampling.
//! Both honor each dimension's prior and reproduce exactly when given an
//! explicit seed. A [`Constraints`](constraints::Constraints) set can
//! further restrict where points may live and sample under that restriction.
#[macro_use]
extern crate trackable;

pub use self::error::{Error, ErrorKind};

pub mod constraints;
pub mod dims;
pub mod samplers;
pub mod space;

mod error;

/// This crate specific `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
