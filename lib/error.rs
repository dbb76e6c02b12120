//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! Errors here are reserved for inputs that make a computation impossible
//! (zero-length grids, empty histograms, ...). Numerical degradation is never
//! an error; see [`validate`][crate::validate].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned from the tunneling solver.
#[derive(Debug, Error)]
pub enum TunnelError {
    /// Returned when fewer than three grid points are requested.
    #[error("grid must have at least 3 points; got {0}")]
    BadGridPoints(usize),

    /// Returned when a non-positive or non-finite particle mass is
    /// encountered.
    #[error("particle mass must be positive and finite; got {0}")]
    BadMass(f64),

    /// Returned when a negative or non-finite total time is encountered.
    #[error("total time must be non-negative and finite; got {0}")]
    BadTime(f64),

    /// Returned when the initial wave packet cannot be normalized.
    #[error("wave packet norm must be positive and finite; got {0}")]
    Normalization(f64),

    /// Returned when a workspace does not match the requested resolution.
    #[error("workspace holds {have} grid points; {want} were requested")]
    Capacity { have: usize, want: usize },

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl TunnelError {
    pub(crate) fn check_grid_points(n: usize) -> Result<(), Self> {
        (n >= 3).then_some(()).ok_or(Self::BadGridPoints(n))
    }

    pub(crate) fn check_mass(mass: f64) -> Result<(), Self> {
        (mass > 0.0 && mass.is_finite()).then_some(())
            .ok_or(Self::BadMass(mass))
    }

    pub(crate) fn check_time(time: f64) -> Result<(), Self> {
        (time >= 0.0 && time.is_finite()).then_some(())
            .ok_or(Self::BadTime(time))
    }
}

/// Returned from the tight-binding band engine.
#[derive(Debug, Error)]
pub enum BandError {
    /// Returned when a histogram with zero bins is requested.
    #[error("number of energy bins must be greater than 0; got {0}")]
    BadBins(usize),

    /// Returned when an energy window is empty, reversed, or non-finite.
    #[error("energy range must satisfy lo < hi; got ({0}, {1})")]
    BadRange(f64, f64),

    /// Returned when a k-space sampling is too coarse to be meaningful.
    #[error("k-point count must be at least {min}; got {got}")]
    BadKPoints { min: usize, got: usize },
}

impl BandError {
    pub(crate) fn check_bins(n_bins: usize) -> Result<(), Self> {
        (n_bins != 0).then_some(()).ok_or(Self::BadBins(n_bins))
    }

    pub(crate) fn check_range(range: (f64, f64)) -> Result<(), Self> {
        (range.0 < range.1 && range.0.is_finite() && range.1.is_finite())
            .then_some(())
            .ok_or(Self::BadRange(range.0, range.1))
    }

    pub(crate) fn check_k_points(got: usize, min: usize) -> Result<(), Self> {
        (got >= min).then_some(()).ok_or(Self::BadKPoints { min, got })
    }
}
