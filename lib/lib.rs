#![allow(dead_code, non_snake_case)]

//! Provides a one-dimensional, time-dependent quantum-tunneling solver and a
//! nearest/next-nearest-neighbor tight-binding model for the honeycomb
//! lattice, both backed by a shared set of physics validation checks.
//!
//! Provides implementations for the following numerical routines:
//! - Time-dependent (wave packet incident on a barrier):
//!     - Finite-difference "split-operator" stepping
//!     - Explicit Euler stepping
//!     - "Crank-Nicolson" stepping (Euler at half the step size; see
//!       [`timedep`])
//! - Observables: barrier partition of the probability mass, WKB estimate,
//!   momentum-space density
//! - Tight-binding: band structure along Γ-K-M-Γ, density of states, Dirac
//!   point check
//! - Validation: normalization, Hermiticity, energy conservation, band
//!   sampling, Boltzmann populations
//!
//! Numerical anomalies are never returned as errors; they are reported in a
//! [`ValidationResult`][validate::ValidationResult] attached to (or returned
//! alongside) the computed data.
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod units;
pub mod utils;
pub mod validate;
pub mod grid;
pub mod wavefunction;
pub mod workspace;
pub mod timedep;
pub mod observables;
pub mod tunneling;
pub mod tightbinding;

pub mod docs;

/// Length of the spatial domain `[-L/2, L/2]` shared by the grid builder and
/// the barrier partition in [`observables`].
pub const DOMAIN_LENGTH: f64 = 20.0;

/// Grid resolution served by the process-wide workspace pool.
pub const DEFAULT_GRID_POINTS: usize = 512;

pub(crate) const DEF_MAX_DT: f64 = 1e-3;
pub(crate) const DEF_NORM_TOL: f64 = 1e-3;
pub(crate) const DEF_MAX_GRADIENT: f64 = 1e6;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;

pub use tunneling::{ calculate, TunnelingParameters, TunnelingResult };
pub use tightbinding::{ LatticeParameters, TightBinding };
pub use validate::ValidationResult;
