//! Observables derived from a finished tunneling run.

use std::f64::consts::TAU;
use ndarray as nd;
use serde::Serialize;
use crate::{
    Arr1,
    DOMAIN_LENGTH,
    utils::{ fft, fft_freq, fft_shift, to_complex },
};

/// Probability bookkeeping for the final state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConservationMetrics {
    /// `Σ |ψ|² δx`
    pub total_probability: f64,
    /// Not computed; always 0.
    pub average_energy: f64,
    /// `Σ x |ψ|² δx`
    pub position_expectation: f64,
    /// Not computed; always 0.
    pub momentum_expectation: f64,
}

/// Fractions of the probability mass on either side of, and inside, the
/// barrier. The three always sum to 1 when the total is positive and finite.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct Partition {
    pub reflection: f64,
    pub barrier_occupancy: f64,
    pub transmission: f64,
}

/// Semiclassical tunneling estimate.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Wkb {
    /// `∫ κ dx` over the classically forbidden points.
    pub action: f64,
    /// `exp(-2 ∫ κ dx)`, or exactly 1 if no point is forbidden.
    pub transmission: f64,
}

/// Compute the total probability and position expectation of a density.
pub fn conservation<S, T>(x: &Arr1<S>, density: &Arr1<T>, dx: f64)
    -> ConservationMetrics
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let total_probability = density.sum() * dx;
    let position_expectation
        = x.iter().zip(density)
        .map(|(xi, pi)| xi * pi)
        .sum::<f64>() * dx;
    ConservationMetrics {
        total_probability,
        average_energy: 0.0,
        position_expectation,
        momentum_expectation: 0.0,
    }
}

/// Return the grid indices `(start, end)` bounding the barrier
/// `[position - width/2, position + width/2]`, clamped to `[0, n]`.
///
/// Assumes the grid of [`grid::fill_grid`][crate::grid::fill_grid].
pub fn barrier_indices(position: f64, width: f64, dx: f64, n: usize)
    -> (usize, usize)
{
    let half = DOMAIN_LENGTH / 2.0;
    let index = |x: f64| -> usize {
        let i = ((x + half) / dx).floor();
        if i.is_nan() || i < 0.0 { 0 } else { (i as usize).min(n) }
    };
    let start = index(position - width / 2.0);
    let end = index(position + width / 2.0).max(start);
    (start, end)
}

/// Split the probability mass into the regions before, inside, and after the
/// barrier, as fractions of their sum.
pub fn partition<S>(density: &Arr1<S>, start: usize, end: usize) -> Partition
where S: nd::Data<Elem = f64>
{
    let n = density.len();
    let start = start.min(n);
    let end = end.clamp(start, n);
    let before = density.slice(nd::s![..start]).sum();
    let inside = density.slice(nd::s![start..end]).sum();
    let after = density.slice(nd::s![end..]).sum();
    let total = before + inside + after;
    Partition {
        reflection: before / total,
        barrier_occupancy: inside / total,
        transmission: after / total,
    }
}

/// Compute the WKB action and transmission for a particle of energy `E`.
pub fn wkb<S>(V: &Arr1<S>, energy: f64, mass: f64, dx: f64) -> Wkb
where S: nd::Data<Elem = f64>
{
    let forbidden = V.iter().any(|&Vi| Vi > energy);
    let action: f64
        = V.iter()
        .filter(|&&Vi| Vi > energy)
        .map(|&Vi| (2.0 * mass * (Vi - energy)).sqrt() * dx)
        .sum();
    let transmission = if forbidden { (-2.0 * action).exp() } else { 1.0 };
    Wkb { action, transmission }
}

/// Heuristic resonance indicator `|sin(√(2 m E) w)|`.
pub fn resonance_strength(energy: f64, mass: f64, width: f64) -> f64 {
    ((2.0 * mass * energy).sqrt() * width).sin().abs()
}

/// Compute the momentum-space density `|ψ̃(k)|²` of a state, returned with its
/// wavenumber grid in ascending order.
///
/// The density is scaled so that `Σ |ψ̃|² δk = Σ |ψ|² δx`.
pub fn momentum_density<S, T>(re: &Arr1<S>, im: &Arr1<T>, dx: f64)
    -> (nd::Array1<f64>, nd::Array1<f64>)
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let n = re.len().min(im.len());
    if n == 0 { return (nd::Array1::zeros(0), nd::Array1::zeros(0)); }
    let scale = dx.powi(2) / TAU;
    let density: nd::Array1<f64>
        = fft(&to_complex(re, im)).mapv(|qk| qk.norm_sqr() * scale);
    let k: nd::Array1<f64> = fft_freq(n, dx) * TAU;
    (fft_shift(&k), fft_shift(&density))
}
