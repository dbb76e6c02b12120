//! Miscellaneous tools.
//!
//! Quadratures here use the plain rectangle rule `Σ f[i] δx`, which is the
//! convention all normalization and partition logic in this crate agrees on.

use ndarray::{ self as nd, Ix1, concatenate };
use rustfft as fft;
use num_complex::Complex64 as C64;

/// Compute the pointwise probability density `re² + im²`.
///
/// Only the overlapping prefix is used if the lengths differ.
pub fn probability_density<S, T>(
    re: &nd::ArrayBase<S, Ix1>,
    im: &nd::ArrayBase<T, Ix1>,
) -> nd::Array1<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    re.iter().zip(im)
        .map(|(rk, ik)| rk * rk + ik * ik)
        .collect()
}

/// Calculate the rectangle-rule norm `Σ (re² + im²) δx` of a wavefunction
/// stored as separate real and imaginary parts.
pub fn wf_norm<S, T>(
    re: &nd::ArrayBase<S, Ix1>,
    im: &nd::ArrayBase<T, Ix1>,
    dx: f64,
) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    re.iter().zip(im)
        .map(|(rk, ik)| rk * rk + ik * ik)
        .sum::<f64>() * dx
}

/// Renormalize a wavefunction in place, returning the norm it had before
/// rescaling.
///
/// Nothing is rescaled if the norm is zero or non-finite.
pub fn wf_renormalize<S, T>(
    re: &mut nd::ArrayBase<S, Ix1>,
    im: &mut nd::ArrayBase<T, Ix1>,
    dx: f64,
) -> f64
where
    S: nd::DataMut<Elem = f64>,
    T: nd::DataMut<Elem = f64>,
{
    let norm = wf_norm(re, im, dx);
    if norm > 0.0 && norm.is_finite() {
        let scale = norm.sqrt().recip();
        re.map_inplace(|rk| { *rk *= scale; });
        im.map_inplace(|ik| { *ik *= scale; });
    }
    norm
}

/// Combine separate real and imaginary parts into a complex array.
pub fn to_complex<S, T>(
    re: &nd::ArrayBase<S, Ix1>,
    im: &nd::ArrayBase<T, Ix1>,
) -> nd::Array1<C64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    re.iter().zip(im)
        .map(|(rk, ik)| C64::new(*rk, *ik))
        .collect()
}

/// Generate an array of frequency-space coordinates to accompany a FFT of `n`
/// points for sampling interval `dt`.
pub fn fft_freq(n: usize, dt: f64) -> nd::Array1<f64> {
    if n % 2 == 0 {
        let fp: nd::Array1<f64>
            = (0..n / 2)
            .map(|k| k as f64 / (n as f64 * dt))
            .collect();
        let fm: nd::Array1<f64>
            = (1..n / 2 + 1).rev()
            .map(|k| -(k as f64) / (n as f64 * dt))
            .collect();
        concatenate!(nd::Axis(0), fp, fm)
    } else {
        let fp: nd::Array1<f64>
            = (0..(n + 1) / 2)
            .map(|k| k as f64 / (n as f64 * dt))
            .collect();
        let fm: nd::Array1<f64>
            = (1..(n + 1) / 2).rev()
            .map(|k| -(k as f64) / (n as f64 * dt))
            .collect();
        concatenate!(nd::Axis(0), fp, fm)
    }
}

/// Perform the one-dimensional, complex-valued FFT.
pub fn fft<S>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let n: usize = x.len();
    let mut f: Vec<C64> = x.iter().copied().collect();
    let mut plan = fft::FftPlanner::new();
    let fft_plan = plan.plan_fft_forward(n);
    fft_plan.process(&mut f);
    nd::Array1::from_vec(f)
}

/// Return a copy of `x` with indices shifted to map super-Nyquist frequency
/// components to negative frequencies.
pub fn fft_shift<S, A>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    let n = x.len();
    let (p, m)
        = if n % 2 == 0 {
            x.view().split_at(nd::Axis(0), n / 2)
        } else {
            x.view().split_at(nd::Axis(0), n / 2 + 1)
        };
    concatenate!(nd::Axis(0), m, p)
}
