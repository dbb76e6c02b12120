//! Stateless physics checks on wavefunctions, Hamiltonians, energy series,
//! band samples, and thermal populations.
//!
//! Every check returns a [`ValidationResult`] rather than an error: structural
//! problems (mismatched lengths, non-square matrices, non-finite values) are
//! recorded as `errors`, and numerical degradation is recorded as `warnings`
//! below the stricter thresholds at which it becomes an error. Callers decide
//! what to treat as fatal.

use std::collections::BTreeMap;
use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::Serialize;
use crate::{ Arr1, Arr2, DEF_MAX_GRADIENT, DEF_NORM_TOL };

/// Default relative energy drift above which a warning is issued by
/// [`validate_energy_conservation`].
pub const DEF_ENERGY_TOLERANCE: f64 = 1e-6;

/// Relative energy drift above which [`validate_energy_conservation`] reports
/// an error.
pub const ENERGY_DRIFT_ERROR: f64 = 1e-2;

/// Hermiticity error above which a matrix is rejected.
pub const HERMITIAN_ERROR: f64 = 1e-6;

/// Hermiticity error above which a matrix earns a warning.
pub const HERMITIAN_WARNING: f64 = 1e-10;

/// Maximum distance between a high-symmetry point and its nearest sample.
pub const SYMMETRY_POINT_TOL: f64 = 1e-2;

/// Maximum deviation of a population from its Boltzmann value.
pub const BOLTZMANN_TOL: f64 = 5e-2;

/// Outcome of a validation check: a flag, human-readable messages, and a bag
/// of named diagnostic values.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    /// `true` iff no errors were recorded.
    pub is_valid: bool,
    /// Structural or severe numerical failures.
    pub errors: Vec<String>,
    /// Numerical degradation below the error thresholds.
    pub warnings: Vec<String>,
    /// Named diagnostic values, e.g. `totalProbability`.
    pub metrics: BTreeMap<String, f64>,
}

impl ValidationResult {
    /// Create a new, valid result with no messages.
    pub fn new() -> Self {
        Self { is_valid: true, ..Self::default() }
    }

    /// Record an error, marking the result invalid.
    pub fn error<M: Into<String>>(&mut self, msg: M) {
        self.errors.push(msg.into());
        self.is_valid = false;
    }

    /// Record a warning.
    pub fn warn<M: Into<String>>(&mut self, msg: M) {
        self.warnings.push(msg.into());
    }

    /// Record a named metric, overwriting any previous value.
    pub fn metric<K: Into<String>>(&mut self, name: K, value: f64) {
        self.metrics.insert(name.into(), value);
    }

    /// Look up a named metric.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    /// Absorb the messages and metrics of another result.
    pub fn merge(&mut self, other: Self) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.metrics.extend(other.metrics);
    }

    /// Return `true` if there are no errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Check normalization and smoothness of a wavefunction stored as separate
/// real and imaginary parts on a grid with spacing `dx`.
///
/// Metrics: `totalProbability`, `maxGradient`.
pub fn validate_wave_function<S, T>(re: &Arr1<S>, im: &Arr1<T>, dx: f64)
    -> ValidationResult
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let mut res = ValidationResult::new();
    if re.len() != im.len() {
        res.error(format!(
            "real and imaginary parts have different lengths: {} and {}",
            re.len(), im.len(),
        ));
        return res;
    }

    let mut total: f64 = 0.0;
    let mut non_finite: usize = 0;
    for (rk, ik) in re.iter().zip(im) {
        let p = rk * rk + ik * ik;
        if !p.is_finite() { non_finite += 1; }
        total += p;
    }
    total *= dx;
    res.metric("totalProbability", total);
    if non_finite > 0 {
        res.error(format!(
            "probability density is non-finite at {} grid point(s)",
            non_finite,
        ));
    } else if (total - 1.0).abs() > DEF_NORM_TOL {
        res.warn(format!(
            "wavefunction is not normalized: total probability {:.6e}",
            total,
        ));
    }

    let max_gradient: f64
        = re.iter().zip(re.iter().skip(1))
        .zip(im.iter().zip(im.iter().skip(1)))
        .map(|((rk, rkp1), (ik, ikp1))| {
            (rkp1 - rk).hypot(ikp1 - ik) / dx
        })
        .fold(0.0, f64::max);
    res.metric("maxGradient", max_gradient);
    if max_gradient > DEF_MAX_GRADIENT {
        res.warn(format!(
            "maximum wavefunction gradient {:.3e} suggests numerical \
            instability",
            max_gradient,
        ));
    }
    res
}

/// Check that a matrix is square, finite, and Hermitian.
///
/// Metric: `hermitianError`, the largest `|H[i, j] - H[j, i]*|`.
pub fn validate_hamiltonian<S>(H: &Arr2<S>) -> ValidationResult
where S: nd::Data<Elem = C64>
{
    let mut res = ValidationResult::new();
    let (n, m) = H.dim();
    if n != m {
        res.error(format!("Hamiltonian is not square: {}x{}", n, m));
        return res;
    }

    let non_finite
        = H.iter().filter(|hij| !(hij.re.is_finite() && hij.im.is_finite()))
        .count();
    if non_finite > 0 {
        res.error(format!(
            "Hamiltonian has {} non-finite element(s)",
            non_finite,
        ));
    }

    let herm_err: f64
        = H.indexed_iter()
        .map(|((i, j), hij)| (hij - H[[j, i]].conj()).norm())
        .fold(0.0, f64::max);
    res.metric("hermitianError", herm_err);
    if herm_err > HERMITIAN_ERROR {
        res.error(format!(
            "Hamiltonian is not Hermitian: max |H - H†| = {:.3e}",
            herm_err,
        ));
    } else if herm_err > HERMITIAN_WARNING {
        res.warn(format!(
            "Hamiltonian is Hermitian only to {:.3e}",
            herm_err,
        ));
    }
    res
}

/// Check drift of an energy time series relative to its first entry.
///
/// Drift above `tolerance` earns a warning; drift above 1% is an error. If the
/// initial energy is zero, absolute drift is used instead.
///
/// Metrics: `maxEnergyDrift`, `finalEnergyDrift`.
pub fn validate_energy_conservation<S>(history: &Arr1<S>, tolerance: f64)
    -> ValidationResult
where S: nd::Data<Elem = f64>
{
    let mut res = ValidationResult::new();
    let Some(&e0) = history.iter().next() else {
        res.warn("energy history is empty");
        return res;
    };
    let scale = if e0 == 0.0 { 1.0 } else { e0.abs() };
    let drift = |ek: f64| (ek - e0).abs() / scale;

    if history.iter().any(|ek| !ek.is_finite()) {
        res.error("energy history contains non-finite values");
    }
    let max_drift: f64 = history.iter().map(|ek| drift(*ek)).fold(0.0, f64::max);
    let final_drift: f64 = history.iter().last().map(|ek| drift(*ek)).unwrap_or(0.0);
    res.metric("maxEnergyDrift", max_drift);
    res.metric("finalEnergyDrift", final_drift);
    if max_drift > ENERGY_DRIFT_ERROR {
        res.error(format!(
            "energy drifted by {:.3}% of its initial value",
            100.0 * max_drift,
        ));
    } else if max_drift > tolerance {
        res.warn(format!(
            "energy drift {:.3e} exceeds tolerance {:.1e}",
            max_drift, tolerance,
        ));
    }
    res
}

/// Check a sampled band structure.
///
/// `energies` holds one band per row and one k-point per column. Every
/// high-symmetry point in `symmetry_points` should have a sampled k-point
/// within 0.01 of it.
///
/// Metric: `minBandGap`, the smallest separation between adjacent bands over
/// all k-points (only if there are at least two bands).
pub fn validate_band_structure<S>(
    k_points: &[[f64; 2]],
    energies: &Arr2<S>,
    symmetry_points: &[[f64; 2]],
) -> ValidationResult
where S: nd::Data<Elem = f64>
{
    let mut res = ValidationResult::new();
    let (n_bands, n_k) = energies.dim();
    if n_k != k_points.len() {
        res.error(format!(
            "band energies sampled at {} k-points, but {} k-points given",
            n_k, k_points.len(),
        ));
        return res;
    }

    for (idx, sym) in symmetry_points.iter().enumerate() {
        let nearest: f64
            = k_points.iter()
            .map(|k| (k[0] - sym[0]).hypot(k[1] - sym[1]))
            .fold(f64::INFINITY, f64::min);
        if nearest > SYMMETRY_POINT_TOL {
            res.warn(format!(
                "high-symmetry point {} ({:.4}, {:.4}) is {:.3e} from the \
                nearest sample",
                idx, sym[0], sym[1], nearest,
            ));
        }
    }

    if n_bands >= 2 && n_k > 0 {
        let min_gap: f64
            = energies.rows().into_iter()
            .zip(energies.rows().into_iter().skip(1))
            .flat_map(|(lo, hi)| {
                lo.iter().zip(hi.iter())
                    .map(|(el, eh)| eh - el)
                    .collect::<Vec<f64>>()
            })
            .fold(f64::INFINITY, f64::min);
        res.metric("minBandGap", min_gap);
    }
    res
}

/// Compare level populations against the Boltzmann distribution
/// `exp(-E / kB T) / Z` at temperature `temperature`, with Boltzmann constant
/// `kb` given in the same energy units as `energies`.
///
/// Metric: `maxDeviation`.
pub fn validate_thermal_equilibrium<S, T>(
    energies: &Arr1<S>,
    populations: &Arr1<T>,
    temperature: f64,
    kb: f64,
) -> ValidationResult
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let mut res = ValidationResult::new();
    if energies.len() != populations.len() {
        res.error(format!(
            "got {} energies but {} populations",
            energies.len(), populations.len(),
        ));
        return res;
    }
    if !(temperature > 0.0 && kb > 0.0) {
        res.error(format!(
            "temperature and kB must be positive; got T = {}, kB = {}",
            temperature, kb,
        ));
        return res;
    }
    if energies.is_empty() { return res; }

    // shift by the ground level so that Z can't overflow
    let beta = (kb * temperature).recip();
    let e_min = energies.iter().copied().fold(f64::INFINITY, f64::min);
    let weights: nd::Array1<f64> = energies.mapv(|ek| (-beta * (ek - e_min)).exp());
    let Z: f64 = weights.sum();
    let max_dev: f64
        = weights.iter().zip(populations)
        .map(|(wk, pk)| (wk / Z - pk).abs())
        .fold(0.0, f64::max);
    res.metric("maxDeviation", max_dev);
    res.metric("partitionFunction", Z);
    if max_dev > BOLTZMANN_TOL {
        res.warn(format!(
            "populations deviate from Boltzmann distribution by up to {:.3}",
            max_dev,
        ));
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::KB_EV;

    fn gaussian(n: usize, dx: f64) -> (nd::Array1<f64>, nd::Array1<f64>) {
        let x = nd::Array1::from_shape_fn(n, |i| -10.0 + i as f64 * dx);
        let env = x.mapv(|xk| (-0.5 * xk * xk).exp());
        let norm = (env.mapv(|e| e * e).sum() * dx).sqrt();
        let re = &x.mapv(|xk| xk.cos()) * &env / norm;
        let im = &x.mapv(|xk| xk.sin()) * &env / norm;
        (re, im)
    }

    #[test]
    fn normalized_state_is_clean() {
        let dx = 20.0 / 512.0;
        let (re, im) = gaussian(512, dx);
        let res = validate_wave_function(&re, &im, dx);
        assert!(res.is_valid);
        assert!(res.is_clean(), "{:?}", res);
        assert!((res.get("totalProbability").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn doubled_amplitude_warns() {
        let dx = 20.0 / 512.0;
        let (re, im) = gaussian(512, dx);
        let base = validate_wave_function(&re, &im, dx);
        let res = validate_wave_function(&(&re * 2.0), &(&im * 2.0), dx);
        assert!(res.is_valid);
        assert!(!res.warnings.is_empty());
        let ratio = res.get("totalProbability").unwrap()
            / base.get("totalProbability").unwrap();
        assert!((ratio - 4.0).abs() < 1e-12);
    }

    #[test]
    fn wave_function_structural_errors() {
        let res = validate_wave_function(
            &nd::array![1.0, 0.0], &nd::array![0.0], 1.0);
        assert!(!res.is_valid);
        assert_eq!(res.errors.len(), 1);

        let res = validate_wave_function(
            &nd::array![f64::NAN, 0.0, 0.0], &nd::array![0.0, 0.0, 0.0], 1.0);
        assert!(!res.is_valid);
    }

    #[test]
    fn steep_wave_function_warns() {
        let re = nd::array![0.0, 1.0, 0.0];
        let im = nd::array![0.0, 0.0, 0.0];
        let res = validate_wave_function(&re, &im, 1e-7);
        assert!(res.warnings.iter().any(|w| w.contains("gradient")));
    }

    #[test]
    fn hamiltonian_checks() {
        let i = C64::i();
        let one = C64::new(1.0, 0.0);
        let herm = nd::array![[one, 2.0 * i], [-2.0 * i, -one]];
        let res = validate_hamiltonian(&herm);
        assert!(res.is_clean());
        assert_eq!(res.get("hermitianError"), Some(0.0));

        let bad = nd::array![[one, 2.0 * i], [2.0 * i, -one]];
        assert!(!validate_hamiltonian(&bad).is_valid);

        let slight = nd::array![[one, one], [one + 1e-8, one]];
        let res = validate_hamiltonian(&slight);
        assert!(res.is_valid);
        assert_eq!(res.warnings.len(), 1);

        let rect: nd::Array2<C64> = nd::Array2::zeros((2, 3));
        let res = validate_hamiltonian(&rect);
        assert!(!res.is_valid);
        assert!(res.metrics.is_empty());

        let nan = nd::array![[C64::new(f64::NAN, 0.0)]];
        assert!(!validate_hamiltonian(&nan).is_valid);
    }

    #[test]
    fn energy_drift_levels() {
        let flat = nd::array![2.0, 2.0, 2.0];
        assert!(validate_energy_conservation(&flat, DEF_ENERGY_TOLERANCE)
            .is_clean());

        let small = nd::array![2.0, 2.0 + 2e-4, 2.0];
        let res = validate_energy_conservation(&small, DEF_ENERGY_TOLERANCE);
        assert!(res.is_valid);
        assert_eq!(res.warnings.len(), 1);
        assert!((res.get("maxEnergyDrift").unwrap() - 1e-4).abs() < 1e-12);

        let large = nd::array![2.0, 2.1];
        assert!(!validate_energy_conservation(&large, DEF_ENERGY_TOLERANCE)
            .is_valid);

        let empty: nd::Array1<f64> = nd::Array1::zeros(0);
        let res = validate_energy_conservation(&empty, DEF_ENERGY_TOLERANCE);
        assert!(res.is_valid);
        assert_eq!(res.warnings.len(), 1);
    }

    #[test]
    fn band_structure_checks() {
        let k = [[0.0, 0.0], [0.5, 0.0], [1.0, 0.0]];
        let e = nd::array![[-1.0, -0.5, -0.2], [1.0, 0.5, 0.3]];
        let res = validate_band_structure(&k, &e, &[[0.0, 0.0], [1.0, 0.005]]);
        assert!(res.is_clean());
        assert!((res.get("minBandGap").unwrap() - 0.5).abs() < 1e-12);

        let res = validate_band_structure(&k, &e, &[[0.25, 0.0]]);
        assert!(res.is_valid);
        assert_eq!(res.warnings.len(), 1);

        let res = validate_band_structure(&k[..2], &e, &[]);
        assert!(!res.is_valid);
    }

    #[test]
    fn thermal_checks() {
        let t = 300.0;
        let e = nd::array![0.0, 0.01, 0.05];
        let w = e.mapv(|ek: f64| (-ek / (KB_EV * t)).exp());
        let p = &w / w.sum();
        let res = validate_thermal_equilibrium(&e, &p, t, KB_EV);
        assert!(res.is_clean());
        assert!(res.get("maxDeviation").unwrap() < 1e-12);

        let uniform = nd::array![1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0];
        let res = validate_thermal_equilibrium(&e, &uniform, t, KB_EV);
        assert!(res.is_valid);
        assert_eq!(res.warnings.len(), 1);

        let res = validate_thermal_equilibrium(&e, &nd::array![1.0], t, KB_EV);
        assert!(!res.is_valid);
        let res = validate_thermal_equilibrium(&e, &p, 0.0, KB_EV);
        assert!(!res.is_valid);
    }
}
