//! Nearest- and next-nearest-neighbor tight-binding model of the honeycomb
//! lattice (graphene).
//!
//! With bond length `a_cc` the A→B bond vectors are
//! ```text
//! δ₁ = a_cc (0, 1)
//! δ₂ = a_cc (√3/2, -1/2)
//! δ₃ = a_cc (-√3/2, -1/2)
//! ```
//! and the two bands are
//! ```text
//! E±(k) = -t′ (f₂(k) + 3) ± t |f₁(k)|
//! f₁(k) = Σⱼ exp(i k·δⱼ)
//! f₂(k) = 2 cos(kₓ a) + 4 cos(kₓ a / 2) cos(√3 k_y a / 2)
//! ```
//! with lattice constant `a = √3 a_cc`. The constant `3 t′` shift puts the
//! Dirac point at `E = 0`, since `f₂(K) = -3`.
//!
//! ```
//! use tunnelspace::TightBinding;
//!
//! let tb = TightBinding::default();
//! let check = tb.validate_dirac_point();
//! assert!(check.is_valid);
//! assert!(check.gap_at_k < 1e-8);
//! ```

use std::f64::consts::PI;
use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::{
    error::BandError,
    validate::{ validate_hamiltonian, ValidationResult },
};

pub type BResult<T> = Result<T, BandError>;

/// `|f₁(K)|` below which the Dirac point is accepted.
pub const DIRAC_TOL: f64 = 1e-10;

/// Width of the Gaussian broadening applied to the DOS histogram, in bins.
pub const DOS_SMOOTHING_BINS: f64 = 2.0;

const SQRT3: f64 = 1.732_050_807_568_877_2;

/// Hopping energies and geometry of the lattice.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeParameters {
    /// Nearest-neighbor hopping t (eV).
    pub t: f64,
    /// Next-nearest-neighbor hopping t′ (eV).
    pub t_prime: f64,
    /// Carbon-carbon bond length (Å).
    pub a_cc: f64,
}

impl Default for LatticeParameters {
    fn default() -> Self {
        Self { t: 2.7, t_prime: 0.27, a_cc: 1.42 }
    }
}

impl LatticeParameters {
    /// Lattice constant `a = √3 a_cc`.
    pub fn lattice_constant(&self) -> f64 { SQRT3 * self.a_cc }
}

/// Energies of both bands at one k-point.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct BandSample {
    /// Band center `-t′ (f₂ + 3)`.
    pub base: f64,
    /// Conduction band, `base + t |f₁|`.
    pub plus: f64,
    /// Valence band, `base - t |f₁|`.
    pub minus: f64,
}

/// A piecewise-linear path through the Brillouin zone.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KPath {
    /// Sampled `(kₓ, k_y)`.
    pub k_points: Vec<[f64; 2]>,
    /// Cumulative arc length along the path.
    pub distances: nd::Array1<f64>,
    /// Names of the high-symmetry points.
    pub labels: Vec<String>,
    /// Arc length at which each label sits.
    pub label_positions: Vec<f64>,
}

/// Band energies along a [`KPath`], in units of `t`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BandStructure {
    pub path: KPath,
    /// Valence band, `E₋ / t`.
    pub valence: nd::Array1<f64>,
    /// Conduction band, `E₊ / t`.
    pub conduction: nd::Array1<f64>,
}

impl BandStructure {
    /// Stack the bands into a `2 × n_k` array, lowest band first.
    pub fn energies(&self) -> nd::Array2<f64> {
        nd::stack(nd::Axis(0), &[self.valence.view(), self.conduction.view()])
            .unwrap_or_else(|_| nd::Array2::zeros((0, self.valence.len())))
    }
}

/// Broadened density of states, in units of `t`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dos {
    /// Bin centers `E / t`.
    pub energies: nd::Array1<f64>,
    /// Smoothed state counts per bin.
    pub dos: nd::Array1<f64>,
}

/// Outcome of [`TightBinding::validate_dirac_point`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiracPointCheck {
    /// `true` iff `|f₁(K)| < 1e-10` and the Bloch Hamiltonian at K is
    /// Hermitian.
    pub is_valid: bool,
    /// `|f₁(K)|`
    pub f1_at_k: f64,
    /// `E₊(K) - E₋(K)` in eV.
    pub gap_at_k: f64,
    /// Band center at K in eV.
    pub energy_at_k: f64,
    /// Validation of the Bloch Hamiltonian at K.
    pub hamiltonian: ValidationResult,
}

/// Tight-binding model for a honeycomb lattice.
#[derive(Clone, Debug, PartialEq)]
pub struct TightBinding {
    params: LatticeParameters,
    delta: [[f64; 2]; 3],
}

impl Default for TightBinding {
    fn default() -> Self { Self::new(LatticeParameters::default()) }
}

impl TightBinding {
    /// Set up the bond vectors for the given lattice.
    pub fn new(params: LatticeParameters) -> Self {
        let acc = params.a_cc;
        let delta = [
            [0.0, acc],
            [SQRT3 / 2.0 * acc, -acc / 2.0],
            [-SQRT3 / 2.0 * acc, -acc / 2.0],
        ];
        Self { params, delta }
    }

    pub fn params(&self) -> &LatticeParameters { &self.params }

    /// Γ point.
    pub fn gamma(&self) -> [f64; 2] { [0.0, 0.0] }

    /// K point, `(4π / 3a, 0)`.
    pub fn k_point(&self) -> [f64; 2] {
        let a = self.params.lattice_constant();
        [4.0 * PI / (3.0 * a), 0.0]
    }

    /// M point, `(π / a, π / √3a)`.
    pub fn m_point(&self) -> [f64; 2] {
        let a = self.params.lattice_constant();
        [PI / a, PI / (SQRT3 * a)]
    }

    /// Nearest-neighbor structure factor `Σⱼ exp(i k·δⱼ)`.
    pub fn f1(&self, kx: f64, ky: f64) -> C64 {
        self.delta.iter()
            .map(|d| C64::cis(kx * d[0] + ky * d[1]))
            .sum()
    }

    /// Next-nearest-neighbor structure factor.
    pub fn f2(&self, kx: f64, ky: f64) -> f64 {
        let a = self.params.lattice_constant();
        2.0 * (kx * a).cos()
            + 4.0 * (kx * a / 2.0).cos() * (SQRT3 * ky * a / 2.0).cos()
    }

    /// Band energies (eV) at `(kₓ, k_y)`.
    pub fn dispersion(&self, kx: f64, ky: f64) -> BandSample {
        let LatticeParameters { t, t_prime, .. } = self.params;
        let base = -t_prime * (self.f2(kx, ky) + 3.0);
        let split = t * self.f1(kx, ky).norm();
        BandSample { base, plus: base + split, minus: base - split }
    }

    /// 2×2 Bloch Hamiltonian (eV) in the (A, B) sublattice basis.
    pub fn bloch_hamiltonian(&self, kx: f64, ky: f64) -> nd::Array2<C64> {
        let LatticeParameters { t, t_prime, .. } = self.params;
        let diag = C64::from(-t_prime * (self.f2(kx, ky) + 3.0));
        let off = -t * self.f1(kx, ky);
        nd::array![[diag, off], [off.conj(), diag]]
    }

    /// Generate the path Γ → K → M → Γ with `n_points` samples per segment.
    ///
    /// Each segment contributes its start point and `n_points - 1` interior
    /// points; the closing Γ is appended once, for `3 n_points + 1` samples
    /// total. `include_end` is accepted for compatibility and has no effect.
    pub fn generate_k_path(&self, n_points: usize, include_end: bool) -> KPath {
        let _ = include_end;
        let n = n_points.max(1);
        let corners = [self.gamma(), self.k_point(), self.m_point(), self.gamma()];
        let labels: Vec<String>
            = ["Γ", "K", "M", "Γ"].iter().map(|s| s.to_string()).collect();

        let mut k_points: Vec<[f64; 2]> = Vec::with_capacity(3 * n + 1);
        for seg in corners.windows(2) {
            let (p, q) = (seg[0], seg[1]);
            for j in 0..n {
                let s = j as f64 / n as f64;
                k_points.push([
                    p[0] + s * (q[0] - p[0]),
                    p[1] + s * (q[1] - p[1]),
                ]);
            }
        }
        k_points.push(corners[3]);

        let mut acc = 0.0;
        let distances: nd::Array1<f64>
            = std::iter::once(0.0)
            .chain(
                k_points.windows(2)
                .map(|w| {
                    acc += (w[1][0] - w[0][0]).hypot(w[1][1] - w[0][1]);
                    acc
                })
            )
            .collect();
        let label_positions: Vec<f64>
            = (0..4).map(|s| distances[s * n]).collect();
        KPath { k_points, distances, labels, label_positions }
    }

    /// Evaluate both bands along Γ → K → M → Γ, normalized by `t`.
    pub fn calculate_band_structure(&self, n_points: usize) -> BandStructure {
        let path = self.generate_k_path(n_points, true);
        let t = self.params.t;
        let (valence, conduction): (Vec<f64>, Vec<f64>)
            = path.k_points.iter()
            .map(|k| {
                let s = self.dispersion(k[0], k[1]);
                (s.minus / t, s.plus / t)
            })
            .unzip();
        BandStructure {
            path,
            valence: nd::Array1::from_vec(valence),
            conduction: nd::Array1::from_vec(conduction),
        }
    }

    /// Histogram both bands (in units of `t`) over `range` with `n_bins` bins,
    /// sampling an `n_k × n_k` grid of k-points restricted to the disk
    /// `|k| ≤ |ΓK|`, then broaden with a Gaussian of width two bins.
    pub fn calculate_dos(&self, range: (f64, f64), n_bins: usize, n_k: usize)
        -> BResult<Dos>
    {
        BandError::check_bins(n_bins)?;
        BandError::check_range(range)?;
        BandError::check_k_points(n_k, 2)?;

        let t = self.params.t;
        let k_cut = self.k_point()[0];
        let (lo, hi) = range;
        let width = (hi - lo) / n_bins as f64;
        let mut hist: nd::Array1<f64> = nd::Array1::zeros(n_bins);
        let mut bin = |e: f64| {
            if e >= lo && e < hi {
                let idx = (((e - lo) / width) as usize).min(n_bins - 1);
                hist[idx] += 1.0;
            }
        };
        let kgrid = nd::Array1::linspace(-k_cut, k_cut, n_k);
        for &kx in kgrid.iter() {
            for &ky in kgrid.iter() {
                if kx.hypot(ky) > k_cut { continue; }
                let s = self.dispersion(kx, ky);
                bin(s.plus / t);
                bin(s.minus / t);
            }
        }

        let energies: nd::Array1<f64>
            = (0..n_bins).map(|i| lo + (i as f64 + 0.5) * width).collect();
        let dos = gaussian_smooth(&hist, DOS_SMOOTHING_BINS);
        Ok(Dos { energies, dos })
    }

    /// Check that the bands touch at K.
    pub fn validate_dirac_point(&self) -> DiracPointCheck {
        let [kx, ky] = self.k_point();
        let f1_at_k = self.f1(kx, ky).norm();
        let s = self.dispersion(kx, ky);
        let hamiltonian = validate_hamiltonian(&self.bloch_hamiltonian(kx, ky));
        let is_valid = f1_at_k < DIRAC_TOL && hamiltonian.is_valid;
        if !is_valid {
            log::warn!("Dirac point check failed: |f1(K)| = {:.3e}", f1_at_k);
        }
        DiracPointCheck {
            is_valid,
            f1_at_k,
            gap_at_k: s.plus - s.minus,
            energy_at_k: s.base,
            hamiltonian,
        }
    }
}

// discrete convolution with a normalized Gaussian kernel of width `sigma` bins,
// truncated at 3σ
fn gaussian_smooth(hist: &nd::Array1<f64>, sigma: f64) -> nd::Array1<f64> {
    let n = hist.len() as isize;
    let reach = (3.0 * sigma).ceil() as isize;
    let kernel: Vec<f64>
        = (-reach..=reach)
        .map(|j| (-0.5 * (j as f64 / sigma).powi(2)).exp())
        .collect();
    let norm: f64 = kernel.iter().sum();
    (0..n)
        .map(|i| {
            (-reach..=reach)
                .zip(&kernel)
                .filter(|(j, _)| (0..n).contains(&(i + j)))
                .map(|(j, w)| w * hist[(i + j) as usize])
                .sum::<f64>() / norm
        })
        .collect()
}
