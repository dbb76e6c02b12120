//! Time-stepping of the 1+1-dimensional Schrödinger equation
//! `i ∂ψ/∂t = H ψ`, `H = -(1/2m) ∂²/∂x² + V(x)` (with ħ = 1), over the
//! pre-allocated buffers of a [`Workspace`].
//!
//! All three methods are finite-difference schemes on the real and imaginary
//! parts of ψ. Within a kinetic update the real part is advanced first, and the
//! imaginary part is then advanced from the updated real part; with the time
//! step chosen by [`time_step`] this keeps the explicit updates inside their
//! stability region. The first and last grid points are never touched by the
//! kinetic term.
//!
//! Nothing here checks for blow-up. Non-finite values are left for
//! [`validate_wave_function`][crate::validate::validate_wave_function] to
//! report.

use std::{ fmt, str::FromStr };
use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::{ Arr1, DEF_MAX_DT, workspace::Workspace };

/// Choice of time-stepping scheme.
///
/// Parsing from a string never fails: unrecognized names fall back to
/// [`SplitOperator`][Self::SplitOperator].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMethod {
    /// Pointwise potential phase followed by a finite-difference kinetic
    /// update. This is *not* a Fourier split-operator method.
    #[default]
    SplitOperator,
    /// Euler stepping at half the time step and twice the step count. No
    /// implicit solve is performed.
    CrankNicolson,
    /// Explicit first-order stepping of the full Hamiltonian.
    Euler,
}

impl IntegrationMethod {
    /// Parse a method name, falling back to `SplitOperator`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "crank_nicolson" | "cranknicolson" | "crank-nicolson"
                => Self::CrankNicolson,
            "euler" => Self::Euler,
            _ => Self::SplitOperator,
        }
    }
}

impl FromStr for IntegrationMethod {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Self::parse(s)) }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SplitOperator => write!(f, "split_operator"),
            Self::CrankNicolson => write!(f, "crank_nicolson"),
            Self::Euler => write!(f, "euler"),
        }
    }
}

/// Step size and count actually taken by [`evolve`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Stepping {
    pub dt: f64,
    pub steps: usize,
}

/// Return the fixed time step `min(0.001, δx² m / 2)`.
pub fn time_step(dx: f64, mass: f64) -> f64 {
    DEF_MAX_DT.min(dx.powi(2) * mass / 2.0)
}

/// Return the number of whole steps of size `dt` that fit in `time`.
pub fn num_steps(time: f64, dt: f64) -> usize {
    if dt > 0.0 && time > 0.0 { (time / dt).floor() as usize } else { 0 }
}

// second difference ψ[i + 1] - 2 ψ[i] + ψ[i - 1] at interior point i
#[inline]
fn second_diff<S>(q: &Arr1<S>, i: usize) -> f64
where S: nd::Data<Elem = f64>
{
    q[i + 1] - 2.0 * q[i] + q[i - 1]
}

// copy the interior of `src` into `dst`
fn copy_interior<S, T>(src: &Arr1<S>, dst: &mut Arr1<T>)
where
    S: nd::Data<Elem = f64>,
    T: nd::DataMut<Elem = f64>,
{
    let n = dst.len();
    dst.slice_mut(nd::s![1..n - 1]).assign(&src.slice(nd::s![1..n - 1]));
}

// multiply ψ pointwise by exp(-i V dt)
fn apply_potential_phase(ws: &mut Workspace, dt: f64) {
    nd::Zip::from(&mut ws.re).and(&mut ws.im).and(&ws.V)
        .for_each(|re, im, &Vi| {
            let q = C64::new(*re, *im) * C64::cis(-Vi * dt);
            *re = q.re;
            *im = q.im;
        });
}

// ψ ← ψ + (i dt / 2m) ∂²ψ over the interior
fn apply_kinetic(ws: &mut Workspace, dx: f64, mass: f64, dt: f64) {
    let n = ws.re.len();
    let coef = dt / (2.0 * mass * dx.powi(2));
    for i in 1..n - 1 {
        ws.tmp_re[i] = ws.re[i] - coef * second_diff(&ws.im, i);
    }
    copy_interior(&ws.tmp_re, &mut ws.re);
    for i in 1..n - 1 {
        ws.tmp_im[i] = ws.im[i] + coef * second_diff(&ws.re, i);
    }
    copy_interior(&ws.tmp_im, &mut ws.im);
}

// ψ ← ψ - i dt H ψ over the interior
fn apply_hamiltonian(ws: &mut Workspace, dx: f64, mass: f64, dt: f64) {
    let n = ws.re.len();
    let kin = (2.0 * mass * dx.powi(2)).recip();
    for i in 1..n - 1 {
        let h_im = -kin * second_diff(&ws.im, i) + ws.V[i] * ws.im[i];
        ws.tmp_re[i] = ws.re[i] + dt * h_im;
    }
    copy_interior(&ws.tmp_re, &mut ws.re);
    for i in 1..n - 1 {
        let h_re = -kin * second_diff(&ws.re, i) + ws.V[i] * ws.re[i];
        ws.tmp_im[i] = ws.im[i] - dt * h_re;
    }
    copy_interior(&ws.tmp_im, &mut ws.im);
}

/// Take `steps` finite-difference split-operator steps of size `dt`.
///
/// Each step applies the potential phase `exp(-i V dt)` at every grid point,
/// then the kinetic update over the interior.
pub fn split_operator(
    ws: &mut Workspace,
    dx: f64,
    mass: f64,
    dt: f64,
    steps: usize,
) {
    if ws.capacity() < 3 { return; }
    for _ in 0..steps {
        apply_potential_phase(ws, dt);
        apply_kinetic(ws, dx, mass, dt);
    }
}

/// Take `steps` explicit Euler steps of size `dt`.
pub fn euler(
    ws: &mut Workspace,
    dx: f64,
    mass: f64,
    dt: f64,
    steps: usize,
) {
    if ws.capacity() < 3 { return; }
    for _ in 0..steps {
        apply_hamiltonian(ws, dx, mass, dt);
    }
}

/// Take `2 steps` Euler steps of size `dt / 2`.
///
/// Despite the name this is an explicit scheme; it only trades a smaller step
/// for more of them.
pub fn crank_nicolson(
    ws: &mut Workspace,
    dx: f64,
    mass: f64,
    dt: f64,
    steps: usize,
) -> Stepping {
    let stepping = Stepping { dt: dt / 2.0, steps: 2 * steps };
    euler(ws, dx, mass, stepping.dt, stepping.steps);
    stepping
}

/// Evolve the state held in `ws` for `time` with the chosen method.
///
/// The workspace must already hold the grid spacing `dx`, the potential, and
/// the initial state. Returns the step size and count actually used.
pub fn evolve(
    ws: &mut Workspace,
    dx: f64,
    mass: f64,
    time: f64,
    method: IntegrationMethod,
) -> Stepping {
    let dt = time_step(dx, mass);
    let steps = num_steps(time, dt);
    log::debug!(
        "evolve: {} over {} points, dt = {:.3e}, {} steps",
        method, ws.capacity(), dt, steps,
    );
    match method {
        IntegrationMethod::SplitOperator => {
            split_operator(ws, dx, mass, dt, steps);
            Stepping { dt, steps }
        },
        IntegrationMethod::CrankNicolson => {
            crank_nicolson(ws, dx, mass, dt, steps)
        },
        IntegrationMethod::Euler => {
            euler(ws, dx, mass, dt, steps);
            Stepping { dt, steps }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::{ fill_grid, fill_potential, Barrier, BarrierShape },
        utils::wf_norm,
        wavefunction::{ fill_packet, Packet },
    };

    fn prepared(n: usize, height: f64) -> (Workspace, f64) {
        let mut ws = Workspace::new(n);
        let dx = fill_grid(&mut ws.x);
        let barrier = Barrier {
            shape: BarrierShape::Rectangular,
            height,
            width: 2.0,
            position: 0.0,
            absorbing: false,
        };
        fill_potential(&ws.x, &mut ws.V, &barrier);
        let packet = Packet { width: 1.0, position: -5.0, momentum: 2.0 };
        fill_packet(&ws.x, &mut ws.re, &mut ws.im, dx, &packet).unwrap();
        (ws, dx)
    }

    fn position(ws: &Workspace, dx: f64) -> f64 {
        ws.x.iter().zip(&ws.re).zip(&ws.im)
            .map(|((x, r), i)| x * (r * r + i * i))
            .sum::<f64>() * dx
    }

    #[test]
    fn step_size_heuristic() {
        assert_eq!(time_step(1.0, 1.0), 1e-3);
        let dx = 20.0 / 512.0;
        assert!((time_step(dx, 1.0) - dx * dx / 2.0).abs() < 1e-18);
        assert_eq!(num_steps(1.0, 0.25), 4);
        assert_eq!(num_steps(1.0, 0.3), 3);
        assert_eq!(num_steps(0.0, 0.3), 0);
    }

    #[test]
    fn method_names() {
        assert_eq!(IntegrationMethod::parse("euler"), IntegrationMethod::Euler);
        assert_eq!(
            IntegrationMethod::parse("crank_nicolson"),
            IntegrationMethod::CrankNicolson,
        );
        assert_eq!(
            IntegrationMethod::parse("rk4"),
            IntegrationMethod::SplitOperator,
        );
    }

    #[test]
    fn crank_nicolson_halves_step() {
        let (mut ws, dx) = prepared(256, 1.0);
        let s = evolve(&mut ws, dx, 1.0, 0.1, IntegrationMethod::CrankNicolson);
        let dt = time_step(dx, 1.0);
        assert_eq!(s.dt, dt / 2.0);
        assert_eq!(s.steps, 2 * num_steps(0.1, dt));
    }

    #[test]
    fn crank_nicolson_matches_half_step_euler() {
        let (mut a, dx) = prepared(128, 1.0);
        let mut b = a.clone();
        crank_nicolson(&mut a, dx, 1.0, 2e-3, 10);
        euler(&mut b, dx, 1.0, 1e-3, 20);
        assert_eq!(a.re, b.re);
        assert_eq!(a.im, b.im);
    }

    #[test]
    fn boundaries_are_fixed() {
        let (mut ws, dx) = prepared(128, 1.0);
        ws.re[0] = 0.25;
        ws.im[127] = -0.5;
        euler(&mut ws, dx, 1.0, time_step(dx, 1.0), 50);
        assert_eq!(ws.re[0], 0.25);
        assert_eq!(ws.im[127], -0.5);
    }

    #[test]
    fn free_packet_moves_right() {
        for method in [
            IntegrationMethod::SplitOperator,
            IntegrationMethod::Euler,
            IntegrationMethod::CrankNicolson,
        ] {
            let (mut ws, dx) = prepared(512, 0.0);
            let x0 = position(&ws, dx);
            evolve(&mut ws, dx, 1.0, 0.5, method);
            let x1 = position(&ws, dx);
            // group velocity k / m = 2
            assert!((x1 - x0 - 1.0).abs() < 0.05, "{}: {} -> {}", method, x0, x1);
            let norm = wf_norm(&ws.re, &ws.im, dx);
            assert!(norm.is_finite() && (norm - 1.0).abs() < 1e-2, "{}", norm);
        }
    }

    #[test]
    fn stays_finite_against_barrier() {
        let (mut ws, dx) = prepared(512, 1.0);
        evolve(&mut ws, dx, 1.0, 1.0, IntegrationMethod::SplitOperator);
        assert!(ws.re.iter().chain(ws.im.iter()).all(|v| v.is_finite()));
        let norm = wf_norm(&ws.re, &ws.im, dx);
        assert!((norm - 1.0).abs() < 1e-2, "{}", norm);
    }
}
