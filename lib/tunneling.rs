//! Wave packet scattering off a single barrier: parameters, results, and the
//! driver that ties the grid, initializer, stepper, and observables together.
//!
//! ```
//! use tunnelspace::{ calculate, TunnelingParameters };
//!
//! let params = TunnelingParameters { time: 0.2, ..Default::default() };
//! let res = calculate(&params).unwrap();
//! let total = res.transmission + res.reflection + res.barrier_occupancy;
//! assert!((total - 1.0).abs() < 1e-6);
//! assert!(res.validation.is_valid);
//! ```

use std::f64::consts::TAU;
use ndarray as nd;
use serde::{ Deserialize, Serialize };
use crate::{
    DEFAULT_GRID_POINTS,
    error::TunnelError,
    grid::{ fill_grid, fill_potential, spacing, Barrier, BarrierShape },
    observables::{
        self,
        ConservationMetrics,
    },
    timedep::{ evolve, IntegrationMethod, Stepping },
    utils::probability_density,
    validate::{ validate_wave_function, ValidationResult },
    wavefunction::{ fill_packet, Packet, Wavefunction },
    workspace::{ default_pool, Workspace },
};

pub type TResult<T> = Result<T, TunnelError>;

/// Inputs to a tunneling run, in natural units with ħ = 1.
///
/// The default is a unit-mass particle with `k = 2` launched from `x = -5`
/// at a rectangular barrier of height 1 and width 2 centered on the origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelingParameters {
    /// Barrier height V₀.
    pub barrier_height: f64,
    /// Barrier width w.
    pub barrier_width: f64,
    /// Barrier center.
    pub barrier_position: f64,
    /// Particle mass m.
    pub particle_mass: f64,
    /// Particle energy E, used by the classical and WKB estimates.
    pub particle_energy: f64,
    /// Wave packet envelope width σ.
    pub wave_packet_width: f64,
    /// Wave packet initial center x₀.
    pub initial_position: f64,
    /// Wave packet carrier wavenumber k.
    pub initial_momentum: f64,
    /// Total simulated time.
    pub time: f64,
    /// Time-stepping scheme.
    pub method: IntegrationMethod,
    /// Add a damping ramp to the outer 10% of the domain.
    pub absorbing_boundaries: bool,
    /// Barrier profile.
    pub barrier_shape: BarrierShape,
    /// Number of grid points.
    pub grid_points: usize,
}

impl Default for TunnelingParameters {
    fn default() -> Self {
        Self {
            barrier_height: 1.0,
            barrier_width: 2.0,
            barrier_position: 0.0,
            particle_mass: 1.0,
            particle_energy: 0.5,
            wave_packet_width: 1.0,
            initial_position: -5.0,
            initial_momentum: 2.0,
            time: 1.0,
            method: IntegrationMethod::SplitOperator,
            absorbing_boundaries: false,
            barrier_shape: BarrierShape::Rectangular,
            grid_points: DEFAULT_GRID_POINTS,
        }
    }
}

impl TunnelingParameters {
    fn barrier(&self) -> Barrier {
        Barrier {
            shape: self.barrier_shape,
            height: self.barrier_height,
            width: self.barrier_width,
            position: self.barrier_position,
            absorbing: self.absorbing_boundaries,
        }
    }

    fn packet(&self) -> Packet {
        Packet {
            width: self.wave_packet_width,
            position: self.initial_position,
            momentum: self.initial_momentum,
        }
    }

    fn check(&self) -> TResult<()> {
        TunnelError::check_grid_points(self.grid_points)?;
        TunnelError::check_mass(self.particle_mass)?;
        TunnelError::check_time(self.time)?;
        Ok(())
    }
}

/// Snapshot of a finished tunneling run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TunnelingResult {
    /// Grid coordinates.
    pub x: nd::Array1<f64>,
    /// Grid spacing.
    pub dx: f64,
    /// Potential sampled on the grid.
    pub potential: nd::Array1<f64>,
    /// Final state.
    pub wavefunction: Wavefunction,
    /// Final probability density `|ψ|²`.
    pub probability_density: nd::Array1<f64>,
    /// Fraction of the probability mass past the barrier.
    pub transmission: f64,
    /// Fraction of the probability mass before the barrier.
    pub reflection: f64,
    /// Fraction of the probability mass inside the barrier.
    pub barrier_occupancy: f64,
    /// `exp(-2 ∫ κ dx)` over the classically forbidden region.
    pub wkb_transmission: f64,
    /// `true` if `E < V₀`.
    pub classical_forbidden: bool,
    /// `k / m`
    pub group_velocity: f64,
    /// `2π / k`
    pub de_broglie_wavelength: f64,
    /// `|sin(√(2 m E) w)|`
    pub resonance_strength: f64,
    /// `∫ κ dx` over the classically forbidden region.
    pub action_integral: f64,
    /// Not computed; always 0.
    pub phase_shift: f64,
    /// Probability bookkeeping.
    pub conservation: ConservationMetrics,
    /// Step size and count actually used.
    pub stepping: Stepping,
    /// Wavenumber grid for `momentum_density`, ascending.
    pub k: nd::Array1<f64>,
    /// Final momentum-space density `|ψ̃(k)|²`.
    pub momentum_density: nd::Array1<f64>,
    /// Checks on the final state.
    pub validation: ValidationResult,
}

/// Run a tunneling simulation.
///
/// Runs at [`DEFAULT_GRID_POINTS`] borrow their buffers from a process-wide
/// pool; other resolutions allocate a fresh [`Workspace`]. Safe to call from
/// several threads at once.
///
/// Errors are returned only for parameters that make the run impossible
/// (fewer than 3 grid points, non-positive mass, negative time, or a packet
/// that cannot be normalized). Numerical trouble is reported in
/// [`TunnelingResult::validation`].
pub fn calculate(params: &TunnelingParameters) -> TResult<TunnelingResult> {
    params.check()?;
    let pool = default_pool();
    if params.grid_points == pool.capacity() {
        let mut ws = pool.checkout();
        calculate_in(&mut ws, params)
    } else {
        let mut ws = Workspace::new(params.grid_points);
        calculate_in(&mut ws, params)
    }
}

/// Run a tunneling simulation in a caller-owned workspace.
///
/// The workspace capacity must equal `params.grid_points`.
pub fn calculate_in(ws: &mut Workspace, params: &TunnelingParameters)
    -> TResult<TunnelingResult>
{
    params.check()?;
    let n = params.grid_points;
    if ws.capacity() != n {
        return Err(TunnelError::Capacity { have: ws.capacity(), want: n });
    }

    let dx = fill_grid(&mut ws.x);
    fill_potential(&ws.x, &mut ws.V, &params.barrier());
    fill_packet(&ws.x, &mut ws.re, &mut ws.im, dx, &params.packet())?;

    let stepping = evolve(
        ws, dx, params.particle_mass, params.time, params.method);

    let res = observe(ws, dx, params, stepping);
    if !res.validation.is_valid {
        log::warn!(
            "tunneling run finished with errors: {}",
            res.validation.errors.join("; "),
        );
    } else if !res.validation.warnings.is_empty() {
        log::warn!(
            "tunneling run finished with warnings: {}",
            res.validation.warnings.join("; "),
        );
    }
    Ok(res)
}

// read the final buffers into an owned result
fn observe(
    ws: &Workspace,
    dx: f64,
    params: &TunnelingParameters,
    stepping: Stepping,
) -> TunnelingResult {
    let m = params.particle_mass;
    let E = params.particle_energy;
    let k0 = params.initial_momentum;

    let density = probability_density(&ws.re, &ws.im);
    let conservation = observables::conservation(&ws.x, &density, dx);
    let (start, end) = observables::barrier_indices(
        params.barrier_position, params.barrier_width, dx, ws.capacity());
    let part = observables::partition(&density, start, end);
    let wkb = observables::wkb(&ws.V, E, m, dx);
    let (k, momentum_density)
        = observables::momentum_density(&ws.re, &ws.im, dx);
    let validation = validate_wave_function(&ws.re, &ws.im, dx);

    TunnelingResult {
        x: ws.x.clone(),
        dx,
        potential: ws.V.clone(),
        wavefunction: Wavefunction {
            real: ws.re.clone(),
            imag: ws.im.clone(),
        },
        probability_density: density,
        transmission: part.transmission,
        reflection: part.reflection,
        barrier_occupancy: part.barrier_occupancy,
        wkb_transmission: wkb.transmission,
        classical_forbidden: E < params.barrier_height,
        group_velocity: k0 / m,
        de_broglie_wavelength: TAU / k0,
        resonance_strength: observables::resonance_strength(
            E, m, params.barrier_width),
        action_integral: wkb.action,
        phase_shift: 0.0,
        conservation,
        stepping,
        k,
        momentum_density,
        validation,
    }
}

/// Grid spacing that a run with `params` will use.
pub fn grid_spacing(params: &TunnelingParameters) -> f64 {
    spacing(params.grid_points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short(method: IntegrationMethod) -> TunnelingParameters {
        TunnelingParameters { time: 0.3, method, ..Default::default() }
    }

    #[test]
    fn partition_identity_all_methods() {
        for method in [
            IntegrationMethod::SplitOperator,
            IntegrationMethod::CrankNicolson,
            IntegrationMethod::Euler,
        ] {
            let res = calculate(&short(method)).unwrap();
            let sum = res.transmission + res.reflection + res.barrier_occupancy;
            assert!((sum - 1.0).abs() < 1e-6, "{}: {}", method, sum);
            assert!(res.validation.is_valid, "{}: {:?}", method, res.validation);
        }
    }

    #[test]
    fn classical_limit_has_unit_wkb() {
        let params = TunnelingParameters {
            particle_energy: 1.5,
            time: 0.1,
            ..Default::default()
        };
        let res = calculate(&params).unwrap();
        assert!(!res.classical_forbidden);
        assert_eq!(res.wkb_transmission, 1.0);
        assert_eq!(res.action_integral, 0.0);
    }

    #[test]
    fn derived_scalars() {
        let params = TunnelingParameters { time: 0.0, ..Default::default() };
        let res = calculate(&params).unwrap();
        assert_eq!(res.stepping.steps, 0);
        assert!((res.group_velocity - 2.0).abs() < 1e-15);
        assert!((res.de_broglie_wavelength - std::f64::consts::PI).abs() < 1e-15);
        assert_eq!(res.phase_shift, 0.0);
        assert_eq!(res.conservation.momentum_expectation, 0.0);
        // initial packet sits entirely before the barrier
        assert!(res.reflection > 0.999);
        assert!((res.conservation.position_expectation + 5.0).abs() < 1e-6);
        assert!(res.validation.is_clean(), "{:?}", res.validation);
        // κ = 1 over the width-2 barrier (51 grid points)
        let forbidden = res.potential.iter().filter(|v| **v > 0.5).count();
        let expected = (-2.0 * forbidden as f64 * res.dx).exp();
        assert!((res.wkb_transmission - expected).abs() < 1e-12);
    }

    #[test]
    fn off_default_resolution_allocates() {
        let params = TunnelingParameters {
            grid_points: 300,
            time: 0.05,
            ..Default::default()
        };
        let res = calculate(&params).unwrap();
        assert_eq!(res.x.len(), 300);
        assert!((res.dx - grid_spacing(&params)).abs() < 1e-15);
    }

    #[test]
    fn caller_workspace_must_match() {
        let mut ws = Workspace::new(100);
        let params = TunnelingParameters { time: 0.0, ..Default::default() };
        assert!(matches!(
            calculate_in(&mut ws, &params),
            Err(TunnelError::Capacity { have: 100, want: 512 }),
        ));
        let params = TunnelingParameters { grid_points: 100, ..params };
        assert!(calculate_in(&mut ws, &params).is_ok());
    }

    #[test]
    fn bad_parameters() {
        let bad_mass = TunnelingParameters {
            particle_mass: 0.0,
            ..Default::default()
        };
        assert!(matches!(calculate(&bad_mass), Err(TunnelError::BadMass(_))));
        let bad_grid = TunnelingParameters {
            grid_points: 2,
            ..Default::default()
        };
        assert!(matches!(
            calculate(&bad_grid),
            Err(TunnelError::BadGridPoints(2)),
        ));
        let bad_time = TunnelingParameters {
            time: -1.0,
            ..Default::default()
        };
        assert!(matches!(calculate(&bad_time), Err(TunnelError::BadTime(_))));
    }

    #[test]
    fn parameters_from_json() {
        let params: TunnelingParameters = serde_json::from_str(
            r#"{
                "barrier_height": 2.0,
                "barrier_shape": "gaussian",
                "method": "crank_nicolson",
                "absorbing_boundaries": true
            }"#,
        ).unwrap();
        assert_eq!(params.barrier_height, 2.0);
        assert_eq!(params.barrier_shape, BarrierShape::Gaussian);
        assert_eq!(params.method, IntegrationMethod::CrankNicolson);
        assert!(params.absorbing_boundaries);
        assert_eq!(params.grid_points, DEFAULT_GRID_POINTS);
    }
}
