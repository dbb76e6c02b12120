//! Construction of the spatial grid and the barrier potential sampled on it.
//!
//! The domain is always `[-L/2, L/2]` with `L =`
//! [`DOMAIN_LENGTH`][crate::DOMAIN_LENGTH], sampled at `N` points spaced by
//! `δx = L / N` (the right endpoint is not included).

use std::{ fmt, str::FromStr };
use ndarray as nd;
use serde::{ Deserialize, Serialize };
use crate::{ Arr1, DOMAIN_LENGTH };

/// Shape of the potential barrier.
///
/// Parsing from a string never fails: unrecognized names fall back to
/// [`Rectangular`][Self::Rectangular].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrierShape {
    /// `V₀` inside `|x - x_b| < w/2`, zero outside.
    #[default]
    Rectangular,
    /// `V₀ exp(-(x - x_b)² / 2σ²)` with `σ = w/3`.
    Gaussian,
    /// Linear ramp from `V₀` at the center down to zero at `|x - x_b| = w/2`.
    Triangular,
    /// Two Gaussians of width `w/6` centered at `x_b ± w/3`.
    DoubleWell,
    /// Screened `V₀ exp(-r/w) / r`, with `r` floored at 0.1.
    Coulomb,
}

impl BarrierShape {
    /// Parse a shape name, falling back to `Rectangular`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "gaussian" => Self::Gaussian,
            "triangular" => Self::Triangular,
            "double_well" | "doublewell" | "double-well" => Self::DoubleWell,
            "coulomb" => Self::Coulomb,
            _ => Self::Rectangular,
        }
    }

    /// Evaluate the shape at a position `rel` relative to the barrier center.
    pub fn eval(&self, rel: f64, height: f64, width: f64) -> f64 {
        match self {
            Self::Rectangular => {
                if rel.abs() < width / 2.0 { height } else { 0.0 }
            },
            Self::Gaussian => {
                let sigma = width / 3.0;
                height * (-0.5 * (rel / sigma).powi(2)).exp()
            },
            Self::Triangular => {
                if rel.abs() < width / 2.0 {
                    height * (1.0 - 2.0 * rel.abs() / width)
                } else {
                    0.0
                }
            },
            Self::DoubleWell => {
                let sigma = width / 6.0;
                let c = width / 3.0;
                height * (
                    (-0.5 * ((rel - c) / sigma).powi(2)).exp()
                    + (-0.5 * ((rel + c) / sigma).powi(2)).exp()
                )
            },
            Self::Coulomb => {
                let r = rel.abs().max(0.1);
                height / r * (-r / width).exp()
            },
        }
    }
}

impl FromStr for BarrierShape {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Self::parse(s)) }
}

impl fmt::Display for BarrierShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rectangular => write!(f, "rectangular"),
            Self::Gaussian => write!(f, "gaussian"),
            Self::Triangular => write!(f, "triangular"),
            Self::DoubleWell => write!(f, "double_well"),
            Self::Coulomb => write!(f, "coulomb"),
        }
    }
}

/// Barrier description consumed by [`fill_potential`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Barrier {
    pub shape: BarrierShape,
    pub height: f64,
    pub width: f64,
    pub position: f64,
    pub absorbing: bool,
}

/// Return the grid spacing for `n` points over the domain.
pub fn spacing(n: usize) -> f64 { DOMAIN_LENGTH / n as f64 }

/// Fill `x` with the uniform grid `x[i] = -L/2 + i δx` and return `δx`.
pub fn fill_grid<S>(x: &mut Arr1<S>) -> f64
where S: nd::DataMut<Elem = f64>
{
    let dx = spacing(x.len());
    x.iter_mut().enumerate()
        .for_each(|(i, xi)| { *xi = -DOMAIN_LENGTH / 2.0 + i as f64 * dx; });
    dx
}

/// Construct a fresh grid of `n` points.
pub fn build_grid(n: usize) -> (nd::Array1<f64>, f64) {
    let mut x: nd::Array1<f64> = nd::Array1::zeros(n);
    let dx = fill_grid(&mut x);
    (x, dx)
}

/// Sample the barrier on the grid `x` into `V`, adding the absorbing-boundary
/// ramp if requested.
///
/// The ramp covers the outer 10% of the domain on each side and grows
/// quadratically from zero at its inner edge to `0.1 V₀` at the domain edge.
/// It is a real addition to the potential.
pub fn fill_potential<S, T>(x: &Arr1<S>, V: &mut Arr1<T>, barrier: &Barrier)
where
    S: nd::Data<Elem = f64>,
    T: nd::DataMut<Elem = f64>,
{
    let Barrier { shape, height, width, position, absorbing } = *barrier;
    let half = DOMAIN_LENGTH / 2.0;
    let ramp = 0.1 * DOMAIN_LENGTH;
    let strength = 0.1 * height;
    V.iter_mut().zip(x)
        .for_each(|(Vi, &xi)| {
            *Vi = shape.eval(xi - position, height, width);
            if absorbing {
                let depth = half - xi.abs();
                if depth < ramp {
                    *Vi += strength * ((ramp - depth) / ramp).powi(2);
                }
            }
        });
}

/// Construct a fresh potential array on the grid `x`.
pub fn build_potential<S>(x: &Arr1<S>, barrier: &Barrier) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let mut V: nd::Array1<f64> = nd::Array1::zeros(x.len());
    fill_potential(x, &mut V, barrier);
    V
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barrier(shape: BarrierShape) -> Barrier {
        Barrier {
            shape,
            height: 1.0,
            width: 2.0,
            position: 0.0,
            absorbing: false,
        }
    }

    #[test]
    fn grid_is_uniform() {
        let (x, dx) = build_grid(512);
        assert!((dx - 20.0 / 512.0).abs() < 1e-15);
        assert_eq!(x[0], -10.0);
        assert!(x.iter().zip(x.iter().skip(1))
            .all(|(a, b)| ((b - a) - dx).abs() < 1e-12));
        assert!((x[511] - (10.0 - dx)).abs() < 1e-12);
    }

    #[test]
    fn shape_profiles() {
        let h = 1.0;
        let w = 2.0;
        let rect = BarrierShape::Rectangular;
        assert_eq!(rect.eval(0.5, h, w), 1.0);
        assert_eq!(rect.eval(1.0, h, w), 0.0);
        assert_eq!(rect.eval(-1.5, h, w), 0.0);

        let tri = BarrierShape::Triangular;
        assert_eq!(tri.eval(0.0, h, w), 1.0);
        assert!((tri.eval(0.5, h, w) - 0.5).abs() < 1e-15);
        assert_eq!(tri.eval(1.2, h, w), 0.0);

        let gauss = BarrierShape::Gaussian;
        assert_eq!(gauss.eval(0.0, h, w), 1.0);
        let sigma = w / 3.0;
        assert!((gauss.eval(sigma, h, w) - (-0.5_f64).exp()).abs() < 1e-15);

        let dw = BarrierShape::DoubleWell;
        assert!(dw.eval(w / 3.0, h, w) > dw.eval(0.0, h, w));
        assert!((dw.eval(0.4, h, w) - dw.eval(-0.4, h, w)).abs() < 1e-15);

        let coul = BarrierShape::Coulomb;
        assert_eq!(coul.eval(0.0, h, w), coul.eval(0.1, h, w));
        assert!((coul.eval(0.0, h, w) - 10.0 * (-0.05_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn unknown_shapes_are_rectangular() {
        assert_eq!(BarrierShape::parse("gaussian"), BarrierShape::Gaussian);
        assert_eq!(BarrierShape::parse("double_well"), BarrierShape::DoubleWell);
        assert_eq!(BarrierShape::parse("sawtooth"), BarrierShape::Rectangular);
        assert_eq!("".parse::<BarrierShape>(), Ok(BarrierShape::Rectangular));
        assert_eq!(BarrierShape::Coulomb.to_string(), "coulomb");
    }

    #[test]
    fn absorbing_ramp() {
        let (x, _) = build_grid(200);
        let plain = build_potential(&x, &barrier(BarrierShape::Rectangular));
        let mut b = barrier(BarrierShape::Rectangular);
        b.absorbing = true;
        let damped = build_potential(&x, &b);
        let added = &damped - &plain;
        // strongest at the left edge, zero in the middle of the domain
        assert!((added[0] - 0.1).abs() < 1e-12);
        assert_eq!(added[100], 0.0);
        assert!(added[1] < added[0]);
        assert!(added[198] < added[199]);
        // nothing beyond the outer 10%
        assert!(added.iter().zip(&x)
            .filter(|(_, xi)| xi.abs() < 8.0)
            .all(|(a, _)| *a == 0.0));
    }
}
