//! Gaussian wave packet initialization.

use ndarray as nd;
use serde::Serialize;
use crate::{
    Arr1,
    error::{ LengthError, TunnelError },
    utils::wf_renormalize,
};

/// Complex wavefunction stored as two parallel real arrays.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Wavefunction {
    /// Real part
    pub real: nd::Array1<f64>,
    /// Imaginary part
    pub imag: nd::Array1<f64>,
}

/// Parameters of a Gaussian wave packet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Packet {
    /// Envelope width σ.
    pub width: f64,
    /// Envelope center x₀.
    pub position: f64,
    /// Carrier wavenumber k.
    pub momentum: f64,
}

/// Write the packet `exp(-(x - x₀)² / 2σ²) exp(i k x)` into `re` and `im`,
/// normalized so that `Σ (re² + im²) δx = 1`.
///
/// Fails if the arrays disagree in length or if the unnormalized norm is zero
/// or non-finite (e.g. σ ≈ 0 between grid points).
pub fn fill_packet<S, T, U>(
    x: &Arr1<S>,
    re: &mut Arr1<T>,
    im: &mut Arr1<U>,
    dx: f64,
    packet: &Packet,
) -> Result<(), TunnelError>
where
    S: nd::Data<Elem = f64>,
    T: nd::DataMut<Elem = f64>,
    U: nd::DataMut<Elem = f64>,
{
    LengthError::check(x, re)?;
    LengthError::check(x, im)?;
    let Packet { width, position, momentum } = *packet;
    nd::Zip::from(x).and(&mut *re).and(&mut *im)
        .for_each(|&xi, ri, ii| {
            let env = (-0.5 * ((xi - position) / width).powi(2)).exp();
            let (s, c) = (momentum * xi).sin_cos();
            *ri = env * c;
            *ii = env * s;
        });
    let norm = wf_renormalize(re, im, dx);
    (norm > 0.0 && norm.is_finite()).then_some(())
        .ok_or(TunnelError::Normalization(norm))
}

/// Construct a fresh, normalized Gaussian wave packet on the grid `x`.
pub fn gaussian_packet<S>(x: &Arr1<S>, dx: f64, packet: &Packet)
    -> Result<Wavefunction, TunnelError>
where S: nd::Data<Elem = f64>
{
    let mut real: nd::Array1<f64> = nd::Array1::zeros(x.len());
    let mut imag: nd::Array1<f64> = nd::Array1::zeros(x.len());
    fill_packet(x, &mut real, &mut imag, dx, packet)?;
    Ok(Wavefunction { real, imag })
}
