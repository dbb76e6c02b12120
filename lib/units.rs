#![allow(non_upper_case_globals)]

//! Physical constants and scalar conversions between the energy and length
//! units used by callers (eV, Å) and SI or atomic units.
//!
//! Concrete physical constants are taken from NIST.

use std::f64::consts::PI;

/// Planck constant (kg m^2 s^-1)
pub const h: f64 = 6.62607015e-34;
//             +/- 0 (exact)

/// reduced Planck constant (kg m^2 s^-1)
pub const hbar: f64 = h / 2.0 / PI;
//                +/- 0 (exact)

/// speed of light in vacuum (m s^-1)
pub const c: f64 = 2.99792458e8;
//             +/- 0 (exact)

/// Boltzmann's constant (J K^-1)
pub const kB: f64 = 1.380649e-23;
//              +/- 0 (exact)

/// elementary charge (C)
pub const e: f64 = 1.602176634e-19;
//             +/- 0 (exact)

/// electron mass (kg)
pub const me: f64 = 9.1093837015e-31;
//              +/- 0.0000000028e-31

/// Rydberg constant for an infinite-mass nucleus (m^-1)
pub const Rinf: f64 = 10973731.568160;
//                       +/- 0.000021

/// Bohr radius (m)
pub const a0: f64 = 5.29177210903e-11;
//              +/- 0.00000000080e-11

/// Hartree energy (J) = 2\*Rinf\*h\*c
pub const Eh: f64 = 4.3597447222071e-18;
//              +/- 0.0000000000085e-18

/// Rydberg energy (J) = Eh / 2
pub const Ry: f64 = Eh / 2.0;

/// Boltzmann's constant in electronvolts (eV K^-1)
pub const KB_EV: f64 = kB / e;

/// One ångström (m)
pub const ANGSTROM: f64 = 1e-10;

/// Convert an energy in electronvolts to joules.
pub fn ev_to_joule(ev: f64) -> f64 { ev * e }

/// Convert an energy in joules to electronvolts.
pub fn joule_to_ev(joule: f64) -> f64 { joule / e }

/// Convert a length in ångströms to meters.
pub fn angstrom_to_meter(angstrom: f64) -> f64 { angstrom * ANGSTROM }

/// Convert a length in meters to ångströms.
pub fn meter_to_angstrom(meter: f64) -> f64 { meter / ANGSTROM }

/// Convert an energy in Hartrees to electronvolts.
pub fn hartree_to_ev(hartree: f64) -> f64 { hartree * Eh / e }

/// Convert an energy in electronvolts to Hartrees.
pub fn ev_to_hartree(ev: f64) -> f64 { ev * e / Eh }

/// Convert an energy in Rydbergs to electronvolts.
pub fn rydberg_to_ev(rydberg: f64) -> f64 { rydberg * Ry / e }

/// Convert an energy in electronvolts to Rydbergs.
pub fn ev_to_rydberg(ev: f64) -> f64 { ev * e / Ry }
