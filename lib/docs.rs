//! Theoretical background.
//!
//! # Contents
//! - [Units](#units)
//! - [Discretization](#discretization)
//! - [Time stepping](#time-stepping)
//! - [Barrier observables](#barrier-observables)
//! - [Honeycomb tight-binding](#honeycomb-tight-binding)
//!
//! # Units
//! The tunneling solver works in natural units with *ħ* = 1, so that the
//! time-dependent Schrödinger equation reads
//! ```text
//!   ∂ψ       1  ∂²ψ
//! i -- = - --- --- + V(x) ψ
//!   ∂t     2 m ∂x²
//! ```
//! A wavenumber *k* is then also a momentum, and a plane wave *e*<sup>*ikx*</sup>
//! carries kinetic energy *k*²/2 *m*. Lengths, energies, and times are
//! whatever scale the caller chooses for *V*₀ and *m*; the domain is always
//! the interval \[-10, 10\].
//!
//! The tight-binding model is dimensionful: hoppings in eV and bond lengths in
//! Å, with k-vectors in Å⁻¹. Band energies are reported in units of the
//! nearest-neighbor hopping *t*. Items in [`units`][crate::units] convert
//! between eV, Hartree, Rydberg, and SI.
//!
//! # Discretization
//! For *N* grid points the spacing is *δx* = 20 / *N* and
//! ```text
//! x[i] = -10 + i δx, i ∊ {0, ..., N - 1}
//! ```
//! so the right edge +10 itself is never sampled. The kinetic operator is the
//! three-point second difference
//! ```text
//! ∂²ψ          ψ[i + 1] - 2 ψ[i] + ψ[i - 1]
//! --- (x[i]) ≈ ----------------------------
//! ∂x²                     δx²
//! ```
//! evaluated only at interior points; the two boundary values are frozen at
//! their initial values, which for a packet well inside the domain are
//! exponentially small.
//!
//! Optionally the outer 10% of the domain on either side is raised by a
//! quadratic ramp
//! ```text
//! V_abs(x) = 0.1 V₀ (d / (0.1 L))², d = distance into the ramp
//! ```
//! that is largest at the domain edge. Despite the name this is a real-valued
//! ramp and reflects, rather than absorbs, the slowest components.
//!
//! # Time stepping
//! Writing ψ = *R* + *i I*, the equation above splits into the coupled real
//! system
//! ```text
//! ∂R/∂t = + H I
//! ∂I/∂t = - H R
//! ```
//! All schemes in [`timedep`][crate::timedep] are explicit updates of this
//! system. A plain forward Euler step multiplies each Fourier mode of the
//! kinetic operator by 1 - *i a* with *a* = *ω dt*, whose modulus exceeds 1
//! for every nonzero *a*, so the norm grows without bound. Instead, the real
//! part is advanced first and the imaginary part is then advanced using the
//! freshly updated real part[^2]:
//! ```text
//! R ← R + dt H I
//! I ← I - dt H R
//! ```
//! Per mode this is the map
//! ```text
//! [R]    [ 1       a   ] [R]
//! [I] ←  [ -a   1 - a² ] [I]
//! ```
//! which has unit determinant and is stable (purely oscillatory) for |*a*| < 2.
//! The largest kinetic frequency on the grid is 2 / (*m* *δx*²), so with the
//! step
//! ```text
//! dt = min(0.001, m δx² / 2)
//! ```
//! every kinetic mode has |*a*| ≤ 1. The norm then oscillates at the
//! *O*(*E* *dt*) level instead of drifting, which is what the validation
//! tolerance on total probability allows for.
//!
//! "Split-operator" stepping applies the exact pointwise potential phase
//! *e*<sup>-*iV dt*</sup> and then the kinetic part of the update above with
//! *V* = 0. It is a first-order splitting of a finite-difference scheme, not
//! the Fourier split-step method. "Euler" stepping applies the staggered update
//! with the full *H*, and "Crank-Nicolson" stepping is the same Euler update at
//! half the step and twice the step count.
//!
//! # Barrier observables
//! With barrier bounds *x*<sub>s</sub> = *x*<sub>b</sub> - *w*/2 and
//! *x*<sub>e</sub> = *x*<sub>b</sub> + *w*/2 mapped to grid indices
//! ```text
//! start = ⌊(x_s + 10) / δx⌋
//! end   = ⌊(x_e + 10) / δx⌋
//! ```
//! the final density is partitioned into reflected (`[0, start)`), barrier
//! (`[start, end)`), and transmitted (`[end, N)`) mass, each divided by their
//! sum so the three add to one.
//!
//! The WKB estimate uses the points where *V* > *E*,
//! ```text
//! S = Σ √(2 m (V[i] - E)) δx
//! T_WKB = exp(-2 S)
//! ```
//! with *T*<sub>WKB</sub> = 1 when no point is classically forbidden. Note that
//! the absorbing ramp counts as forbidden wherever it exceeds *E*.
//!
//! The momentum-space density is computed by FFT of the final state,
//! ```text
//!           δx²
//! |ψ̃(k)|² = --- |Σ ψ[j] e^(-i k x[j])|²
//!           2π
//! ```
//! scaled so that Σ |ψ̃|² *δk* = Σ |ψ|² *δx*.
//!
//! # Honeycomb tight-binding
//! Graphene is a triangular Bravais lattice with a two-atom (A, B) basis. With
//! carbon-carbon bond length *a*<sub>cc</sub> the lattice constant is
//! *a* = √3 *a*<sub>cc</sub>, and each A site has three B neighbors at
//! ```text
//! δ₁ = a_cc (0, 1)
//! δ₂ = a_cc (√3/2, -1/2)
//! δ₃ = a_cc (-√3/2, -1/2)
//! ```
//! In the (A, B) sublattice basis the Bloch Hamiltonian is
//! ```text
//!        [ ε(k)       -t f₁(k) ]
//! H(k) = [                     ]
//!        [ -t f₁*(k)  ε(k)     ]
//!
//! f₁(k) = Σⱼ exp(i k·δⱼ)
//! ε(k) = -t′ (f₂(k) + 3)
//! f₂(k) = 2 cos(kₓ a) + 4 cos(kₓ a / 2) cos(√3 k_y a / 2)
//! ```
//! where *f*₂ sums over the six second neighbors, and the eigenvalues are
//! ```text
//! E±(k) = ε(k) ± t |f₁(k)|
//! ```
//! The high-symmetry points of the hexagonal Brillouin zone are
//! ```text
//! Γ = (0, 0)
//! K = (4π / 3a, 0)
//! M = (π / a, π / √3a)
//! ```
//! At K the three phases are 0 and ±2π/3, so *f*₁(K) = 0 and the two bands
//! touch (the Dirac point)[^1]. Since *f*₂(K) = -3 the band center there is
//! exactly zero, which fixes the constant in *ε*(*k*). The next-nearest
//! hopping breaks the electron-hole symmetry of the bands away from K without
//! opening a gap.
//!
//! The density of states is sampled on a square k-grid restricted to the
//! disk |*k*| ≤ |ΓK|, histogrammed in units of *t*, and broadened by a
//! Gaussian two bins wide. Near the Dirac point it vanishes linearly in
//! |*E*|, and it carries van Hove peaks from the saddle points at M, near
//! *E*/*t* = ±1.
//!
//! [^1]: A. H. Castro Neto, F. Guinea, N. M. R. Peres, K. S. Novoselov, and
//! A. K. Geim, "The electronic properties of graphene." Rev. Mod. Phys. **81**
//! 109 (2009).
//!
//! [^2]: P. B. Visscher, "A fast explicit algorithm for the time-dependent
//! Schrödinger equation." Computers in Physics **5** 596 (1991).
