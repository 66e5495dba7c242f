//! Physical constants used by the cross-section formulas.
//!
//! Energies are in electronvolts and lengths in metres, so cross-sections
//! come out in square metres.

/// Rydberg energy (eV).
pub const RYDBERG_EV: f64 = 13.6057;

/// Bohr radius (m).
pub const BOHR_RADIUS: f64 = 5.291_772_109_03e-11;

/// Geometric cross-section of the hydrogen ground state, `4πa₀²` (m²).
pub const BOHR_CROSS_SECTION: f64 = 4.0 * std::f64::consts::PI * BOHR_RADIUS * BOHR_RADIUS;
