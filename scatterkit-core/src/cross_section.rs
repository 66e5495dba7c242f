//! Cross-section model selector and capability trait.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed-form cross-section family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CalcType {
    /// Rudd (1991) empirical model with binary-encounter and soft-collision
    /// angular lobes.
    Rudd1991,
    /// Kim & Rudd (1994) binary-encounter-dipole model.
    Kim1994,
}

impl CalcType {
    /// All supported calculation types.
    pub const ALL: [CalcType; 2] = [CalcType::Rudd1991, CalcType::Kim1994];

    /// Canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CalcType::Rudd1991 => "Rudd1991",
            CalcType::Kim1994 => "Kim1994",
        }
    }
}

impl fmt::Display for CalcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalcType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rudd1991" | "rudd" => Ok(CalcType::Rudd1991),
            "kim1994" | "kim" | "bed" => Ok(CalcType::Kim1994),
            _ => Err(Error::unsupported("calculation type", s)),
        }
    }
}

/// Rejects incident energies at or below a model threshold.
///
/// Every cross-section accessor calls this before touching a formula, so
/// `log(t)` and `1/(t - ω)` terms are never evaluated for `t ≤ 1`.
pub fn ensure_above_threshold(energy: f64, threshold: f64) -> Result<()> {
    if energy.is_finite() && energy > threshold {
        Ok(())
    } else {
        Err(Error::BelowThreshold { energy, threshold })
    }
}

/// Trait for inelastic cross-section models.
///
/// Implementations are pure functions of the incident kinetic energy `E`,
/// the energy transfer `W` (both eV) and the secondary emission angle
/// `θ` (radians). Cross-sections are returned in m², per eV and per
/// steradian as appropriate.
pub trait CrossSection: Send + Sync {
    /// Model name.
    fn name(&self) -> &'static str;

    /// The calculation family this model implements.
    fn calc_type(&self) -> CalcType;

    /// Ionisation threshold (eV). The kinematically allowed energy transfer
    /// is `W < E - threshold`.
    fn threshold(&self) -> f64;

    /// Total ionisation cross-section at incident energy `E`.
    fn total(&self, incident_energy: f64) -> Result<f64>;

    /// Single-differential cross-section `dσ/dW`.
    fn single_differential(&self, incident_energy: f64, energy_transfer: f64) -> Result<f64>;

    /// Double-differential cross-section `d²σ/(dW dΩ)`.
    fn double_differential(
        &self,
        incident_energy: f64,
        energy_transfer: f64,
        theta: f64,
    ) -> Result<f64>;
}
