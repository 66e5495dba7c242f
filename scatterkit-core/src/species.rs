//! Target species and their fixed atomic constants.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gas target species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Species {
    /// Atomic hydrogen.
    H,
    /// Helium.
    He,
    /// Molecular hydrogen.
    H2,
}

impl Species {
    /// All supported species.
    pub const ALL: [Species; 3] = [Species::H, Species::He, Species::H2];

    /// Returns the constant record for this species.
    #[must_use]
    pub fn params(self) -> &'static SpeciesParams {
        match self {
            Species::H => &HYDROGEN,
            Species::He => &HELIUM,
            Species::H2 => &MOLECULAR_HYDROGEN,
        }
    }

    /// Canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Species::H => "H",
            Species::He => "He",
            Species::H2 => "H2",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hydrogen" => Ok(Species::H),
            "he" | "helium" => Ok(Species::He),
            "h2" | "molecular-hydrogen" => Ok(Species::H2),
            _ => Err(Error::unsupported("species", s)),
        }
    }
}

/// Coefficients `(b, c, d, e, f)` of the differential oscillator strength
/// polynomial in `1/(ω+1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OscillatorCoefficients {
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl OscillatorCoefficients {
    #[inline]
    fn as_array(&self) -> [f64; 5] {
        [self.b, self.c, self.d, self.e, self.f]
    }
}

/// Immutable per-species constants.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeciesParams {
    /// Binding energy `B` (eV).
    pub binding_energy: f64,
    /// Orbital kinetic energy `U` (eV).
    pub orbital_kinetic_energy: f64,
    /// Number of bound electrons `N`.
    pub electrons: f64,
    /// Effective electron number `Ni`.
    pub effective_electrons: f64,
    /// Oscillator strength coefficients.
    pub oscillator: OscillatorCoefficients,
}

const HYDROGEN: SpeciesParams = SpeciesParams {
    binding_energy: 13.6057,
    orbital_kinetic_energy: 13.6057,
    electrons: 1.0,
    effective_electrons: 0.4343,
    oscillator: OscillatorCoefficients {
        b: -2.2473e-2,
        c: 1.1775,
        d: -4.6264e-1,
        e: 8.9064e-2,
        f: 0.0,
    },
};

const HELIUM: SpeciesParams = SpeciesParams {
    binding_energy: 24.59,
    orbital_kinetic_energy: 39.51,
    electrons: 2.0,
    effective_electrons: 1.605,
    oscillator: OscillatorCoefficients {
        b: 0.0,
        c: 12.178,
        d: -29.585,
        e: 31.251,
        f: -12.175,
    },
};

const MOLECULAR_HYDROGEN: SpeciesParams = SpeciesParams {
    binding_energy: 15.43,
    orbital_kinetic_energy: 25.68,
    electrons: 2.0,
    effective_electrons: 1.173,
    oscillator: OscillatorCoefficients {
        b: 0.0,
        c: 1.1262,
        d: 6.3982,
        e: -7.8055,
        f: 2.1440,
    },
};

impl SpeciesParams {
    /// Ratio `Ni/N`.
    #[inline]
    #[must_use]
    pub fn electron_ratio(&self) -> f64 {
        self.effective_electrons / self.electrons
    }

    /// Dipole oscillator strength integral `D(t)` for reduced incident
    /// energy `t = E/B`.
    #[must_use]
    pub fn dipole_integral(&self, t: f64) -> f64 {
        let t_term = (t + 1.0) / 2.0;
        let sum: f64 = self
            .oscillator
            .as_array()
            .iter()
            .zip(2_i32..)
            .map(|(&coeff, k)| {
                let k = f64::from(k);
                (coeff / k) * (1.0 - t_term.powf(-k))
            })
            .sum();
        sum / self.electrons
    }

    /// Differential oscillator strength `df/dω` at reduced energy
    /// transfer `ω = W/B`.
    #[must_use]
    pub fn differential_oscillator_strength(&self, omega: f64) -> f64 {
        let x = omega + 1.0;
        self.oscillator
            .as_array()
            .iter()
            .zip(2_i32..)
            .map(|(&coeff, k)| coeff / x.powi(k))
            .sum()
    }
}
