//! Kim & Rudd (1994) binary-encounter-dipole cross-sections.
//!
//! Energies are reduced by the species binding energy: `t = E/B`,
//! `u = U/B`, `ω = W/B`.
#![allow(clippy::doc_markdown)]

use scatterkit_core::constants::{BOHR_CROSS_SECTION, RYDBERG_EV};
use scatterkit_core::{
    ensure_above_threshold, CalcType, CrossSection, Error, Result, Species, SpeciesParams,
};

/// Kim & Rudd (1994) cross-section model.
#[derive(Clone, Debug)]
pub struct Kim1994 {
    species: Species,
    params: SpeciesParams,
}

impl Kim1994 {
    /// Creates the model for a target species.
    #[must_use]
    pub fn new(species: Species) -> Self {
        Self {
            species,
            params: *species.params(),
        }
    }

    /// Target species.
    #[must_use]
    pub fn species(&self) -> Species {
        self.species
    }

    /// Species constants.
    #[must_use]
    pub fn params(&self) -> &SpeciesParams {
        &self.params
    }

    /// Prefactor `S = 4πa₀² N (R/B)²`.
    #[must_use]
    pub fn prefactor_s(&self) -> f64 {
        let ratio = RYDBERG_EV / self.params.binding_energy;
        BOHR_CROSS_SECTION * self.params.electrons * ratio * ratio
    }

    /// Dipole integral `D(t)`.
    #[must_use]
    pub fn dipole_integral(&self, t: f64) -> f64 {
        self.params.dipole_integral(t)
    }

    /// Differential oscillator strength `df/dω`.
    #[must_use]
    pub fn differential_oscillator_strength(&self, omega: f64) -> f64 {
        self.params.differential_oscillator_strength(omega)
    }

    fn reduced_energies(&self, incident_energy: f64) -> (f64, f64) {
        let b = self.params.binding_energy;
        (incident_energy / b, self.params.orbital_kinetic_energy / b)
    }
}

impl CrossSection for Kim1994 {
    fn name(&self) -> &'static str {
        "Kim1994"
    }

    fn calc_type(&self) -> CalcType {
        CalcType::Kim1994
    }

    fn threshold(&self) -> f64 {
        self.params.binding_energy
    }

    fn total(&self, incident_energy: f64) -> Result<f64> {
        ensure_above_threshold(incident_energy, self.threshold())?;
        let (t, u) = self.reduced_energies(incident_energy);
        let ln_t = t.ln();
        let prefac = self.prefactor_s() / (t + u + 1.0);
        let dipole = self.dipole_integral(t) * ln_t;
        let binary = (2.0 - self.params.electron_ratio()) * ((t - 1.0) / t - ln_t / (t + 1.0));
        Ok(prefac * (dipole + binary))
    }

    fn single_differential(&self, incident_energy: f64, energy_transfer: f64) -> Result<f64> {
        ensure_above_threshold(incident_energy, self.threshold())?;
        let (t, u) = self.reduced_energies(incident_energy);
        let omega = energy_transfer / self.params.binding_energy;
        let ratio = self.params.electron_ratio();

        let prefac = self.prefactor_s() / (self.params.binding_energy * (t + u + 1.0));
        let term1 = (ratio - 2.0) / (t + 1.0) * (1.0 / (omega + 1.0) + 1.0 / (t - omega));
        let term2 =
            (2.0 - ratio) * (1.0 / (omega + 1.0).powi(2) + 1.0 / (t - omega).powi(2));
        let term3 = t.ln() / (self.params.electrons * (omega + 1.0))
            * self.differential_oscillator_strength(omega);
        Ok(prefac * (term1 + term2 + term3))
    }

    fn double_differential(
        &self,
        _incident_energy: f64,
        _energy_transfer: f64,
        _theta: f64,
    ) -> Result<f64> {
        Err(Error::unsupported(
            "double-differential cross-section",
            self.name(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prefactor_reduces_to_bohr_for_hydrogen() {
        let model = Kim1994::new(Species::H);
        assert_relative_eq!(model.prefactor_s(), BOHR_CROSS_SECTION, max_relative = 1e-12);
    }

    #[test]
    fn test_total_cross_section_positive() {
        for species in Species::ALL {
            let model = Kim1994::new(species);
            for energy in [30.0, 100.0, 1_000.0, 18_600.0, 1e5] {
                let sigma = model.total(energy).unwrap();
                assert!(sigma.is_finite() && sigma > 0.0, "{species} at {energy} eV");
            }
        }
    }

    #[test]
    fn test_threshold_is_binding_energy() {
        let model = Kim1994::new(Species::He);
        assert_relative_eq!(model.threshold(), 24.59);
        assert!(matches!(
            model.total(20.0),
            Err(Error::BelowThreshold { .. })
        ));
    }

    #[test]
    fn test_no_double_differential() {
        let model = Kim1994::new(Species::H2);
        let err = model.double_differential(100.0, 40.0, 0.5).unwrap_err();
        assert!(matches!(err, Error::UnsupportedModel { .. }));
    }

    #[test]
    fn test_single_differential_symmetric_terms() {
        // The binary terms are symmetric under ω -> t - 1 - ω, so only the
        // dipole term distinguishes the two ends of the range.
        let model = Kim1994::new(Species::H);
        let energy = 500.0;
        let b = model.params().binding_energy;
        let w = 50.0;
        let mirrored = energy - b - w;
        let low = model.single_differential(energy, w).unwrap();
        let high = model.single_differential(energy, mirrored).unwrap();
        assert!(low > high);
        assert!(high > 0.0);
    }
}
