//! Rudd (1991) empirical ionisation cross-sections.
//!
//! Energies are reduced by the Rydberg energy: `t = E/R`, `ω = W/R`.
//! The double-differential cross-section is the sum of a binary-encounter
//! lobe peaked at `cosθ = G2` and a soft-collision lobe peaked at
//! backscatter, weighted by `G4`. `G1` normalises the lobes so that their
//! solid-angle integral reproduces the single-differential cross-section.
#![allow(clippy::doc_markdown, clippy::many_single_char_names)]

use scatterkit_core::constants::{BOHR_CROSS_SECTION, BOHR_RADIUS, RYDBERG_EV};
use scatterkit_core::{
    ensure_above_threshold, CalcType, CrossSection, Error, Result, Species, SpeciesParams,
};
use std::f64::consts::PI;

const BETA: f64 = 0.60;
const GAMMA: f64 = 10.0;
const G_B: f64 = 2.9;
const N: f64 = 2.5;
const A1: f64 = 0.74;
const A2: f64 = 0.87;
const A3: f64 = -0.6;
const G5: f64 = 0.33;

/// Rudd (1991) cross-section model.
#[derive(Clone, Debug)]
pub struct Rudd1991 {
    species: Species,
    params: SpeciesParams,
}

impl Rudd1991 {
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

    /// Mott-like prefactor `S = 4πa₀²`.
    #[must_use]
    pub fn prefactor_s(&self) -> f64 {
        BOHR_CROSS_SECTION
    }

    /// Normalisation of the angular lobes.
    #[must_use]
    pub fn g1(&self, omega: f64, t: f64) -> f64 {
        let numerator = self.prefactor_s() * Self::f_t(t) * Self::f_1(omega, t) / RYDBERG_EV;
        numerator / Self::angular_integral(omega, t)
    }

    /// Binary-encounter peak position in `cosθ`.
    #[must_use]
    pub fn g2(omega: f64, t: f64) -> f64 {
        ((omega + 1.0) / t).sqrt()
    }

    /// Binary-encounter peak width.
    #[must_use]
    pub fn g3(omega: f64, t: f64) -> f64 {
        let g2 = Self::g2(omega, t);
        BETA * ((1.0 - g2 * g2) / omega).sqrt()
    }

    /// Soft-collision weight.
    #[must_use]
    pub fn g4(omega: f64, t: f64) -> f64 {
        GAMMA * (1.0 - omega / t).powi(3) / (t * (omega + 1.0))
    }

    /// Soft-collision peak width.
    #[must_use]
    pub fn g5() -> f64 {
        G5
    }

    /// Binary-encounter angular lobe.
    #[must_use]
    pub fn f_be(omega: f64, t: f64, theta: f64) -> f64 {
        let x = (theta.cos() - Self::g2(omega, t)) / Self::g3(omega, t);
        1.0 / (1.0 + x * x)
    }

    /// Soft-collision angular lobe.
    #[must_use]
    pub fn f_b(theta: f64) -> f64 {
        let x = (theta.cos() + 1.0) / G5;
        1.0 / (1.0 + x * x)
    }

    /// Solid-angle integral of [`Self::f_be`].
    #[must_use]
    pub fn g_be(omega: f64, t: f64) -> f64 {
        let g2 = Self::g2(omega, t);
        let g3 = Self::g3(omega, t);
        2.0 * PI * g3 * ((1.0 - g2).atan2(g3) + (1.0 + g2).atan2(g3))
    }

    /// Incident-energy factor `F(t)`.
    #[must_use]
    pub fn f_t(t: f64) -> f64 {
        (A1 * t.ln() + A2 + A3 / t) / t
    }

    /// Energy-transfer shape `f₁(ω, t)`.
    #[must_use]
    pub fn f_1(omega: f64, t: f64) -> f64 {
        let term1 = 1.0 / (omega + 1.0).powf(N);
        let term2 = 1.0 / (t - omega).powf(N);
        let term3 = 1.0 / ((omega + 1.0) * (t - omega)).powf(N / 2.0);
        term1 + term2 + term3
    }

    fn angular_integral(omega: f64, t: f64) -> f64 {
        Self::g_be(omega, t) + Self::g4(omega, t) * G_B
    }

    fn reduced(incident_energy: f64, energy_transfer: f64) -> (f64, f64) {
        (energy_transfer / RYDBERG_EV, incident_energy / RYDBERG_EV)
    }

    /// Cumulative fraction of the energy-transfer shape up to `ω`.
    ///
    /// Closed-form antiderivative of [`Self::f_1`] normalised over the full
    /// range `0 ≤ ω ≤ t - 1`, kept for validating the tabulated sampler.
    pub fn cdf_energy_transfer(omega: f64, t: f64) -> Result<f64> {
        if !(t > 1.0 && t.is_finite()) {
            return Err(Error::ConfigError(format!(
                "reduced incident energy must exceed 1, got {t}"
            )));
        }
        if !(0.0..=t - 1.0).contains(&omega) {
            return Err(Error::ConfigError(format!(
                "reduced energy transfer {omega} outside [0, {}]",
                t - 1.0
            )));
        }

        // (a^(1-n) - b^(1-n)) written through exp_m1 so that nearby
        // arguments do not cancel.
        let pow_diff = |a: f64, b: f64, p: f64| b.powf(p) * (p * (a / b).ln()).exp_m1();

        let half_n = N / 2.0;
        let scale = (2.0 / (t + 1.0)).powf(half_n);
        let term1 = (-pow_diff(omega + 1.0, 1.0, 1.0 - N) + pow_diff(t - omega, t, 1.0 - N))
            / (N - 1.0);
        let term2 = (2.0 / (N - 2.0)) * scale * -pow_diff(omega + 1.0, 1.0, 1.0 - half_n);
        let norm = -pow_diff(t, 1.0, 1.0 - N) / (N - 1.0)
            + scale * pow_diff(t, 1.0, 1.0 - half_n) / (N - 2.0);

        Ok((0.5 * (term1 - term2) / norm).clamp(0.0, 1.0))
    }

    /// Cumulative fraction of the double-differential cross-section over
    /// emission angles `0..θ`, at reduced energies `(ω, t)`.
    pub fn cdf_angle(&self, omega: f64, t: f64, theta: f64) -> Result<f64> {
        if !(omega > 0.0 && t > omega + 1.0 && theta.is_finite()) {
            return Err(Error::ConfigError(format!(
                "angular CDF undefined at omega={omega}, t={t}, theta={theta}"
            )));
        }
        let g2 = Self::g2(omega, t);
        let g3 = Self::g3(omega, t);
        let cos_theta = theta.cos();

        let term_be = 2.0 * PI * g3 * (((1.0 - g2) / g3).atan() - ((cos_theta - g2) / g3).atan());
        let term_b = 2.0 * PI * G5 * ((2.0 / G5).atan() - ((1.0 + cos_theta) / G5).atan());

        let sdcs = self.single_differential(t * RYDBERG_EV, omega * RYDBERG_EV)?;
        let cdf = self.g1(omega, t) * (term_be + Self::g4(omega, t) * term_b) / sdcs;
        Ok(cdf.clamp(0.0, 1.0))
    }
}

impl CrossSection for Rudd1991 {
    fn name(&self) -> &'static str {
        "Rudd1991"
    }

    fn calc_type(&self) -> CalcType {
        CalcType::Rudd1991
    }

    fn threshold(&self) -> f64 {
        RYDBERG_EV
    }

    fn total(&self, incident_energy: f64) -> Result<f64> {
        ensure_above_threshold(incident_energy, self.threshold())?;
        let u = incident_energy / RYDBERG_EV;
        Ok(1.3 * PI * BOHR_RADIUS * BOHR_RADIUS * (u.ln() + 4.0) / u)
    }

    fn single_differential(&self, incident_energy: f64, energy_transfer: f64) -> Result<f64> {
        ensure_above_threshold(incident_energy, self.threshold())?;
        let (omega, t) = Self::reduced(incident_energy, energy_transfer);
        Ok(self.g1(omega, t) * Self::angular_integral(omega, t))
    }

    fn double_differential(
        &self,
        incident_energy: f64,
        energy_transfer: f64,
        theta: f64,
    ) -> Result<f64> {
        ensure_above_threshold(incident_energy, self.threshold())?;
        let (omega, t) = Self::reduced(incident_energy, energy_transfer);
        let lobes = Self::f_be(omega, t, theta) + Self::g4(omega, t) * Self::f_b(theta);
        Ok(self.g1(omega, t) * lobes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_total_cross_section_reference() {
        let model = Rudd1991::new(Species::H);
        let sigma = model.total(100.0).unwrap();
        assert_relative_eq!(sigma, 9.327_870_015_619e-21, max_relative = 1e-6);
    }

    #[test]
    fn test_below_threshold_is_rejected() {
        let model = Rudd1991::new(Species::H);
        assert!(matches!(
            model.total(10.0),
            Err(Error::BelowThreshold { .. })
        ));
        assert!(model.single_differential(RYDBERG_EV, 1.0).is_err());
        assert!(model.double_differential(5.0, 1.0, 0.3).is_err());
    }

    #[test]
    fn test_lobe_integral_matches_g_b() {
        // 2π G5 atan(2/G5) is the soft-collision integral that G_B rounds.
        let exact = 2.0 * PI * G5 * (2.0 / G5).atan();
        assert_relative_eq!(exact, G_B, max_relative = 1e-2);
    }

    #[test]
    fn test_energy_transfer_cdf_limits() {
        let t = 100.0 / RYDBERG_EV;
        assert!(Rudd1991::cdf_energy_transfer(0.0, t).unwrap().abs() < 1e-12);
        assert_relative_eq!(
            Rudd1991::cdf_energy_transfer(t - 1.0, t).unwrap(),
            1.0,
            max_relative = 1e-9
        );
        let lo = Rudd1991::cdf_energy_transfer(0.5, t).unwrap();
        let hi = Rudd1991::cdf_energy_transfer(2.0, t).unwrap();
        assert!(lo < hi);
    }

    #[test]
    fn test_energy_transfer_cdf_rejects_bad_input() {
        assert!(Rudd1991::cdf_energy_transfer(0.5, 1.0).is_err());
        assert!(Rudd1991::cdf_energy_transfer(-0.1, 5.0).is_err());
        assert!(Rudd1991::cdf_energy_transfer(4.5, 5.0).is_err());
    }

    #[test]
    fn test_angle_cdf_monotonic() {
        let model = Rudd1991::new(Species::H);
        let t = 100.0 / RYDBERG_EV;
        let omega = 60.0 / RYDBERG_EV;
        assert!(model.cdf_angle(omega, t, 0.0).unwrap().abs() < 1e-12);

        let mut previous = 0.0;
        for i in 1..=50 {
            let theta = PI * f64::from(i) / 50.0;
            let cdf = model.cdf_angle(omega, t, theta).unwrap();
            assert!(cdf >= previous - 1e-12);
            previous = cdf;
        }
        assert_relative_eq!(previous, 1.0, max_relative = 1e-2);
    }
}
