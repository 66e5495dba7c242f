//! Stateful inelastic scatter: cross-sections, sampling and kinematics at
//! the current incident energy.

use crate::{CrossSectionModel, DiscretizedDistribution, KinematicsResolver, SamplingConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scatterkit_core::{
    ensure_above_threshold, BaseScatter, CalcType, CrossSection, Error, Result, SampledEvent,
    Species,
};
use std::f64::consts::FRAC_PI_2;

/// Inelastic scatter off one target species.
///
/// Holds the current incident energy (updated between collisions), the
/// selected cross-section model and its own random generator. Sampling
/// tables are rebuilt on every call from the current energy.
#[derive(Clone, Debug)]
pub struct ScatterModel<R = StdRng> {
    state: BaseScatter,
    model: CrossSectionModel,
    sampling: SamplingConfig,
    rng: R,
}

impl ScatterModel<StdRng> {
    /// Creates a model whose generator is seeded once from system entropy.
    #[must_use]
    pub fn new(calc_type: CalcType, species: Species, temperature: f64) -> Self {
        Self::with_rng(calc_type, species, temperature, StdRng::from_entropy())
    }

    /// Creates a model with a deterministically seeded generator.
    #[must_use]
    pub fn with_seed(calc_type: CalcType, species: Species, temperature: f64, seed: u64) -> Self {
        Self::with_rng(calc_type, species, temperature, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ScatterModel<R> {
    /// Creates a model drawing from a caller-supplied generator.
    pub fn with_rng(calc_type: CalcType, species: Species, temperature: f64, rng: R) -> Self {
        Self {
            state: BaseScatter::new(temperature),
            model: CrossSectionModel::new(calc_type, species),
            sampling: SamplingConfig::default(),
            rng,
        }
    }

    /// Replaces the sampling bin counts.
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Result<Self> {
        sampling.validate()?;
        self.sampling = sampling;
        Ok(self)
    }

    /// Sets the incident energy, rejecting values at or below the model
    /// threshold. The previous energy is kept on error.
    pub fn set_incident_energy(&mut self, energy: f64) -> Result<()> {
        ensure_above_threshold(energy, self.model.threshold())?;
        self.state.set_incident_energy(energy);
        Ok(())
    }

    /// Builder form of [`Self::set_incident_energy`].
    pub fn at_energy(mut self, energy: f64) -> Result<Self> {
        self.set_incident_energy(energy)?;
        Ok(self)
    }

    /// Current incident energy (eV).
    #[must_use]
    pub fn incident_energy(&self) -> f64 {
        self.state.incident_energy()
    }

    /// Ambient temperature (K).
    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.state.temperature()
    }

    /// Sets the ambient temperature (K).
    pub fn set_temperature(&mut self, temperature: f64) {
        self.state.set_temperature(temperature);
    }

    /// The selected cross-section model.
    #[must_use]
    pub fn model(&self) -> &CrossSectionModel {
        &self.model
    }

    /// Calculation type.
    #[must_use]
    pub fn calc_type(&self) -> CalcType {
        self.model.calc_type()
    }

    /// Target species.
    #[must_use]
    pub fn species(&self) -> Species {
        self.model.species()
    }

    /// Sampling bin counts.
    #[must_use]
    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    /// Mutable access to the generator.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Total cross-section at the current energy (m²).
    pub fn total_cross_section(&self) -> Result<f64> {
        self.model.total(self.incident_energy())
    }

    /// `dσ/dW` at the current energy (m²/eV).
    pub fn single_differential_cross_section(&self, energy_transfer: f64) -> Result<f64> {
        self.model
            .single_differential(self.incident_energy(), energy_transfer)
    }

    /// `d²σ/(dW dΩ)` at the current energy (m²/eV/sr).
    pub fn double_differential_cross_section(&self, energy_transfer: f64, theta: f64) -> Result<f64> {
        self.model
            .double_differential(self.incident_energy(), energy_transfer, theta)
    }

    /// Energy-transfer sampling domain `[(E - E_th)/2, W_max]`.
    ///
    /// The secondary is the slower of the two outgoing electrons, so only
    /// the upper half of the range is tabulated. `W_max` is `E - E_th`
    /// capped at [`KinematicsResolver::max_energy_transfer`], so every
    /// sampled `W` leaves a primary with positive energy and a real angle.
    pub fn energy_transfer_domain(&self) -> Result<(f64, f64)> {
        let threshold = self.model.threshold();
        let energy = self.incident_energy();
        ensure_above_threshold(energy, threshold)?;
        let lo = (energy - threshold) / 2.0;
        let hi = self
            .kinematics()
            .max_energy_transfer()
            .map_or(lo, |w| w.min(energy - threshold));
        if !(hi > lo) {
            log::warn!("no physical energy transfer above {lo} eV at E = {energy} eV");
            return Err(Error::NonPhysicalKinematics(format!(
                "no energy transfer in [{lo}, {}] eV leaves a physical primary at E = {energy} eV",
                energy - threshold
            )));
        }
        Ok((lo, hi))
    }

    /// Tabulates `dσ/dW` over the energy-transfer domain.
    pub fn energy_transfer_distribution(&self) -> Result<DiscretizedDistribution> {
        let (lo, hi) = self.energy_transfer_domain()?;
        DiscretizedDistribution::tabulate(lo, hi, self.sampling.energy_bins, |w| {
            self.single_differential_cross_section(w)
        })
    }

    /// Tabulates `d²σ/(dW dΩ)` over `θ ∈ [0, π/2]` at fixed `W`.
    pub fn angle_distribution(&self, energy_transfer: f64) -> Result<DiscretizedDistribution> {
        DiscretizedDistribution::tabulate(0.0, FRAC_PI_2, self.sampling.angle_bins, |theta| {
            self.double_differential_cross_section(energy_transfer, theta)
        })
    }

    /// Draws an energy transfer `W` (eV) at the current energy.
    pub fn sample_energy_transfer(&mut self) -> Result<f64> {
        let table = self.energy_transfer_distribution()?;
        Ok(table.sample(&mut self.rng))
    }

    /// Draws a secondary emission angle `θ` (rad) for energy transfer `W`.
    pub fn sample_angle(&mut self, energy_transfer: f64) -> Result<f64> {
        let table = self.angle_distribution(energy_transfer)?;
        Ok(table.sample(&mut self.rng))
    }

    /// Kinematics resolver at the current energy.
    #[must_use]
    pub fn kinematics(&self) -> KinematicsResolver {
        KinematicsResolver::new(self.incident_energy(), self.model.binding_energy())
    }

    /// Primary energy after transferring `W` (eV).
    #[must_use]
    pub fn scattered_primary_energy(&self, energy_transfer: f64) -> f64 {
        self.kinematics().scattered_primary_energy(energy_transfer)
    }

    /// Primary scattering angle after transferring `W` (rad).
    pub fn scattered_primary_angle(&self, energy_transfer: f64) -> Result<f64> {
        self.kinematics().scattered_primary_angle(energy_transfer)
    }

    /// Draws one complete collision at the current energy.
    pub fn sample_event(&mut self) -> Result<SampledEvent> {
        let energy_transfer = self.sample_energy_transfer()?;
        let emission_angle = self.sample_angle(energy_transfer)?;
        let resolver = self.kinematics();
        let primary_angle = resolver.scattered_primary_angle(energy_transfer)?;
        let event = SampledEvent::new(
            energy_transfer,
            emission_angle,
            resolver.scattered_primary_energy(energy_transfer),
            primary_angle,
        );
        log::trace!("sampled {event:?} at E = {} eV", self.incident_energy());
        Ok(event)
    }
}

impl<R: Rng + SeedableRng> ScatterModel<R> {
    /// Re-seeds the generator in place.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scatterkit_core::constants::RYDBERG_EV;

    fn fast_sampling() -> SamplingConfig {
        SamplingConfig::new().with_energy_bins(500).with_angle_bins(100)
    }

    #[test]
    fn test_unset_energy_is_rejected() {
        let model = ScatterModel::with_seed(CalcType::Rudd1991, Species::H, 300.0, 1);
        assert!(matches!(
            model.total_cross_section(),
            Err(Error::BelowThreshold { .. })
        ));
    }

    #[test]
    fn test_set_energy_below_threshold_keeps_previous() {
        let mut model = ScatterModel::with_seed(CalcType::Rudd1991, Species::H, 300.0, 1);
        model.set_incident_energy(100.0).unwrap();
        assert!(model.set_incident_energy(10.0).is_err());
        assert_relative_eq!(model.incident_energy(), 100.0);
    }

    #[test]
    fn test_domain() {
        let model = ScatterModel::with_seed(CalcType::Rudd1991, Species::H, 0.0, 1)
            .at_energy(100.0)
            .unwrap();
        let (lo, hi) = model.energy_transfer_domain().unwrap();
        assert_relative_eq!(lo, (100.0 - RYDBERG_EV) / 2.0);
        let closing = (100.0 - RYDBERG_EV + (100.0 * (100.0 - 2.0 * RYDBERG_EV)).sqrt()) / 2.0;
        assert_relative_eq!(hi, closing);
        assert!(hi < 100.0 - RYDBERG_EV);

        let kim = ScatterModel::with_seed(CalcType::Kim1994, Species::He, 0.0, 1)
            .at_energy(100.0)
            .unwrap();
        let (lo, hi) = kim.energy_transfer_domain().unwrap();
        assert_relative_eq!(lo, (100.0 - 24.59) / 2.0);
        assert!(hi < 100.0 - 24.59);
    }

    #[test]
    fn test_domain_respects_binding_energy() {
        // Rudd1991 thresholds at the Rydberg energy, but He binds harder.
        let model = ScatterModel::with_seed(CalcType::Rudd1991, Species::He, 0.0, 1)
            .at_energy(500.0)
            .unwrap();
        let (_, hi) = model.energy_transfer_domain().unwrap();
        assert!(hi < 500.0 - 24.59);
        assert!(model.scattered_primary_angle(hi * (1.0 - 1e-9)).is_ok());
    }

    #[test]
    fn test_empty_domain_is_non_physical() {
        let model = ScatterModel::with_seed(CalcType::Rudd1991, Species::He, 0.0, 1)
            .at_energy(45.0)
            .unwrap();
        assert!(matches!(
            model.energy_transfer_domain(),
            Err(Error::NonPhysicalKinematics(_))
        ));
    }

    #[test]
    fn test_samples_in_domain() {
        let mut model = ScatterModel::with_seed(CalcType::Rudd1991, Species::H, 0.0, 42)
            .with_sampling(fast_sampling())
            .unwrap()
            .at_energy(250.0)
            .unwrap();
        let (lo, hi) = model.energy_transfer_domain().unwrap();
        for _ in 0..200 {
            let w = model.sample_energy_transfer().unwrap();
            assert!(w >= lo && w <= hi);
            let theta = model.sample_angle(w).unwrap();
            assert!((0.0..=FRAC_PI_2).contains(&theta));
        }
    }

    #[test]
    fn test_same_seed_same_draws() {
        let build = || {
            ScatterModel::with_seed(CalcType::Kim1994, Species::H2, 0.0, 99)
                .with_sampling(fast_sampling())
                .unwrap()
                .at_energy(500.0)
                .unwrap()
        };
        let mut a = build();
        let mut b = build();
        for _ in 0..20 {
            assert_eq!(
                a.sample_energy_transfer().unwrap().to_bits(),
                b.sample_energy_transfer().unwrap().to_bits()
            );
        }

        a.reseed(5);
        b.reseed(5);
        assert_eq!(
            a.sample_energy_transfer().unwrap().to_bits(),
            b.sample_energy_transfer().unwrap().to_bits()
        );
    }

    #[test]
    fn test_kim_has_no_angular_sampling() {
        let mut model = ScatterModel::with_seed(CalcType::Kim1994, Species::He, 0.0, 3)
            .at_energy(200.0)
            .unwrap();
        assert!(matches!(
            model.sample_angle(50.0),
            Err(Error::UnsupportedModel { .. })
        ));
    }

    #[test]
    fn test_invalid_sampling_config() {
        let result = ScatterModel::with_seed(CalcType::Rudd1991, Species::H, 0.0, 3)
            .with_sampling(SamplingConfig::new().with_energy_bins(0));
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }
}
