//! Model selection: one tagged variant per cross-section family.

use crate::{Kim1994, Rudd1991};
use scatterkit_core::{CalcType, CrossSection, Result, Species};

/// A cross-section model chosen once at construction.
#[derive(Clone, Debug)]
pub enum CrossSectionModel {
    /// Semi-empirical model with angular resolution.
    Rudd1991(Rudd1991),
    /// Binary-encounter-dipole model, energy transfer only.
    Kim1994(Kim1994),
}

impl CrossSectionModel {
    /// Builds the model for a calculation type and target species.
    #[must_use]
    pub fn new(calc_type: CalcType, species: Species) -> Self {
        match calc_type {
            CalcType::Rudd1991 => Self::Rudd1991(Rudd1991::new(species)),
            CalcType::Kim1994 => Self::Kim1994(Kim1994::new(species)),
        }
    }

    /// Builds the model from names, e.g. `("Kim1994", "He")`.
    pub fn from_names(calc_type: &str, species: &str) -> Result<Self> {
        Ok(Self::new(calc_type.parse()?, species.parse()?))
    }

    /// Target species.
    #[must_use]
    pub fn species(&self) -> Species {
        match self {
            Self::Rudd1991(model) => model.species(),
            Self::Kim1994(model) => model.species(),
        }
    }

    /// Binding energy of the target species (eV).
    #[must_use]
    pub fn binding_energy(&self) -> f64 {
        self.species().params().binding_energy
    }

    fn inner(&self) -> &dyn CrossSection {
        match self {
            Self::Rudd1991(model) => model,
            Self::Kim1994(model) => model,
        }
    }
}

impl CrossSection for CrossSectionModel {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn calc_type(&self) -> CalcType {
        self.inner().calc_type()
    }

    fn threshold(&self) -> f64 {
        self.inner().threshold()
    }

    fn total(&self, incident_energy: f64) -> Result<f64> {
        self.inner().total(incident_energy)
    }

    fn single_differential(&self, incident_energy: f64, energy_transfer: f64) -> Result<f64> {
        self.inner()
            .single_differential(incident_energy, energy_transfer)
    }

    fn double_differential(
        &self,
        incident_energy: f64,
        energy_transfer: f64,
        theta: f64,
    ) -> Result<f64> {
        self.inner()
            .double_differential(incident_energy, energy_transfer, theta)
    }
}
