//! Scatter model configuration and its JSON form.

use crate::{Result, SamplingConfig, ScatterModel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scatterkit_core::{CalcType, Species};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Everything needed to build a [`ScatterModel`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterConfig {
    /// Cross-section family.
    pub calc_type: CalcType,
    /// Target species.
    pub species: Species,
    /// Ambient temperature (K).
    pub temperature: f64,
    /// Sampling table sizes.
    pub sampling: SamplingConfig,
    /// Generator seed; `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            calc_type: CalcType::Rudd1991,
            species: Species::H,
            temperature: 0.0,
            sampling: SamplingConfig::default(),
            seed: None,
        }
    }
}

// Intermediate structs for the on-disk schema. Model names stay strings
// here so unknown names surface as `UnsupportedModel`, not a JSON error.
#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonConfig {
    model: JsonModel,
    sampling: JsonSampling,
}

#[derive(Deserialize)]
#[serde(default)]
struct JsonModel {
    calc_type: String,
    species: String,
    temperature: f64,
}

impl Default for JsonModel {
    fn default() -> Self {
        Self {
            calc_type: CalcType::Rudd1991.to_string(),
            species: Species::H.to_string(),
            temperature: 0.0,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonSampling {
    #[serde(flatten)]
    bins: SamplingConfig,
    seed: Option<u64>,
}

impl ScatterConfig {
    /// Creates a configuration for a model and species with defaults
    /// elsewhere.
    #[must_use]
    pub fn new(calc_type: CalcType, species: Species) -> Self {
        Self {
            calc_type,
            species,
            ..Self::default()
        }
    }

    /// Sets the temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the sampling table sizes.
    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sets the generator seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let json_config: JsonConfig = serde_json::from_reader(reader)?;
        Self::from_json_config(json_config)
    }

    /// Load configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let json_config: JsonConfig = serde_json::from_str(json)?;
        Self::from_json_config(json_config)
    }

    fn from_json_config(config: JsonConfig) -> Result<Self> {
        let calc_type: CalcType = config.model.calc_type.parse()?;
        let species: Species = config.model.species.parse()?;
        config.sampling.bins.validate()?;

        Ok(Self {
            calc_type,
            species,
            temperature: config.model.temperature,
            sampling: config.sampling.bins,
            seed: config.sampling.seed,
        })
    }

    /// The configured seed, or a fresh one drawn from system entropy.
    #[must_use]
    pub fn seed_or_entropy(&self) -> u64 {
        self.seed.unwrap_or_else(|| StdRng::from_entropy().gen())
    }

    /// Builds a model at incident energy `energy` (eV).
    pub fn build(&self, energy: f64) -> Result<ScatterModel<StdRng>> {
        let model = match self.seed {
            Some(seed) => {
                ScatterModel::with_seed(self.calc_type, self.species, self.temperature, seed)
            }
            None => ScatterModel::new(self.calc_type, self.species, self.temperature),
        };
        Ok(model.with_sampling(self.sampling)?.at_energy(energy)?)
    }
}
