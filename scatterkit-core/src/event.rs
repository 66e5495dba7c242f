//! Scatter state and sampled event types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// State shared by every scatter type: the incident particle's kinetic
/// energy before the collision and the ambient gas temperature.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaseScatter {
    incident_energy: f64,
    temperature: f64,
}

impl BaseScatter {
    /// Creates a state at the given temperature (K) with no incident energy.
    #[must_use]
    pub fn new(temperature: f64) -> Self {
        Self {
            incident_energy: 0.0,
            temperature,
        }
    }

    /// Incident kinetic energy (eV).
    #[inline]
    #[must_use]
    pub fn incident_energy(&self) -> f64 {
        self.incident_energy
    }

    /// Sets the incident kinetic energy (eV).
    #[inline]
    pub fn set_incident_energy(&mut self, energy: f64) {
        self.incident_energy = energy;
    }

    /// Ambient temperature (K).
    #[inline]
    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Sets the ambient temperature (K).
    #[inline]
    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature;
    }
}

/// Outcome of one sampled inelastic collision.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampledEvent {
    /// Energy transferred to the secondary `W` (eV).
    pub energy_transfer: f64,
    /// Secondary emission angle `θ` (rad).
    pub emission_angle: f64,
    /// Primary energy after the collision `E1'` (eV).
    pub primary_energy: f64,
    /// Primary scattering angle `θ1'` (rad).
    pub primary_angle: f64,
}

impl SampledEvent {
    /// Creates a new sampled event.
    #[must_use]
    pub fn new(
        energy_transfer: f64,
        emission_angle: f64,
        primary_energy: f64,
        primary_angle: f64,
    ) -> Self {
        Self {
            energy_transfer,
            emission_angle,
            primary_energy,
            primary_angle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_scatter() {
        let mut state = BaseScatter::new(300.0);
        assert!(state.incident_energy().abs() < f64::EPSILON);
        assert!((state.temperature() - 300.0).abs() < f64::EPSILON);

        state.set_incident_energy(1000.0);
        state.set_temperature(4.2);
        assert!((state.incident_energy() - 1000.0).abs() < f64::EPSILON);
        assert!((state.temperature() - 4.2).abs() < f64::EPSILON);
    }
}
