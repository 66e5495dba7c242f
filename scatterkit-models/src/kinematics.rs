//! Final-state kinematics of the scattered primary.
//!
//! Energy conservation `E = E1' + W + B` fixes the primary's residual
//! energy; the momentum triangle of (E, E1', W) fixes its angle.

use scatterkit_core::{Error, Result};

/// Resolves the scattered primary for a fixed incident energy and target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicsResolver {
    incident_energy: f64,
    binding_energy: f64,
}

impl KinematicsResolver {
    /// Creates a resolver for incident energy `E` and binding energy `B` (eV).
    #[must_use]
    pub fn new(incident_energy: f64, binding_energy: f64) -> Self {
        Self {
            incident_energy,
            binding_energy,
        }
    }

    /// Primary energy after transferring `W`: `E1' = E - W - B`.
    ///
    /// No validation: a non-positive result means `W` was outside the
    /// allowed range.
    #[inline]
    #[must_use]
    pub fn scattered_primary_energy(&self, energy_transfer: f64) -> f64 {
        self.incident_energy - energy_transfer - self.binding_energy
    }

    /// Largest energy transfer for which the momentum triangle closes,
    /// `(E - B + sqrt(E (E - 2B))) / 2`.
    ///
    /// Always below `E - B`, so `E1'` stays positive. `None` when
    /// `E ≤ 2B`, where no transfer gives `cosθ1 ≤ 1`.
    #[must_use]
    pub fn max_energy_transfer(&self) -> Option<f64> {
        let e = self.incident_energy;
        let b = self.binding_energy;
        let discriminant = e * (e - 2.0 * b);
        if discriminant > 0.0 {
            Some((e - b + discriminant.sqrt()) / 2.0)
        } else {
            None
        }
    }

    /// Primary scattering angle (rad) after transferring `W`.
    pub fn scattered_primary_angle(&self, energy_transfer: f64) -> Result<f64> {
        let e1 = self.incident_energy;
        let e1_prime = self.scattered_primary_energy(energy_transfer);
        if !(e1_prime > 0.0) {
            log::warn!("primary energy {e1_prime} eV after W = {energy_transfer} eV");
            return Err(Error::NonPhysicalKinematics(format!(
                "scattered primary energy {e1_prime} eV is not positive (E = {e1} eV, W = {energy_transfer} eV)"
            )));
        }

        let cos_theta = (e1 + e1_prime - energy_transfer) / (2.0 * (e1 * e1_prime).sqrt());
        if !(-1.0..=1.0).contains(&cos_theta) {
            log::warn!("cos(theta1) = {cos_theta} for E = {e1} eV, W = {energy_transfer} eV");
            return Err(Error::NonPhysicalKinematics(format!(
                "cos(theta1) = {cos_theta} outside [-1, 1] (E = {e1} eV, W = {energy_transfer} eV)"
            )));
        }
        Ok(cos_theta.acos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_energy_conservation() {
        let resolver = KinematicsResolver::new(100.0, 13.6057);
        for w in [43.2, 50.0, 70.5, 86.0] {
            let e1_prime = resolver.scattered_primary_energy(w);
            assert_relative_eq!(e1_prime + w + 13.6057, 100.0, max_relative = 1e-14);
        }
    }

    #[test]
    fn test_primary_angle() {
        let resolver = KinematicsResolver::new(100.0, 13.6057);
        let theta = resolver.scattered_primary_angle(60.0).unwrap();
        let e1_prime: f64 = 100.0 - 60.0 - 13.6057;
        let expected = ((100.0 + e1_prime - 60.0) / (2.0 * (100.0 * e1_prime).sqrt())).acos();
        assert_relative_eq!(theta, expected);
        assert!(theta > 0.0 && theta < std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_non_positive_energy_is_rejected() {
        let resolver = KinematicsResolver::new(100.0, 24.59);
        let err = resolver.scattered_primary_angle(80.0).unwrap_err();
        assert!(matches!(err, Error::NonPhysicalKinematics(_)));
    }

    #[test]
    fn test_max_energy_transfer_closes_triangle() {
        for (energy, binding) in [(100.0, 13.6057), (100.0, 24.59), (500.0, 15.43)] {
            let resolver = KinematicsResolver::new(energy, binding);
            let w_max = resolver.max_energy_transfer().unwrap();
            assert!(w_max < energy - binding);
            assert!(resolver.scattered_primary_angle(w_max * (1.0 - 1e-9)).is_ok());
            assert!(resolver.scattered_primary_angle(w_max + 1e-3).is_err());
        }
        assert!(KinematicsResolver::new(40.0, 24.59)
            .max_energy_transfer()
            .is_none());
    }

    #[test]
    fn test_cosine_out_of_range_is_rejected() {
        // E1' = 0.3945 eV leaves a triangle that cannot close.
        let resolver = KinematicsResolver::new(100.0, 13.6057);
        let err = resolver.scattered_primary_angle(86.0).unwrap_err();
        assert!(matches!(err, Error::NonPhysicalKinematics(_)));
    }
}
