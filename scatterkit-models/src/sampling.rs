//! Piecewise-linear inverse-transform sampling over tabulated densities.
//!
//! A density is evaluated at the midpoints of equal-width bins across a
//! domain `[lo, hi]`. The weights define a piecewise-linear density between
//! consecutive points (not a step histogram); a uniform variate is mapped
//! through the inverse of its cumulative integral.
#![allow(clippy::cast_precision_loss)]

use rand::Rng;
use scatterkit_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Bin counts for the sampling tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Bins across the energy-transfer domain.
    pub energy_bins: usize,
    /// Bins across the emission-angle domain.
    pub angle_bins: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            energy_bins: 5000,
            angle_bins: 400,
        }
    }
}

impl SamplingConfig {
    /// Creates a configuration with the reference bin counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the energy-transfer bin count.
    #[must_use]
    pub fn with_energy_bins(mut self, bins: usize) -> Self {
        self.energy_bins = bins;
        self
    }

    /// Sets the emission-angle bin count.
    #[must_use]
    pub fn with_angle_bins(mut self, bins: usize) -> Self {
        self.angle_bins = bins;
        self
    }

    /// Checks that both tables have at least one linear segment.
    pub fn validate(&self) -> Result<()> {
        if self.energy_bins < 2 || self.angle_bins < 2 {
            return Err(Error::ConfigError(format!(
                "sampling needs at least 2 bins, got energy={} angle={}",
                self.energy_bins, self.angle_bins
            )));
        }
        Ok(())
    }
}

/// A density tabulated at ordered points, with its running integral.
#[derive(Clone, Debug)]
pub struct DiscretizedDistribution {
    x: Vec<f64>,
    w: Vec<f64>,
    cumulative: Vec<f64>,
}

impl DiscretizedDistribution {
    /// Evaluates `density` at the midpoints of `bins` equal-width bins over
    /// `[lo, hi]`.
    pub fn tabulate<F>(lo: f64, hi: f64, bins: usize, mut density: F) -> Result<Self>
    where
        F: FnMut(f64) -> Result<f64>,
    {
        if bins < 2 {
            return Err(Error::ConfigError(format!(
                "sampling needs at least 2 bins, got {bins}"
            )));
        }
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(Error::ConfigError(format!(
                "empty sampling domain [{lo}, {hi}]"
            )));
        }

        let width = (hi - lo) / bins as f64;
        let mut x = Vec::with_capacity(bins);
        let mut w = Vec::with_capacity(bins);
        for i in 0..bins {
            let point = lo + width / 2.0 + i as f64 * width;
            x.push(point);
            w.push(density(point)?);
        }
        log::debug!("tabulated {bins} bins over [{lo}, {hi}]");
        Self::from_points(x, w)
    }

    /// Builds the distribution from explicit points and weights.
    ///
    /// Points must be strictly increasing; weights must be finite and
    /// non-negative with positive total mass.
    pub fn from_points(x: Vec<f64>, w: Vec<f64>) -> Result<Self> {
        if x.len() != w.len() || x.len() < 2 {
            return Err(Error::ConfigError(format!(
                "need at least 2 points with matching weights, got {} points and {} weights",
                x.len(),
                w.len()
            )));
        }
        if let Some(pair) = x.windows(2).find(|pair| !(pair[0] < pair[1])) {
            return Err(Error::ConfigError(format!(
                "points are not strictly increasing at {} -> {}",
                pair[0], pair[1]
            )));
        }
        if let Some((i, weight)) = w
            .iter()
            .enumerate()
            .find(|(_, weight)| !(weight.is_finite() && **weight >= 0.0))
        {
            log::warn!("invalid weight {weight} at x = {}", x[i]);
            return Err(Error::DegenerateDistribution(format!(
                "weight {weight} at x = {} is negative or not finite",
                x[i]
            )));
        }

        let mut cumulative = Vec::with_capacity(x.len());
        let mut area = 0.0;
        cumulative.push(area);
        for k in 0..x.len() - 1 {
            area += 0.5 * (w[k] + w[k + 1]) * (x[k + 1] - x[k]);
            cumulative.push(area);
        }
        if !(area.is_finite() && area > 0.0) {
            log::warn!("table over [{}, {}] has no probability mass", x[0], x[x.len() - 1]);
            return Err(Error::DegenerateDistribution(format!(
                "total probability mass {area} is not positive"
            )));
        }

        Ok(Self { x, w, cumulative })
    }

    /// Tabulated points.
    #[must_use]
    pub fn points(&self) -> &[f64] {
        &self.x
    }

    /// Tabulated weights.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.w
    }

    /// Total integral of the piecewise-linear density.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.cumulative[self.cumulative.len() - 1]
    }

    /// Support `[x_0, x_{n-1}]` of the density.
    #[must_use]
    pub fn support(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Normalised cumulative distribution at `value`. NaN maps to NaN.
    #[must_use]
    pub fn cdf(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        let (lo, hi) = self.support();
        if value <= lo {
            return 0.0;
        }
        if value >= hi {
            return 1.0;
        }
        let k = self.x.partition_point(|&p| p <= value) - 1;
        let s = value - self.x[k];
        let slope = (self.w[k + 1] - self.w[k]) / (self.x[k + 1] - self.x[k]);
        let partial = self.w[k] * s + 0.5 * slope * s * s;
        (self.cumulative[k] + partial) / self.total_mass()
    }

    /// Draws one variate.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let target = rng.gen::<f64>() * self.total_mass();
        let last_segment = self.x.len() - 2;
        let k = (self.cumulative.partition_point(|&c| c <= target) - 1).min(last_segment);

        let x0 = self.x[k];
        let width = self.x[k + 1] - x0;
        let w0 = self.w[k];
        let slope = (self.w[k + 1] - w0) / width;
        let area = target - self.cumulative[k];

        // Root of w0·s + slope·s²/2 = area, in the form without cancellation.
        let discriminant = (w0 * w0 + 2.0 * slope * area).max(0.0);
        let denom = w0 + discriminant.sqrt();
        let offset = if denom > 0.0 { 2.0 * area / denom } else { 0.0 };

        x0 + offset.clamp(0.0, width)
    }
}
