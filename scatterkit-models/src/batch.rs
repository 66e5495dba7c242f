//! Parallel evaluation over incident-energy grids.
//!
//! Cross-section sweeps are pure and map directly onto `rayon`. Event
//! generation splits the energy list into chunks, each with its own
//! [`ScatterModel`] seeded from `seed + chunk_index`, so output does not
//! depend on thread scheduling.
#![allow(clippy::cast_precision_loss)]

use crate::{CrossSectionModel, ScatterConfig, ScatterModel};
use rayon::prelude::*;
use scatterkit_core::{CrossSection, Result, SampledEvent};

/// `n` evenly spaced values from `start` to `stop` inclusive.
#[must_use]
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// `n` geometrically spaced values from `start` to `stop` inclusive.
///
/// Both endpoints must be positive; otherwise the result is empty.
#[must_use]
pub fn logspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if !(start > 0.0 && stop > 0.0) {
        return Vec::new();
    }
    linspace(start.ln(), stop.ln(), n)
        .into_iter()
        .enumerate()
        .map(|(i, exponent)| match i {
            0 => start,
            _ if i == n - 1 => stop,
            _ => exponent.exp(),
        })
        .collect()
}

/// Total cross-section at every energy, evaluated in parallel.
///
/// Energies at or below the model threshold yield `BelowThreshold` in
/// their slot.
pub fn sweep_total_cross_section(model: &CrossSectionModel, energies: &[f64]) -> Vec<Result<f64>> {
    energies.par_iter().map(|&energy| model.total(energy)).collect()
}

/// Draws one event per incident energy.
///
/// Energies are grouped into chunks of `chunk_size`; chunk `k` draws from
/// its own generator seeded with `seed + k`. The same inputs give the same
/// events on any number of threads.
pub fn generate_events(
    config: &ScatterConfig,
    energies: &[f64],
    seed: u64,
    chunk_size: usize,
) -> Vec<Result<SampledEvent>> {
    let chunk_size = chunk_size.max(1);
    let chunks: Vec<Vec<Result<SampledEvent>>> = energies
        .par_chunks(chunk_size)
        .enumerate()
        .map(|(index, chunk)| {
            let chunk_seed = seed.wrapping_add(index as u64);
            let model = ScatterModel::with_seed(
                config.calc_type,
                config.species,
                config.temperature,
                chunk_seed,
            )
            .with_sampling(config.sampling);

            match model {
                Ok(mut model) => chunk
                    .iter()
                    .map(|&energy| {
                        model.set_incident_energy(energy)?;
                        model.sample_event()
                    })
                    .collect(),
                Err(e) => vec![Err(e); chunk.len()],
            }
        })
        .collect();

    let events: Vec<_> = chunks.into_iter().flatten().collect();
    log::debug!(
        "generated {} events in {} chunks",
        events.len(),
        energies.len().div_ceil(chunk_size)
    );
    events
}
