//! scatterkit-models: Cross-section models and Monte Carlo sampling.
//!
//! This crate provides:
//! - **Rudd1991** - empirical model with binary-encounter and soft-collision lobes
//! - **Kim1994** - binary-encounter-dipole model
//! - Piecewise-linear inverse-transform sampling of tabulated densities
//! - Final-state kinematics of the scattered primary
//! - [`ScatterModel`], the per-collision event generator
//!
#![warn(missing_docs)]

pub mod batch;
mod config;
mod error;
mod kim;
mod kinematics;
mod model;
mod rudd;
mod sampling;
mod scatter;

pub use batch::{generate_events, linspace, logspace, sweep_total_cross_section};
pub use config::ScatterConfig;
pub use error::{Error, Result};
pub use kim::Kim1994;
pub use kinematics::KinematicsResolver;
pub use model::CrossSectionModel;
pub use rudd::Rudd1991;
pub use sampling::{DiscretizedDistribution, SamplingConfig};
pub use scatter::ScatterModel;

// Re-export core types
pub use scatterkit_core::{CalcType, CrossSection, SampledEvent, Species};
