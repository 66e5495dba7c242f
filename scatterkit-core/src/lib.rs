//! scatterkit-core: Core traits and types for inelastic scattering.
//!
//! This crate provides the foundational abstractions shared by every
//! cross-section model: target species constants, the model selector,
//! the scatter state, sampled events, and the cross-section capability.
//!

pub mod constants;
pub mod cross_section;
pub mod error;
pub mod event;
pub mod species;

pub use cross_section::{ensure_above_threshold, CalcType, CrossSection};
pub use error::{Error, Result};
pub use event::{BaseScatter, SampledEvent};
pub use species::{OscillatorCoefficients, Species, SpeciesParams};
