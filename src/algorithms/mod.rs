//! Core algorithms layer.
//!
//! - [`mapping`]: Static world geometry, rasterization, obstacle lookup
//! - [`sensing`]: Simulated range sensor over a rasterized map
//! - [`localization`]: Monte Carlo localization (particle filter)

pub mod localization;
pub mod mapping;
pub mod sensing;
