//! Monte Carlo localization.
//!
//! Estimates the agent's pose by maintaining a fixed-size set of weighted
//! pose hypotheses and cycling them through prediction, sensor weighting,
//! and resampling on every algorithmic tick.
//!
//! # Components
//!
//! - [`motion_model`]: Pure odometry prediction applied to every hypothesis
//! - [`sampling`]: Weight normalization and roulette-wheel index sampling
//! - [`ParticleFilter`]: The full predict / weight / resample cycle
//!
//! # Example
//!
//! ```ignore
//! use mcl2d::localization::{ParticleFilter, ParticleFilterConfig};
//!
//! let mut filter = ParticleFilter::new(config, sensor_config, &map);
//!
//! // On each algorithmic tick:
//! filter.tick(&agent.odometry(), &observation, &map);
//! let estimate = filter.estimate();
//! ```

pub mod motion_model;
pub mod sampling;

mod particle_filter;

pub use particle_filter::{
    ConfigError, FilterState, Particle, ParticleFilter, ParticleFilterConfig,
};
