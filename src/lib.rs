//! mcl2d - Monte Carlo localization for a simulated agent on a 2D raster map
//!
//! # Architecture
//!
//! The crate is organized into 3 logical layers plus the driver binary:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                     main                            │  ← Headless driver
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   engine/                           │  ← Orchestration
//! │            (input, agent, simulation)               │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                 algorithms/                         │  ← Core algorithms
//! │         (mapping, sensing, localization)            │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    core/                            │  ← Foundation
//! │                 (types, math)                       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Operation
//!
//! Two cadences drive the system. Every *simulation step* the agent moves
//! under the held controls, accumulates noisy odometry, and takes a noisy
//! range scan. On the rarer *algorithmic tick* the particle filter advances
//! every hypothesis by the accumulated odometry, weights each by comparing
//! its noise-free expected scan against the agent's observed scan, resamples
//! proportionally, and the odometer resets.
//!
//! The world is a set of line segments rasterized into an RGBA buffer;
//! "obstacle" is purely a pixel-color signature of that raster, and the
//! sensor finds obstacles by walking Bresenham lines across it.

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;

// ============================================================================
// Layer 2: Algorithms (depends on core)
// ============================================================================
pub mod algorithms;

// ============================================================================
// Layer 3: Simulation engine (depends on core, algorithms)
// ============================================================================
pub mod engine;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

// Core types
pub use crate::core::math;
pub use crate::core::types::{Odometry, Point2D, Pose, RangeScan};

// Algorithms - Mapping
pub use algorithms::mapping::{LineSegment, OccupancyMap, PixelBuffer, World, OBSTACLE_COLOR};

// Algorithms - Sensing
pub use algorithms::sensing::{RangeSensor, RangeSensorConfig};

// Algorithms - Localization
pub use algorithms::localization::{
    ConfigError, FilterState, Particle, ParticleFilter, ParticleFilterConfig,
};

// Engine
pub use engine::{Agent, AgentConfig, InputState, Simulation, SimulationConfig};
