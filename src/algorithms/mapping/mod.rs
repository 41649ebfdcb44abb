//! Mapping module.
//!
//! The world is described by static line segments, rasterized once into an
//! RGBA pixel buffer. Obstacle-ness is a property of the raster alone: a
//! pixel is an obstacle iff its color matches the signature the rasterizer
//! strokes obstacles with. There is no obstacle entity independent of the
//! raster.
//!
//! # Components
//!
//! - [`World`]: Bounded area plus its line-segment geometry
//! - [`PixelBuffer`]: RGBA raster with Bresenham segment stroking
//! - [`OccupancyMap`]: Read-only per-pixel obstacle classification

mod occupancy;
mod raster;
mod world;

pub use occupancy::OccupancyMap;
pub use raster::{trace_line, PixelBuffer, OBSTACLE_COLOR};
pub use world::{LineSegment, World};
