//! Static world geometry.

use serde::{Deserialize, Serialize};

use super::raster::PixelBuffer;
use crate::core::types::Point2D;

/// A wall segment between two points, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    /// First endpoint
    pub a: Point2D,
    /// Second endpoint
    pub b: Point2D,
}

impl LineSegment {
    /// Create a segment from endpoint coordinates.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            a: Point2D::new(x0, y0),
            b: Point2D::new(x1, y1),
        }
    }
}

/// The static world: a bounded rectangular area and its wall segments.
///
/// The segment list is what a renderer draws; the simulation itself only
/// ever sees the segments through their rasterization into an
/// [`OccupancyMap`](super::OccupancyMap).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    width: u32,
    height: u32,
    segments: Vec<LineSegment>,
}

impl World {
    /// Create an empty world of the given pixel dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            segments: Vec::new(),
        }
    }

    /// Create a world whose four edges are walls.
    pub fn bordered(width: u32, height: u32) -> Self {
        let w = (width - 1) as f32;
        let h = (height - 1) as f32;
        let mut world = Self::new(width, height);
        world.add_segment(LineSegment::new(0.0, 0.0, w, 0.0));
        world.add_segment(LineSegment::new(w, 0.0, w, h));
        world.add_segment(LineSegment::new(w, h, 0.0, h));
        world.add_segment(LineSegment::new(0.0, h, 0.0, 0.0));
        world
    }

    /// Add a wall segment.
    pub fn add_segment(&mut self, segment: LineSegment) {
        self.segments.push(segment);
    }

    /// World width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// World height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The wall segments, for rendering.
    #[inline]
    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    /// Rasterize every segment into a fresh pixel buffer.
    ///
    /// Segment endpoints are rounded to whole pixels; the stroke uses the
    /// obstacle color the occupancy classification matches on.
    pub fn rasterize(&self) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(self.width, self.height);
        for seg in &self.segments {
            buffer.stroke_segment(
                seg.a.x.round() as i32,
                seg.a.y.round() as i32,
                seg.b.x.round() as i32,
                seg.b.y.round() as i32,
            );
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::mapping::OBSTACLE_COLOR;

    #[test]
    fn test_empty_world_rasterizes_clear() {
        let buffer = World::new(8, 8).rasterize();
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(buffer.pixel(x, y), [0, 0, 0, 0]);
            }
        }
    }

    #[test]
    fn test_segment_rasterizes_to_obstacle_color() {
        let mut world = World::new(100, 100);
        world.add_segment(LineSegment::new(50.0, 0.0, 50.0, 99.0));
        let buffer = world.rasterize();
        for y in 0..100 {
            assert_eq!(buffer.pixel(50, y), OBSTACLE_COLOR);
        }
        assert_eq!(buffer.pixel(49, 50), [0, 0, 0, 0]);
    }

    #[test]
    fn test_bordered_world_walls() {
        let buffer = World::bordered(32, 32).rasterize();
        assert_eq!(buffer.pixel(0, 0), OBSTACLE_COLOR);
        assert_eq!(buffer.pixel(31, 0), OBSTACLE_COLOR);
        assert_eq!(buffer.pixel(0, 31), OBSTACLE_COLOR);
        assert_eq!(buffer.pixel(31, 31), OBSTACLE_COLOR);
        assert_eq!(buffer.pixel(16, 16), [0, 0, 0, 0]);
    }
}
