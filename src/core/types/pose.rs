//! Pose and point types.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A 2D point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in pixels
    pub x: f32,
    /// Y coordinate in pixels
    pub y: f32,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Agent pose in the 2D raster world.
///
/// Position (x, y) in pixels and heading in radians. The heading is
/// deliberately NOT normalized to any range: turning accumulates, and every
/// trigonometric consumer works on unnormalized angles through `sin`/`cos`.
///
/// Particle hypotheses are replaced rather than mutated each filter tick;
/// only the live agent mutates its pose in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// X position in pixels
    pub x: f32,
    /// Y position in pixels
    pub y: f32,
    /// Heading in radians, unnormalized
    pub heading: f32,
}

impl Pose {
    /// Create a new pose.
    #[inline]
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self { x, y, heading }
    }

    /// Pose at the origin with zero heading.
    #[inline]
    pub fn origin() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            heading: 0.0,
        }
    }

    /// Generate a pose uniformly at random within the given bounds, with a
    /// uniformly random heading in [0, 2π).
    ///
    /// Positions land on whole pixels, matching how hypotheses are seeded
    /// over a raster map.
    pub fn random_in<R: Rng>(width: u32, height: u32, rng: &mut R) -> Self {
        let x = (rng.gen::<f32>() * width as f32).floor();
        let y = (rng.gen::<f32>() * height as f32).floor();
        let heading = rng.gen::<f32>() * 2.0 * std::f32::consts::PI;
        Self { x, y, heading }
    }

    /// Position component of the pose.
    #[inline]
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Endpoint of the heading indicator ray of the given length.
    ///
    /// Together with [`position`](Self::position) this is the drawable form
    /// of a pose: a dot plus a short ray showing where the agent faces.
    #[inline]
    pub fn heading_ray(&self, length: f32) -> Point2D {
        Point2D::new(
            self.x + self.heading.cos() * length,
            self.y + self.heading.sin() * length,
        )
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::origin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_point_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
        assert_relative_eq!(a.distance_squared(&b), 25.0);
    }

    #[test]
    fn test_pose_heading_not_normalized() {
        let p = Pose::new(0.0, 0.0, 5.0 * PI);
        assert_relative_eq!(p.heading, 5.0 * PI);
    }

    #[test]
    fn test_heading_ray_along_axes() {
        let east = Pose::new(10.0, 10.0, 0.0).heading_ray(5.0);
        assert_relative_eq!(east.x, 15.0);
        assert_relative_eq!(east.y, 10.0, epsilon = 1e-5);

        let down = Pose::new(10.0, 10.0, FRAC_PI_2).heading_ray(5.0);
        assert_relative_eq!(down.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(down.y, 15.0);
    }

    #[test]
    fn test_heading_ray_accepts_unnormalized_heading() {
        let a = Pose::new(0.0, 0.0, FRAC_PI_2).heading_ray(3.0);
        let b = Pose::new(0.0, 0.0, FRAC_PI_2 + 4.0 * PI).heading_ray(3.0);
        assert_relative_eq!(a.x, b.x, epsilon = 1e-4);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-4);
    }

    #[test]
    fn test_random_pose_within_bounds() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let p = Pose::random_in(640, 480, &mut rng);
            assert!(p.x >= 0.0 && p.x < 640.0);
            assert!(p.y >= 0.0 && p.y < 480.0);
            assert!(p.heading >= 0.0 && p.heading < 2.0 * PI);
            assert_eq!(p.x, p.x.floor());
            assert_eq!(p.y, p.y.floor());
        }
    }
}
