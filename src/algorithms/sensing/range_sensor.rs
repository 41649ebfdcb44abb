//! Simulated range sensor over a rasterized map.
//!
//! A sweep casts `resolution` equidistant rays starting at the pose's exact
//! heading, each walked pixel-by-pixel with the Bresenham traversal until it
//! hits an obstacle pixel or exhausts `max_distance`. Raw distances are then
//! independently perturbed by the multiplicative noise factor.
//!
//! The noise-free path ([`scan_exact`](RangeSensor::scan_exact)) is what the
//! particle filter queries from each hypothesized pose: the reading the
//! sensor *would* produce if the hypothesis were correct.

use rand::Rng;

use crate::algorithms::mapping::{trace_line, OccupancyMap};
use crate::core::math::noise_multiplier;
use crate::core::types::{Pose, RangeScan};

/// Configuration for the range sensor.
#[derive(Debug, Clone, Copy)]
pub struct RangeSensorConfig {
    /// Number of rays per sweep.
    pub resolution: usize,

    /// Range limit in pixels; also the "no obstacle found" sentinel.
    pub max_distance: f32,

    /// Total relative spread of the multiplicative reading noise.
    /// 0 disables noise entirely.
    pub noise_level: f32,
}

impl Default for RangeSensorConfig {
    fn default() -> Self {
        Self {
            resolution: 36,
            max_distance: 1000.0,
            noise_level: 0.05,
        }
    }
}

impl RangeSensorConfig {
    /// The same geometry with noise disabled.
    pub fn noise_free(self) -> Self {
        Self {
            noise_level: 0.0,
            ..self
        }
    }
}

/// Ray-casting range sensor.
#[derive(Debug, Clone)]
pub struct RangeSensor {
    config: RangeSensorConfig,
}

impl RangeSensor {
    /// Create a sensor with the given configuration.
    pub fn new(config: RangeSensorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &RangeSensorConfig {
        &self.config
    }

    /// Perform one noisy sweep from `pose`.
    ///
    /// Ray `i` is cast at `pose.heading + i * 2π / resolution`; each raw
    /// distance is scaled by an independent noise factor and clamped back
    /// into `(0, max_distance]` so the sentinel stays the sentinel.
    pub fn scan<R: Rng>(&self, map: &OccupancyMap, pose: &Pose, rng: &mut R) -> RangeScan {
        let mut scan = self.scan_exact(map, pose);
        if self.config.noise_level > 0.0 {
            for d in &mut scan.distances {
                *d = (*d * noise_multiplier(rng, self.config.noise_level))
                    .min(self.config.max_distance);
            }
        }
        scan
    }

    /// Perform one noise-free sweep from `pose`.
    ///
    /// Deterministic for a fixed map and pose. This is the expected-reading
    /// query the filter evaluates at hypothesized poses.
    pub fn scan_exact(&self, map: &OccupancyMap, pose: &Pose) -> RangeScan {
        let step = 2.0 * std::f32::consts::PI / self.config.resolution as f32;
        let distances = (0..self.config.resolution)
            .map(|i| self.cast_ray(map, pose, pose.heading + i as f32 * step))
            .collect();
        RangeScan::new(distances, self.config.max_distance)
    }

    /// Cast a single ray from `pose` along `angle`.
    ///
    /// Walks integer pixels from the pose's rounded position toward the
    /// point `max_distance` away along `angle`. The first obstacle pixel
    /// ends the walk and the return is the Euclidean distance from the
    /// pose's (unrounded) position to that pixel, near zero when the agent
    /// stands in or against a wall. Pixels outside the raster are skipped
    /// rather than tested, so a ray may start or leave out of bounds without
    /// harm. If no obstacle is found the return is `max_distance` exactly.
    pub fn cast_ray(&self, map: &OccupancyMap, pose: &Pose, angle: f32) -> f32 {
        let (sin_a, cos_a) = angle.sin_cos();
        let x0 = pose.x.round() as i32;
        let y0 = pose.y.round() as i32;
        let x1 = (pose.x + cos_a * self.config.max_distance).round() as i32;
        let y1 = (pose.y + sin_a * self.config.max_distance).round() as i32;

        let mut hit: Option<(i32, i32)> = None;
        trace_line(x0, y0, x1, y1, |x, y| {
            if map.contains(x, y) && map.is_obstacle(x as u32, y as u32) {
                hit = Some((x, y));
                return true;
            }
            false
        });

        match hit {
            Some((hx, hy)) => {
                let dx = hx as f32 - pose.x;
                let dy = hy as f32 - pose.y;
                (dx * dx + dy * dy).sqrt().min(self.config.max_distance)
            }
            None => self.config.max_distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::mapping::{LineSegment, World};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn empty_map(size: u32) -> OccupancyMap {
        OccupancyMap::from_world(&World::new(size, size))
    }

    fn sensor(resolution: usize, max_distance: f32, noise_level: f32) -> RangeSensor {
        RangeSensor::new(RangeSensorConfig {
            resolution,
            max_distance,
            noise_level,
        })
    }

    #[test]
    fn test_cast_ray_empty_map_returns_max_distance() {
        let map = empty_map(200);
        let s = sensor(1, 1000.0, 0.0);
        let pose = Pose::new(100.0, 100.0, 0.0);
        for i in 0..8 {
            let angle = i as f32 * std::f32::consts::FRAC_PI_4;
            assert_eq!(s.cast_ray(&map, &pose, angle), 1000.0);
        }
    }

    #[test]
    fn test_scan_empty_map_is_all_sentinels() {
        let map = empty_map(64);
        let s = sensor(4, 1000.0, 0.0);
        let scan = s.scan_exact(&map, &Pose::origin());
        assert_eq!(scan.distances, vec![1000.0; 4]);
    }

    #[test]
    fn test_cast_ray_hits_vertical_wall() {
        let mut world = World::new(200, 200);
        world.add_segment(LineSegment::new(50.0, 0.0, 50.0, 199.0));
        let map = OccupancyMap::from_world(&world);
        let s = sensor(1, 1000.0, 0.0);

        let scan = s.scan_exact(&map, &Pose::origin());
        assert_eq!(scan.distances.len(), 1);
        assert_relative_eq!(scan.distances[0], 50.0);
    }

    #[test]
    fn test_cast_ray_from_inside_wall_is_near_zero() {
        let mut world = World::new(100, 100);
        world.add_segment(LineSegment::new(10.0, 10.0, 10.0, 20.0));
        let map = OccupancyMap::from_world(&world);
        let s = sensor(1, 1000.0, 0.0);

        let d = s.cast_ray(&map, &Pose::new(10.0, 15.0, 0.0), 0.0);
        assert!(d < 1.0, "expected near-zero distance, got {}", d);
    }

    #[test]
    fn test_cast_ray_out_of_bounds_origin_is_guarded() {
        let mut world = World::new(100, 100);
        world.add_segment(LineSegment::new(50.0, 0.0, 50.0, 99.0));
        let map = OccupancyMap::from_world(&world);
        let s = sensor(1, 1000.0, 0.0);

        // Starts left of the raster, walking right: first obstacle is the wall.
        let d = s.cast_ray(&map, &Pose::new(-20.0, 50.0, 0.0), 0.0);
        assert_relative_eq!(d, 70.0);
    }

    #[test]
    fn test_scan_exact_is_deterministic() {
        let mut world = World::bordered(120, 120);
        world.add_segment(LineSegment::new(60.0, 20.0, 60.0, 100.0));
        let map = OccupancyMap::from_world(&world);
        let s = sensor(16, 500.0, 0.0);
        let pose = Pose::new(30.0, 60.0, 1.1);

        assert_eq!(s.scan_exact(&map, &pose), s.scan_exact(&map, &pose));
    }

    #[test]
    fn test_scan_ray_zero_is_along_heading() {
        // Wall to the east; heading east puts it on ray 0, heading north
        // (y-down raster, so -π/2) puts it on ray 1 of a 4-ray sweep only
        // after a 3-quarter turn of the fan.
        let mut world = World::new(200, 200);
        world.add_segment(LineSegment::new(150.0, 0.0, 150.0, 199.0));
        let map = OccupancyMap::from_world(&world);
        let s = sensor(4, 1000.0, 0.0);

        let east = s.scan_exact(&map, &Pose::new(100.0, 100.0, 0.0));
        assert_relative_eq!(east.distances[0], 50.0);

        let north = s.scan_exact(&map, &Pose::new(100.0, 100.0, -std::f32::consts::FRAC_PI_2));
        assert_eq!(north.distances[0], 1000.0);
        assert_relative_eq!(north.distances[1], 50.0);
    }

    #[test]
    fn test_noisy_scan_brackets_truth() {
        let mut world = World::new(200, 200);
        world.add_segment(LineSegment::new(150.0, 0.0, 150.0, 199.0));
        let map = OccupancyMap::from_world(&world);
        let s = sensor(8, 1000.0, 0.2);
        let pose = Pose::new(100.0, 100.0, 0.0);
        let mut rng = StdRng::seed_from_u64(11);

        let scan = s.scan(&map, &pose, &mut rng);
        assert!(scan.distances[0] >= 50.0 * 0.9);
        assert!(scan.distances[0] <= 50.0 * 1.1);
    }

    #[test]
    fn test_noisy_scan_clamps_to_sentinel() {
        let map = empty_map(64);
        let s = sensor(8, 1000.0, 0.5);
        let mut rng = StdRng::seed_from_u64(2);
        let scan = s.scan(&map, &Pose::origin(), &mut rng);
        for &d in &scan.distances {
            assert!(d <= 1000.0, "noise pushed a reading past the sentinel: {}", d);
        }
    }
}
