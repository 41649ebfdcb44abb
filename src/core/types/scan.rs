//! Range scan type.

use serde::{Deserialize, Serialize};

/// One full sweep of the range sensor.
///
/// Readings are ordered: index 0 was cast along the reference pose's exact
/// heading, and each subsequent index advances the cast angle by
/// `2π / resolution` (clockwise in raster coordinates, where Y grows
/// downward). Every reading lies in `(0, max_distance]`; a reading of
/// exactly `max_distance` is the sentinel for "no obstacle found", not a
/// measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeScan {
    /// Distance readings in pixels, one per ray.
    pub distances: Vec<f32>,
    /// Sensor range limit; doubles as the no-obstacle sentinel.
    pub max_distance: f32,
}

impl RangeScan {
    /// Create a scan from raw readings.
    pub fn new(distances: Vec<f32>, max_distance: f32) -> Self {
        Self {
            distances,
            max_distance,
        }
    }

    /// Number of rays in the sweep.
    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Whether the sweep holds no readings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Angular spacing between consecutive rays.
    #[inline]
    pub fn angle_step(&self) -> f32 {
        2.0 * std::f32::consts::PI / self.distances.len() as f32
    }

    /// World-frame angle of ray `index` for a sweep taken at `heading`.
    #[inline]
    pub fn angle_of(&self, heading: f32, index: usize) -> f32 {
        heading + index as f32 * self.angle_step()
    }

    /// Whether reading `index` is the no-obstacle sentinel.
    #[inline]
    pub fn is_max(&self, index: usize) -> bool {
        self.distances[index] >= self.max_distance
    }
}
