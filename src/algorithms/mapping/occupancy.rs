//! Occupancy classification over a rasterized map.

use super::raster::PixelBuffer;

/// Channel thresholds for the obstacle signature. A pixel is an obstacle
/// iff red is at least `RED_MIN` and green and blue are both at most
/// `CHANNEL_MAX`: the high-red/low-green/low-blue signature left by
/// stroking walls in pure red.
const RED_MIN: u8 = 200;
const CHANNEL_MAX: u8 = 50;

/// Read-only obstacle lookup over a rasterized world.
///
/// Constructed once from the pixel buffer a rendering context produced (or
/// [`World::rasterize`](super::World::rasterize) in headless use) and never
/// mutated afterwards. The color-signature test is the *only* notion of
/// "obstacle" in the system.
#[derive(Debug, Clone)]
pub struct OccupancyMap {
    buffer: PixelBuffer,
}

impl OccupancyMap {
    /// Take ownership of a rasterized buffer.
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self { buffer }
    }

    /// Rasterize a world and wrap the result.
    pub fn from_world(world: &super::World) -> Self {
        Self::from_buffer(world.rasterize())
    }

    /// Map width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Map height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Whether the pixel coordinate lies inside the raster.
    ///
    /// Callers must clip with this before [`is_obstacle`](Self::is_obstacle);
    /// the lookup itself does not tolerate out-of-bounds coordinates.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.buffer.contains(x, y)
    }

    /// Whether the in-bounds pixel is an obstacle.
    ///
    /// Precondition: `(x, y)` lies inside the raster.
    #[inline]
    pub fn is_obstacle(&self, x: u32, y: u32) -> bool {
        let [r, g, b, _] = self.buffer.pixel(x, y);
        r >= RED_MIN && g <= CHANNEL_MAX && b <= CHANNEL_MAX
    }
}
