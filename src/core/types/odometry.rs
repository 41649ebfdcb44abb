//! Odometry accumulator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::math::noise_multiplier;

/// Accumulated motion delta since the last filter tick.
///
/// The agent records every frame's displacement here, each component
/// independently perturbed by the multiplicative noise formula at record
/// time. Noise enters exactly once, on the recording side; the filter later
/// applies the identical accumulated delta to every particle.
///
/// [`reset`](Self::reset) is the only way the deltas return to zero. A
/// caller that forgets to reset after a tick applies an ever-growing jump on
/// the next prediction; that is a caller error, not handled here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Odometry {
    /// Accumulated X displacement in pixels
    pub dx: f32,
    /// Accumulated Y displacement in pixels
    pub dy: f32,
    /// Accumulated heading change in radians
    pub dheading: f32,
}

impl Odometry {
    /// A zeroed accumulator.
    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Record one frame's displacement.
    ///
    /// Each component is scaled by an independent draw of the multiplicative
    /// noise factor before accumulating. `noise_level = 0` accumulates the
    /// displacement exactly.
    pub fn record<R: Rng>(
        &mut self,
        dx: f32,
        dy: f32,
        dheading: f32,
        noise_level: f32,
        rng: &mut R,
    ) {
        self.dx += dx * noise_multiplier(rng, noise_level);
        self.dy += dy * noise_multiplier(rng, noise_level);
        self.dheading += dheading * noise_multiplier(rng, noise_level);
    }

    /// Zero the accumulator. Called exactly once per filter tick, after the
    /// filter has consumed the delta.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
