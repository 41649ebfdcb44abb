//! Mathematical primitives for pose estimation.
//!
//! Gaussian densities for sensor-likelihood evaluation and the shared
//! multiplicative noise formula used by both the range sensor and the
//! odometry accumulator.

use rand::Rng;

/// Gaussian probability density of `x` under a zero-mean normal
/// distribution with standard deviation `sigma`.
///
/// # Example
/// ```
/// use mcl2d::core::math::gaussian;
///
/// let peak = gaussian(0.0, 1.0);
/// assert!(gaussian(1.0, 1.0) < peak);
/// ```
#[inline]
pub fn gaussian(x: f32, sigma: f32) -> f32 {
    let norm = 1.0 / (sigma * (2.0 * std::f32::consts::PI).sqrt());
    norm * (-0.5 * (x * x) / (sigma * sigma)).exp()
}

/// Log of [`gaussian`], safe for accumulating many rays without underflow.
///
/// A degenerate `sigma` collapses to a point mass: log(1) for `x == 0`,
/// negative infinity otherwise.
#[inline]
pub fn log_gaussian(x: f32, sigma: f32) -> f32 {
    let variance = sigma * sigma;
    if variance < 1e-10 {
        if x.abs() < 1e-10 {
            return 0.0;
        }
        return f32::NEG_INFINITY;
    }
    -0.5 * (x * x / variance + (2.0 * std::f32::consts::PI * variance).ln())
}

/// Multiplicative measurement-noise factor.
///
/// Draws `u ~ U(0, 1)` and returns `u * noise_level + (1 - noise_level / 2)`,
/// a factor centered on 1 with total spread `noise_level`. A `noise_level`
/// of 0 returns exactly 1, so noise-free paths reproduce ground truth
/// bit-for-bit.
#[inline]
pub fn noise_multiplier<R: Rng>(rng: &mut R, noise_level: f32) -> f32 {
    rng.gen::<f32>() * noise_level + (1.0 - noise_level / 2.0)
}
