//! Odometry motion model.
//!
//! Prediction is a pure additive transform: the accumulated odometry delta
//! is applied verbatim to a pose. No noise is sampled here. The delta was
//! already perturbed once, when the agent recorded it, and every particle
//! receives the identical accumulated control input.

use crate::core::types::{Odometry, Pose};

/// Advance `pose` by the accumulated odometry delta.
///
/// Returns a new pose; particle poses are replaced, never mutated in place.
#[inline]
pub fn predict(pose: &Pose, odometry: &Odometry) -> Pose {
    Pose::new(
        pose.x + odometry.dx,
        pose.y + odometry.dy,
        pose.heading + odometry.dheading,
    )
}
