//! Core data types for localization.
//!
//! - [`Point2D`]: 2D point in pixels
//! - [`Pose`]: Agent pose (x, y, heading) in pixels and radians
//! - [`Odometry`]: Accumulated motion delta since the last filter tick
//! - [`RangeScan`]: One distance reading per sensor ray

mod odometry;
mod pose;
mod scan;

pub use odometry::Odometry;
pub use pose::{Point2D, Pose};
pub use scan::RangeScan;
