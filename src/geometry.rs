//! Pose and point types plus the clearing-polygon helper.
//!
//! Coordinate frame follows ROS REP-103: X-forward, Y-left, counter-clockwise
//! positive rotation. Positions are meters, angles radians.

use std::f32::consts::PI;

/// Normalize angle to [-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle;
    while a > PI {
        a -= 2.0 * PI;
    }
    while a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// World coordinates (meters, f32)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point2D {
    /// X coordinate in meters (forward in ROS convention)
    pub x: f32,
    /// Y coordinate in meters (left in ROS convention)
    pub y: f32,
}

impl Point2D {
    /// Create a new point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A 2D pose representing position and orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose2D {
    /// X position in meters.
    pub x: f32,
    /// Y position in meters.
    pub y: f32,
    /// Heading angle in radians [-π, π], CCW positive from X-axis.
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose.
    ///
    /// # Arguments
    /// * `x` - X position in meters
    /// * `y` - Y position in meters
    /// * `theta` - Heading angle in radians (will be normalized to [-π, π])
    #[inline]
    pub fn new(x: f32, y: f32, theta: f32) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Create an identity pose (origin, facing forward).
    #[inline]
    pub const fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }

    /// Get the position as a Point2D.
    #[inline]
    pub fn position(self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Corners of the axis-aligned square cleared around the robot.
///
/// The square has side `2 * clearing_distance` and is centered on the pose's
/// position. Corners are returned in the fixed order (−,−), (−,+), (+,+), (+,−)
/// so both costmap frames receive identically ordered polygons.
///
/// # Arguments
/// * `pose` - Center of the square (orientation is ignored)
/// * `clearing_distance` - Half-side length in meters
pub fn clearing_polygon(pose: Pose2D, clearing_distance: f32) -> [Point2D; 4] {
    let d = clearing_distance;
    [
        Point2D::new(pose.x - d, pose.y - d),
        Point2D::new(pose.x - d, pose.y + d),
        Point2D::new(pose.x + d, pose.y + d),
        Point2D::new(pose.x + d, pose.y - d),
    ]
}
