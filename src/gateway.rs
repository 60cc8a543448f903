//! Trait seams for the external services the recovery behavior drives.
//!
//! The behavior itself owns no costmap and no parameter store. It talks to
//! both through these narrow interfaces so the navigation stack can bind
//! whatever transport it uses (shared memory, RPC, a parameter service).

use crate::error::Result;
use crate::geometry::{Point2D, Pose2D};

/// Maximum planner velocities: translational (m/s) and rotational (rad/s).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedCaps {
    pub trans: f32,
    pub rot: f32,
}

impl SpeedCaps {
    /// Create a new cap pair
    #[inline]
    pub fn new(trans: f32, rot: f32) -> Self {
        Self { trans, rot }
    }
}

/// Access to one costmap frame: pose query and region clearing.
///
/// Two instances are bound at initialization, one for the global frame and
/// one for the local frame. The frames are maintained independently and may
/// report different poses for the same robot.
pub trait CostmapGateway: Send + Sync {
    /// Current robot pose in this costmap's frame.
    fn robot_pose(&self) -> Pose2D;

    /// Overwrite the cells inside `polygon` with free space.
    ///
    /// Best effort: there is no error channel, implementations log and
    /// swallow their own failures.
    fn clear_region(&self, polygon: &[Point2D]);
}

/// Access to the motion planner's speed-cap parameters, keyed by namespace.
pub trait PlannerParams: Send + Sync {
    /// Read the planner's current speed caps.
    fn speed_caps(&self, namespace: &str) -> Result<SpeedCaps>;

    /// Overwrite the planner's speed caps.
    fn set_speed_caps(&self, namespace: &str, caps: SpeedCaps) -> Result<()>;
}
