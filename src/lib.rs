//! DhruvaRecovery - Slow-and-clear recovery behavior
//!
//! A motion-safety supervisor invoked when the navigation stack decides the
//! robot is stuck. Each trigger clears a square region around the robot in
//! both the global and local costmaps, so planners stop treating possibly
//! stale obstacles as blocking, and caps the planner's translational and
//! rotational speed until the robot has physically moved a minimum distance.
//! Once it has, the original caps are restored.
//!
//! ## Threads
//!
//! - **Caller thread**: runs [`SlowAndClear::trigger`] synchronously
//! - **Distance-check thread** (100 ms): compares the robot's squared
//!   distance from the trigger pose against the configured threshold
//! - **Restoration thread**: short-lived worker that puts the original caps
//!   back, kept separate so a slow parameter update cannot stall the check
//!
//! External services (costmaps, planner parameter store) are consumed
//! through the traits in [`gateway`]; the crate owns no transport.

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod geometry;
pub mod limit;
pub mod monitor;

pub use config::RecoveryConfig;
pub use controller::SlowAndClear;
pub use error::{RecoveryError, Result};
pub use gateway::{CostmapGateway, PlannerParams, SpeedCaps};
pub use geometry::{Point2D, Pose2D, clearing_polygon};
pub use limit::SpeedLimitState;
pub use monitor::DistanceMonitor;
