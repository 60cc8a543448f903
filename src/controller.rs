//! Slow-and-clear recovery controller.
//!
//! The public entry point of the crate. On each `trigger` it clears a square
//! region around the robot in both costmap frames, caps the planner's speed,
//! and starts a periodic distance check. Once the robot has moved far enough
//! a restoration worker puts the original caps back.
//!
//! Concurrency layout:
//! - `trigger` runs on the caller's thread,
//! - the distance check runs on the `distance-check` thread at 100 ms,
//! - restoration runs on a short-lived `remove-speed-limit` thread so a slow
//!   parameter update cannot stall the check loop.
//!
//! A single mutex around [`SpeedLimitState`] makes `trigger` and restoration
//! mutually exclusive; the restoration worker slot holds at most one handle
//! and joins the previous worker before spawning the next.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::RecoveryConfig;
use crate::gateway::{CostmapGateway, PlannerParams, SpeedCaps};
use crate::geometry::clearing_polygon;
use crate::limit::SpeedLimitState;
use crate::monitor::DistanceMonitor;

/// Period of the distance check while a limit is active.
const CHECK_PERIOD: Duration = Duration::from_millis(100);

/// Lock a mutex, absorbing poisoning.
///
/// The behavior must keep degrading gracefully rather than wedge the
/// navigation stack's recovery path behind a poisoned lock.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Everything shared between the caller, the distance-check thread, and the
/// restoration worker.
struct Inner {
    config: RecoveryConfig,
    global_map: Arc<dyn CostmapGateway>,
    local_map: Arc<dyn CostmapGateway>,
    planner: Arc<dyn PlannerParams>,
    state: Mutex<SpeedLimitState>,
    monitor: Mutex<DistanceMonitor>,
    restore_slot: Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    fn run_behavior(inner: &Arc<Inner>) {
        debug!("Running slow-and-clear recovery behavior");

        // The frames are maintained independently and may disagree on the pose
        let global_pose = inner.global_map.robot_pose();
        let local_pose = inner.local_map.robot_pose();

        inner
            .global_map
            .clear_region(&clearing_polygon(global_pose, inner.config.clearing_distance));
        inner
            .local_map
            .clear_region(&clearing_polygon(local_pose, inner.config.clearing_distance));

        {
            let mut state = lock(&inner.state);

            if !state.is_limited() {
                match inner.planner.speed_caps(&inner.config.planner_namespace) {
                    Ok(caps) => state.capture(caps),
                    Err(e) => error!(
                        "Planner {} did not report its speed caps: {}",
                        inner.config.planner_namespace, e
                    ),
                }
            }

            state.open(global_pose);

            let limited = SpeedCaps::new(
                inner.config.limited_trans_speed,
                inner.config.limited_rot_speed,
            );
            info!(
                "Limiting speed to trans={:.2} m/s, rot={:.2} rad/s until the robot moves {:.2} m",
                limited.trans, limited.rot, inner.config.limited_distance
            );
            if let Err(e) = inner
                .planner
                .set_speed_caps(&inner.config.planner_namespace, limited)
            {
                error!("Failed to apply reduced speed caps: {}", e);
            }
        }

        // A monitor that just fired its one-shot may still be winding down;
        // stop first so the new episode always gets a live check thread.
        let check_inner = Arc::clone(inner);
        let mut monitor = lock(&inner.monitor);
        monitor.stop();
        monitor.start(CHECK_PERIOD, move || Inner::distance_check(&check_inner));
    }

    /// One distance-check tick. Returns true once restoration was requested.
    fn distance_check(inner: &Arc<Inner>) -> bool {
        let pose = inner.global_map.robot_pose();
        let reference = lock(&inner.state).reference_pose();

        let sq_distance = pose.position().distance_squared(&reference.position());
        let threshold = inner.config.limited_distance * inner.config.limited_distance;
        if sq_distance < threshold {
            return false;
        }

        info!(
            "Moved {:.2} m since the limit was set, removing speed limit",
            sq_distance.sqrt()
        );
        Inner::request_restore(inner);
        true
    }

    /// Spawn the restoration worker, joining any previous one first.
    fn request_restore(inner: &Arc<Inner>) {
        let mut slot = lock(&inner.restore_slot);
        if let Some(previous) = slot.take() {
            let _ = previous.join();
        }

        let worker_inner = Arc::clone(inner);
        let spawned = thread::Builder::new()
            .name("remove-speed-limit".into())
            .spawn(move || worker_inner.remove_speed_limit());

        match spawned {
            Ok(handle) => *slot = Some(handle),
            Err(e) => {
                error!("Failed to spawn restoration thread, restoring inline: {}", e);
                inner.remove_speed_limit();
            }
        }
    }

    fn remove_speed_limit(&self) {
        let mut state = lock(&self.state);
        if !state.is_limited() {
            debug!("No active speed limit to remove");
            return;
        }

        match state.close() {
            Some(saved) => {
                match self
                    .planner
                    .set_speed_caps(&self.config.planner_namespace, saved)
                {
                    Ok(()) => info!(
                        "Restored speed caps to trans={:.2} m/s, rot={:.2} rad/s",
                        saved.trans, saved.rot
                    ),
                    Err(e) => error!("Failed to restore speed caps: {}", e),
                }
            }
            None => warn!("No saved speed caps to restore, clearing the limit only"),
        }
    }
}

/// Slow-and-clear recovery behavior.
///
/// Uninitialized until [`initialize`](SlowAndClear::initialize) binds the
/// configuration and the external gateways; a `trigger` before that is
/// refused with an error log, matching the plugin lifecycle of the
/// surrounding navigation stack.
pub struct SlowAndClear {
    inner: Option<Arc<Inner>>,
}

impl SlowAndClear {
    /// Create an uninitialized behavior.
    pub fn new() -> Self {
        Self { inner: None }
    }

    /// Bind configuration and gateway handles.
    ///
    /// # Arguments
    /// * `config` - Behavior parameters, immutable from here on
    /// * `global_map` - Gateway for the global costmap frame
    /// * `local_map` - Gateway for the local costmap frame
    /// * `planner` - Speed-cap parameter access for the configured namespace
    pub fn initialize(
        &mut self,
        config: RecoveryConfig,
        global_map: Arc<dyn CostmapGateway>,
        local_map: Arc<dyn CostmapGateway>,
        planner: Arc<dyn PlannerParams>,
    ) {
        self.inner = Some(Arc::new(Inner {
            config,
            global_map,
            local_map,
            planner,
            state: Mutex::new(SpeedLimitState::new()),
            monitor: Mutex::new(DistanceMonitor::new()),
            restore_slot: Mutex::new(None),
        }));
    }

    /// Whether `initialize` has been called.
    pub fn is_initialized(&self) -> bool {
        self.inner.is_some()
    }

    /// Whether a limiting episode is currently open.
    pub fn is_limited(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|inner| lock(&inner.state).is_limited())
    }

    /// Run the recovery behavior once.
    ///
    /// Clears both costmap regions, caps the planner's speed, and starts the
    /// distance check. Infallible from the caller's perspective: external
    /// failures are logged and the behavior degrades rather than aborting.
    pub fn trigger(&self) {
        let Some(inner) = &self.inner else {
            error!("This recovery behavior has not been initialized, doing nothing");
            return;
        };
        Inner::run_behavior(inner);
    }
}

impl Default for SlowAndClear {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SlowAndClear {
    fn drop(&mut self) {
        let Some(inner) = self.inner.take() else {
            return;
        };
        lock(&inner.monitor).stop();
        if let Some(worker) = lock(&inner.restore_slot).take() {
            let _ = worker.join();
        }
    }
}
