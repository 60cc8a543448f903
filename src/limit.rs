//! Speed-limit episode state.
//!
//! One instance lives behind the controller's mutex for the lifetime of the
//! behavior. The `saved` caps are `Some` only while an episode is open, so
//! "valid iff limited" is carried by the type instead of a flag convention.

use crate::gateway::SpeedCaps;
use crate::geometry::Pose2D;

/// The single shared mutable record of a limiting episode.
#[derive(Debug)]
pub struct SpeedLimitState {
    is_limited: bool,
    saved: Option<SpeedCaps>,
    reference_pose: Pose2D,
}

impl SpeedLimitState {
    /// Create the initial, unlimited state.
    pub fn new() -> Self {
        Self {
            is_limited: false,
            saved: None,
            reference_pose: Pose2D::identity(),
        }
    }

    /// Whether a limiting episode is currently open.
    #[inline]
    pub fn is_limited(&self) -> bool {
        self.is_limited
    }

    /// Baseline pose for the distance-traveled check.
    #[inline]
    pub fn reference_pose(&self) -> Pose2D {
        self.reference_pose
    }

    /// Record the pre-limit caps.
    ///
    /// Ignored while an episode is already open: a nested trigger must not
    /// overwrite the original caps with the already-reduced ones.
    pub fn capture(&mut self, caps: SpeedCaps) {
        if !self.is_limited {
            self.saved = Some(caps);
        }
    }

    /// Open (or re-open) an episode, refreshing the distance baseline.
    ///
    /// Refreshing on every trigger restarts the distance-traveled clock even
    /// when a limit is already in effect.
    pub fn open(&mut self, reference: Pose2D) {
        self.reference_pose = reference;
        self.is_limited = true;
    }

    /// Close the episode and hand back the caps to restore, if any.
    ///
    /// Returns `None` both when no episode is open and when the pre-limit
    /// caps could not be captured at trigger time.
    pub fn close(&mut self) -> Option<SpeedCaps> {
        if !self.is_limited {
            return None;
        }
        self.is_limited = false;
        self.saved.take()
    }
}

impl Default for SpeedLimitState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SpeedLimitState::new();
        assert!(!state.is_limited());
        assert_eq!(state.reference_pose(), Pose2D::identity());
    }

    #[test]
    fn test_capture_once_per_episode() {
        let mut state = SpeedLimitState::new();

        state.capture(SpeedCaps::new(1.0, 2.0));
        state.open(Pose2D::new(0.0, 0.0, 0.0));

        // A nested trigger would observe the reduced caps; they must not
        // replace the originals.
        state.capture(SpeedCaps::new(0.25, 0.45));
        state.open(Pose2D::new(0.1, 0.0, 0.0));

        assert_eq!(state.close(), Some(SpeedCaps::new(1.0, 2.0)));
    }

    #[test]
    fn test_open_refreshes_reference_pose() {
        let mut state = SpeedLimitState::new();
        state.open(Pose2D::new(1.0, 1.0, 0.0));
        state.open(Pose2D::new(2.0, 3.0, 0.5));
        assert_eq!(state.reference_pose(), Pose2D::new(2.0, 3.0, 0.5));
        assert!(state.is_limited());
    }

    #[test]
    fn test_close_clears_episode() {
        let mut state = SpeedLimitState::new();
        state.capture(SpeedCaps::new(0.8, 1.5));
        state.open(Pose2D::identity());

        assert_eq!(state.close(), Some(SpeedCaps::new(0.8, 1.5)));
        assert!(!state.is_limited());

        // Second close is a no-op and must not hand the caps out again.
        assert_eq!(state.close(), None);
    }

    #[test]
    fn test_close_without_episode_is_none() {
        let mut state = SpeedLimitState::new();
        assert_eq!(state.close(), None);
    }

    #[test]
    fn test_capture_allowed_again_after_close() {
        let mut state = SpeedLimitState::new();
        state.capture(SpeedCaps::new(1.0, 2.0));
        state.open(Pose2D::identity());
        state.close();

        state.capture(SpeedCaps::new(0.9, 1.8));
        state.open(Pose2D::identity());
        assert_eq!(state.close(), Some(SpeedCaps::new(0.9, 1.8)));
    }
}
