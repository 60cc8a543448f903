//! Cancellable periodic task used for the distance-traveled check.
//!
//! Runs the check on its own named OS thread at a fixed period, like the
//! other long-running loops in the navigation stack. The owner stops it
//! either through the stop token or by the check itself reporting it is
//! done (one-shot firing).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Periodic task handle with a stop token.
///
/// At most one thread runs per monitor. `start` on a running monitor is a
/// no-op; a finished thread is reclaimed before the slot is reused.
#[derive(Debug)]
pub struct DistanceMonitor {
    cancel: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl DistanceMonitor {
    /// Create a stopped monitor.
    pub fn new() -> Self {
        Self {
            cancel: Arc::new(AtomicBool::new(false)),
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Whether the periodic thread is currently active.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Start the periodic check if not already running.
    ///
    /// `check` runs once per `period`; returning `true` stops the monitor.
    pub fn start<F>(&mut self, period: Duration, mut check: F)
    where
        F: FnMut() -> bool + Send + 'static,
    {
        if self.is_running() {
            return;
        }

        // Reclaim a finished thread before reusing the slot
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }

        self.cancel.store(false, Ordering::Release);
        self.running.store(true, Ordering::Release);

        let cancel = Arc::clone(&self.cancel);
        let running = Arc::clone(&self.running);

        let spawned = thread::Builder::new()
            .name("distance-check".into())
            .spawn(move || {
                while !cancel.load(Ordering::Acquire) {
                    thread::sleep(period);
                    if cancel.load(Ordering::Acquire) || check() {
                        break;
                    }
                }
                running.store(false, Ordering::Release);
            });

        match spawned {
            Ok(handle) => self.handle = Some(handle),
            Err(e) => {
                tracing::error!("Failed to spawn distance-check thread: {}", e);
                self.running.store(false, Ordering::Release);
            }
        }
    }

    /// Stop the periodic check and wait for the thread to exit.
    pub fn stop(&mut self) {
        self.cancel.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Default for DistanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DistanceMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_one_shot_firing_stops_monitor() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let check_ticks = Arc::clone(&ticks);

        let mut monitor = DistanceMonitor::new();
        monitor.start(Duration::from_millis(5), move || {
            check_ticks.fetch_add(1, Ordering::SeqCst) + 1 >= 3
        });

        // Give the thread time to tick three times and exit on its own
        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while monitor.is_running() && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }

        assert!(!monitor.is_running());
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_stop_cancels_running_monitor() {
        let mut monitor = DistanceMonitor::new();
        monitor.start(Duration::from_millis(5), || false);
        assert!(monitor.is_running());

        monitor.stop();
        assert!(!monitor.is_running());
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let mut monitor = DistanceMonitor::new();
        let first_ticks = Arc::clone(&first);
        monitor.start(Duration::from_millis(5), move || {
            first_ticks.fetch_add(1, Ordering::SeqCst);
            false
        });

        let second_ticks = Arc::clone(&second);
        monitor.start(Duration::from_millis(5), move || {
            second_ticks.fetch_add(1, Ordering::SeqCst);
            false
        });

        thread::sleep(Duration::from_millis(50));
        monitor.stop();

        assert!(first.load(Ordering::SeqCst) > 0);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_restart_after_one_shot() {
        let mut monitor = DistanceMonitor::new();
        monitor.start(Duration::from_millis(5), || true);

        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while monitor.is_running() && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!monitor.is_running());

        let ticks = Arc::new(AtomicUsize::new(0));
        let check_ticks = Arc::clone(&ticks);
        monitor.start(Duration::from_millis(5), move || {
            check_ticks.fetch_add(1, Ordering::SeqCst);
            false
        });
        assert!(monitor.is_running());

        thread::sleep(Duration::from_millis(50));
        monitor.stop();
        assert!(ticks.load(Ordering::SeqCst) > 0);
    }
}
