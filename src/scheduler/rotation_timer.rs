//! Rotation timer implementation
//!
//! A background thread sleeps for the configured interval and emits a tick.
//! Interval updates and shutdown wake the thread through a condvar so they
//! take effect immediately instead of after the current sleep.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Bound of the tick channel; a full channel drops the tick
pub const TICK_CHANNEL_CAPACITY: usize = 1;

/// Events emitted by the rotation timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationEvent {
    /// The rotation interval elapsed
    Tick,
}

/// State shared between the timer thread and interval handles
struct TimerShared {
    /// Current interval; the wait restarts whenever it changes
    interval: Mutex<Duration>,
    /// Wakes the timer thread on interval changes and shutdown
    changed: Condvar,
    /// Set to stop the timer thread
    shutdown: AtomicBool,
}

/// Shared handle for adjusting the running timer
#[derive(Clone)]
pub struct IntervalHandle {
    shared: Arc<TimerShared>,
}

impl IntervalHandle {
    /// Replace the rotation interval, waking the timer to pick it up
    pub fn set_interval(&self, interval: Duration) {
        {
            let mut guard = self.shared.interval.lock();
            *guard = interval;
        }
        self.shared.changed.notify_all();
        tracing::info!("Rotation interval set to {:?}", interval);
    }

    /// Current rotation interval
    pub fn interval(&self) -> Duration {
        *self.shared.interval.lock()
    }

    /// Stop the timer thread after its current wait
    pub fn shutdown(&self) {
        self.shared.shutdown.store(true, Ordering::SeqCst);
        self.shared.changed.notify_all();
    }
}

/// Periodic rotation trigger
///
/// Emits `RotationEvent::Tick` on the event channel every interval. The
/// channel is bounded (capacity one); ticks that cannot be delivered because
/// the controller is still busy are dropped rather than queued.
pub struct RotationTimer {
    shared: Arc<TimerShared>,
    event_sender: mpsc::SyncSender<RotationEvent>,
}

impl RotationTimer {
    /// Create a new rotation timer with the given starting interval
    pub fn new(interval: Duration, event_sender: mpsc::SyncSender<RotationEvent>) -> Self {
        Self {
            shared: Arc::new(TimerShared {
                interval: Mutex::new(interval),
                changed: Condvar::new(),
                shutdown: AtomicBool::new(false),
            }),
            event_sender,
        }
    }

    /// Get a handle for updating the interval and shutting the timer down
    pub fn interval_handle(&self) -> IntervalHandle {
        IntervalHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Start the timer thread
    pub fn start(self) -> JoinHandle<()> {
        thread::spawn(move || {
            tracing::info!(
                "Rotation timer started with interval {:?}",
                *self.shared.interval.lock()
            );

            loop {
                let timed_out = {
                    let mut interval_guard = self.shared.interval.lock();
                    let interval = *interval_guard;
                    self.shared
                        .changed
                        .wait_for(&mut interval_guard, interval)
                        .timed_out()
                };

                if self.shared.shutdown.load(Ordering::SeqCst) {
                    tracing::info!("Rotation timer shutting down");
                    break;
                }

                // A wakeup without timeout means the interval changed;
                // restart the wait with the new value
                if !timed_out {
                    continue;
                }

                match self.event_sender.try_send(RotationEvent::Tick) {
                    Ok(()) => {}
                    Err(mpsc::TrySendError::Full(_)) => {
                        tracing::debug!("Previous rotation still pending, dropping tick");
                    }
                    Err(mpsc::TrySendError::Disconnected(_)) => {
                        tracing::warn!("Tick receiver disconnected, stopping rotation timer");
                        break;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_tick_arrives_after_interval() {
        let (tx, rx) = mpsc::sync_channel(TICK_CHANNEL_CAPACITY);
        let timer = RotationTimer::new(Duration::from_millis(50), tx);
        let handle = timer.interval_handle();
        let join = timer.start();

        let event = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(event, RotationEvent::Tick);

        handle.shutdown();
        join.join().unwrap();
    }

    #[test]
    fn test_interval_update_takes_effect_immediately() {
        let (tx, rx) = mpsc::sync_channel(TICK_CHANNEL_CAPACITY);
        // Long enough that only the update can produce a tick in time
        let timer = RotationTimer::new(Duration::from_secs(3600), tx);
        let handle = timer.interval_handle();
        let join = timer.start();

        let started = Instant::now();
        handle.set_interval(Duration::from_millis(50));
        let event = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(event, RotationEvent::Tick);
        assert!(started.elapsed() < Duration::from_secs(2));

        handle.shutdown();
        join.join().unwrap();
    }

    #[test]
    fn test_shutdown_stops_thread() {
        let (tx, _rx) = mpsc::sync_channel(TICK_CHANNEL_CAPACITY);
        let timer = RotationTimer::new(Duration::from_secs(3600), tx);
        let handle = timer.interval_handle();
        let join = timer.start();

        handle.shutdown();
        join.join().unwrap();
    }

    #[test]
    fn test_full_channel_drops_ticks_without_blocking() {
        let (tx, rx) = mpsc::sync_channel(TICK_CHANNEL_CAPACITY);
        let timer = RotationTimer::new(Duration::from_millis(20), tx);
        let handle = timer.interval_handle();
        let join = timer.start();

        // Never drain; the timer must keep running and dropping ticks
        std::thread::sleep(Duration::from_millis(200));

        // Exactly one tick is buffered regardless of elapsed intervals
        assert_eq!(rx.try_recv().unwrap(), RotationEvent::Tick);

        handle.shutdown();
        join.join().unwrap();

        // At most one more tick could have been buffered between the drain
        // and the shutdown
        let mut extra = 0;
        while rx.try_recv().is_ok() {
            extra += 1;
        }
        assert!(extra <= 1);
    }

    #[test]
    fn test_interval_handle_reports_current_value() {
        let (tx, _rx) = mpsc::sync_channel(TICK_CHANNEL_CAPACITY);
        let timer = RotationTimer::new(Duration::from_secs(30), tx);
        let handle = timer.interval_handle();

        assert_eq!(handle.interval(), Duration::from_secs(30));
        handle.set_interval(Duration::from_secs(60));
        assert_eq!(handle.interval(), Duration::from_secs(60));
    }
}
