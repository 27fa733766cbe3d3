use crate::queue::TimerQueue;
use std::time::{Duration, Instant};
use tracing::trace;

/// Identifies one armed timer. Handles are never reused within a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub(crate) u64);

/// Clock plus one-shot scheduler driving a trial engine.
///
/// Timestamps are nanoseconds since the timer was created. Expired timers are
/// handed out one at a time so the owner can run each callback to completion
/// before looking at the next.
pub trait Timer {
    fn now(&self) -> u64;

    fn elapsed(&self, ts: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(ts))
    }

    fn arm(&mut self, delay: Duration) -> TimerHandle;

    /// Returns false if the handle already fired or was cancelled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    fn next_deadline(&self) -> Option<u64>;

    /// Removes and returns the earliest timer whose deadline has passed.
    fn take_expired(&mut self) -> Option<TimerHandle>;

    fn pending(&self) -> usize;
}

/// Nanoseconds in `d`, pinned to `u64::MAX` for durations past ~584 years.
pub fn saturating_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

/// A timer whose clock is moved by hand.
pub trait VirtualClock: Timer {
    fn set_now(&mut self, ns: u64);
}

/// How late expired timers were collected relative to their deadlines
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationStats {
    pub samples: usize,
    pub mean_lateness_ns: f64,
    pub jitter_ns: f64,
    pub min_lateness_ns: f64,
    pub max_lateness_ns: f64,
}

/// Wall-clock timer backed by `Instant`
#[derive(Debug, Clone)]
pub struct MonotonicTimer {
    pub start: Instant,
    queue: TimerQueue,
    pub lateness: Vec<Duration>,
    pub max_samples: usize,
}

impl MonotonicTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            queue: TimerQueue::default(),
            lateness: Vec::with_capacity(256),
            max_samples: 256,
        }
    }

    /// Converts an instant captured elsewhere (e.g. when a key was read) to this
    /// timer's timestamp scale. Instants before `start` map to 0.
    pub fn stamp(&self, at: Instant) -> u64 {
        saturating_nanos(at.saturating_duration_since(self.start))
    }

    /// Time left until the next deadline, zero if one is already due.
    pub fn until_next(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|d| Duration::from_nanos(d.saturating_sub(self.now())))
    }

    fn record_lateness(&mut self, d: Duration) {
        if self.lateness.len() >= self.max_samples {
            self.lateness.remove(0);
        }
        self.lateness.push(d);
    }

    pub fn calibration_stats(&self) -> CalibrationStats {
        let times: Vec<f64> = self.lateness.iter().map(|d| d.as_nanos() as f64).collect();
        if times.is_empty() {
            return CalibrationStats {
                samples: 0,
                mean_lateness_ns: 0.0,
                jitter_ns: 0.0,
                min_lateness_ns: 0.0,
                max_lateness_ns: 0.0,
            };
        }
        let avg = times.iter().sum::<f64>() / times.len() as f64;
        let var = times.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / times.len() as f64;
        CalibrationStats {
            samples: times.len(),
            mean_lateness_ns: avg,
            jitter_ns: var.sqrt(),
            min_lateness_ns: times.iter().copied().fold(f64::INFINITY, f64::min),
            max_lateness_ns: times.iter().copied().fold(0.0, f64::max),
        }
    }
}

impl Default for MonotonicTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for MonotonicTimer {
    fn now(&self) -> u64 {
        saturating_nanos(self.start.elapsed())
    }

    fn arm(&mut self, delay: Duration) -> TimerHandle {
        let handle = self
            .queue
            .push(self.now().saturating_add(saturating_nanos(delay)));
        trace!(?handle, delay_ms = delay.as_millis() as u64, "timer armed");
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.queue.remove(handle)
    }

    fn next_deadline(&self) -> Option<u64> {
        self.queue.next_deadline()
    }

    fn take_expired(&mut self) -> Option<TimerHandle> {
        let now = self.now();
        let (handle, deadline) = self.queue.pop_due(now)?;
        self.record_lateness(Duration::from_nanos(now - deadline));
        Some(handle)
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Deterministic timer for tests and headless simulation
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    now_ns: u64,
    queue: TimerQueue,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: u64) -> Self {
        Self {
            now_ns: ms.saturating_mul(1_000_000),
            queue: TimerQueue::default(),
        }
    }
}

impl Timer for ManualTimer {
    fn now(&self) -> u64 {
        self.now_ns
    }

    fn arm(&mut self, delay: Duration) -> TimerHandle {
        self.queue
            .push(self.now_ns.saturating_add(saturating_nanos(delay)))
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.queue.remove(handle)
    }

    fn next_deadline(&self) -> Option<u64> {
        self.queue.next_deadline()
    }

    fn take_expired(&mut self) -> Option<TimerHandle> {
        self.queue.pop_due(self.now_ns).map(|(h, _)| h)
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl VirtualClock for ManualTimer {
    fn set_now(&mut self, ns: u64) {
        debug_assert!(ns >= self.now_ns, "virtual clock moved backwards");
        self.now_ns = ns;
    }
}
