// Clock sources and the accumulating stopwatch used by the estimator

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A source of "now", expressed as the time elapsed since a fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time backed by `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a callable under test can hold one
/// handle and advance it by a synthetic cost while the stopwatch reads
/// another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| Some(now.saturating_add(nanos)));
    }

    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

/// Accumulates elapsed time across any number of start/stop intervals.
///
/// `stop()` must be preceded by a `start()` in the same interval. This is not
/// checked: the begin point is initialised at construction, so an unpaired
/// `stop()` measures from construction (or the previous `start()`) and the
/// result is meaningless.
///
/// A single stopwatch must not be driven from several threads at once.
#[derive(Debug, Clone)]
pub struct Stopwatch<C: Clock = MonotonicClock> {
    clock: C,
    begin: Duration,
    total: Duration,
}

impl Stopwatch<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for Stopwatch<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Stopwatch<C> {
    pub fn with_clock(clock: C) -> Self {
        let begin = clock.now();
        Self { clock, begin, total: Duration::ZERO }
    }

    /// Mark the beginning of an interval. A repeated call replaces the
    /// previous begin point.
    pub fn start(&mut self) {
        self.begin = self.clock.now();
    }

    /// Close the current interval, add it to the total and return it.
    pub fn stop(&mut self) -> Duration {
        let interval = self.clock.now().saturating_sub(self.begin);
        self.total += interval;
        interval
    }

    /// Zero the accumulated total. An open interval stays open.
    pub fn reset(&mut self) {
        self.total = Duration::ZERO;
    }

    pub fn elapsed(&self) -> Duration {
        self.total
    }

    /// Accumulated total in whole milliseconds, truncated.
    pub fn elapsed_milliseconds(&self) -> u64 {
        self.total.as_millis() as u64
    }
}
