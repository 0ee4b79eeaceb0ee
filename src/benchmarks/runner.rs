// Runtime-ratio estimator - times a callable over doubling input sizes

use crate::benchmarks::{Clock, MonotonicClock, RatioSample, StepMeasurement, Stopwatch};
use std::hint::black_box;
use tracing::{debug, debug_span, trace};

/// Timed trials averaged into each size's runtime unless configured otherwise.
pub const DEFAULT_REPEATS: usize = 20;

/// Sizes `1, 2, 4, 8, ...` strictly below `max_n`.
pub fn doubling_sizes(max_n: usize) -> impl Iterator<Item = usize> {
    std::iter::successors(Some(1usize), |n| n.checked_mul(2)).take_while(move |&n| n < max_n)
}

/// Ratio of `current` to `last`, or `None` when there is no usable previous
/// runtime. A zero runtime below timer resolution suppresses the ratio that
/// would divide by it.
fn ratio_after(last_runtime: u64, current_runtime: u64) -> Option<f64> {
    if last_runtime > 0 {
        Some(current_runtime as f64 / last_runtime as f64)
    } else {
        None
    }
}

/// Apply the ratio rule to a profiled sequence of steps.
pub fn ratios_from_steps(steps: &[StepMeasurement]) -> Vec<RatioSample> {
    let mut ratios = Vec::new();
    let mut last_runtime = 0;
    for step in steps {
        if let Some(ratio) = ratio_after(last_runtime, step.runtime_ms) {
            ratios.push(RatioSample { size: step.size, ratio });
        }
        last_runtime = step.runtime_ms;
    }
    ratios
}

/// Estimate runtime ratios on the wall clock.
///
/// `generate` builds a fresh input for a size and is never timed; `f` is
/// timed on each input and its result discarded. Sizes whose averaged runtime
/// rounds down to zero milliseconds produce no ratio, and neither does the
/// size after them, so choose `max_n` large enough for the callable to
/// register on a millisecond timer.
///
/// Panics if `repeats` is zero.
pub fn runtime_ratios<T, R, F, G>(f: F, generate: G, max_n: usize, repeats: usize) -> Vec<RatioSample>
where
    F: FnMut(T) -> R,
    G: FnMut(usize) -> T,
{
    RatioEstimator::new().with_repeats(repeats).runtime_ratios(f, generate, max_n)
}

pub struct RatioEstimator<C: Clock + Clone = MonotonicClock> {
    repeats: usize,
    clock: C,
}

impl RatioEstimator<MonotonicClock> {
    pub fn new() -> Self {
        Self {
            repeats: DEFAULT_REPEATS,
            clock: MonotonicClock::new(),
        }
    }
}

impl Default for RatioEstimator<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Clone> RatioEstimator<C> {
    /// Panics if `repeats` is zero.
    pub fn with_repeats(mut self, repeats: usize) -> Self {
        assert!(repeats > 0, "repeats per size must be at least 1");
        self.repeats = repeats;
        self
    }

    /// Time with a different clock, e.g. a `ManualClock` in tests.
    pub fn with_clock<D: Clock + Clone>(self, clock: D) -> RatioEstimator<D> {
        RatioEstimator {
            repeats: self.repeats,
            clock,
        }
    }

    pub fn repeats(&self) -> usize {
        self.repeats
    }

    /// Time `repeats` runs of `f` at size `n`, each on a freshly generated
    /// input, with a new stopwatch.
    pub fn measure_step<T, R, F, G>(&self, f: &mut F, generate: &mut G, n: usize) -> StepMeasurement
    where
        F: FnMut(T) -> R,
        G: FnMut(usize) -> T,
    {
        let mut stopwatch = Stopwatch::with_clock(self.clock.clone());
        let mut samples = Vec::with_capacity(self.repeats);

        for _ in 0..self.repeats {
            let input = generate(n);
            stopwatch.start();
            black_box(f(input));
            samples.push(stopwatch.stop());
        }

        let runtime_ms = stopwatch.elapsed_milliseconds() / self.repeats as u64;
        debug!(size = n, runtime_ms, "measured size step");

        StepMeasurement { size: n, runtime_ms, samples }
    }

    /// Ratio sequence for every size in the doubling progression below `max_n`.
    /// Empty when `max_n <= 1`.
    pub fn runtime_ratios<T, R, F, G>(&self, mut f: F, mut generate: G, max_n: usize) -> Vec<RatioSample>
    where
        F: FnMut(T) -> R,
        G: FnMut(usize) -> T,
    {
        let _span = debug_span!("runtime_ratios", max_n, repeats = self.repeats).entered();

        let mut ratios = Vec::new();
        let mut last_runtime = 0;

        for n in doubling_sizes(max_n) {
            let current_runtime = self.measure_step(&mut f, &mut generate, n).runtime_ms;
            match ratio_after(last_runtime, current_runtime) {
                Some(ratio) => ratios.push(RatioSample { size: n, ratio }),
                None => trace!(size = n, "no previous runtime above zero, ratio skipped"),
            }
            last_runtime = current_runtime;
        }

        ratios
    }

    /// Every step of the progression, with individual repeat timings.
    /// Feed the result to `ratios_from_steps` for the ratio sequence.
    pub fn profile<T, R, F, G>(&self, mut f: F, mut generate: G, max_n: usize) -> Vec<StepMeasurement>
    where
        F: FnMut(T) -> R,
        G: FnMut(usize) -> T,
    {
        let _span = debug_span!("profile", max_n, repeats = self.repeats).entered();

        doubling_sizes(max_n)
            .map(|n| self.measure_step(&mut f, &mut generate, n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmarks::ManualClock;
    use std::cell::Cell;

    /// Estimator on a manual clock, plus a callable that advances that clock
    /// by `cost(n)` milliseconds.
    fn synthetic(
        repeats: usize,
        cost: impl Fn(usize) -> u64,
    ) -> (RatioEstimator<ManualClock>, impl FnMut(usize)) {
        let clock = ManualClock::new();
        let estimator = RatioEstimator::new().with_repeats(repeats).with_clock(clock.clone());
        let callable = move |n: usize| clock.advance_millis(cost(n));
        (estimator, callable)
    }

    #[test]
    fn test_doubling_sizes() {
        assert_eq!(doubling_sizes(0).count(), 0);
        assert_eq!(doubling_sizes(1).count(), 0);
        assert_eq!(doubling_sizes(2).collect::<Vec<_>>(), vec![1]);
        assert_eq!(doubling_sizes(16).collect::<Vec<_>>(), vec![1, 2, 4, 8]);
        assert_eq!(doubling_sizes(17).collect::<Vec<_>>(), vec![1, 2, 4, 8, 16]);
        assert_eq!(doubling_sizes(usize::MAX).count(), usize::BITS as usize);
    }

    #[test]
    fn test_linear_cost_gives_two() {
        let (estimator, callable) = synthetic(5, |n| n as u64);
        let ratios = estimator.runtime_ratios(callable, |n| n, 16);

        assert_eq!(ratios.iter().map(|r| r.size).collect::<Vec<_>>(), vec![2, 4, 8]);
        for sample in ratios {
            assert_eq!(sample.ratio, 2.0);
        }
    }

    #[test]
    fn test_constant_cost_gives_one() {
        let (estimator, callable) = synthetic(5, |_| 3);
        let ratios = estimator.runtime_ratios(callable, |n| n, 32);

        assert_eq!(ratios.len(), 4);
        assert!(ratios.iter().all(|r| r.ratio == 1.0));
    }

    #[test]
    fn test_quadratic_cost_gives_four() {
        let (estimator, callable) = synthetic(3, |n| (n * n) as u64);
        let ratios = estimator.runtime_ratios(callable, |n| n, 64);

        assert_eq!(ratios.len(), 5);
        assert!(ratios.iter().all(|r| r.ratio == 4.0));
    }

    #[test]
    fn test_max_n_at_most_one_is_empty() {
        let (estimator, mut callable) = synthetic(2, |n| n as u64);
        assert!(estimator.runtime_ratios(&mut callable, |n| n, 1).is_empty());
        assert!(estimator.runtime_ratios(&mut callable, |n| n, 0).is_empty());
    }

    #[test]
    fn test_zero_runtime_suppresses_following_ratio() {
        // sizes 1 and 2 cost nothing, size 4 costs 4ms, size 8 costs 8ms
        let (estimator, callable) = synthetic(4, |n| if n < 4 { 0 } else { n as u64 });
        let ratios = estimator.runtime_ratios(callable, |n| n, 16);

        assert_eq!(ratios, vec![RatioSample { size: 8, ratio: 2.0 }]);
    }

    #[test]
    fn test_average_truncates() {
        // 3 repeats totalling 5ms at every size average to 1ms
        let clock = ManualClock::new();
        let estimator = RatioEstimator::new().with_repeats(3).with_clock(clock.clone());
        let calls = Cell::new(0u64);
        let mut callable = |_: usize| {
            let i = calls.get();
            calls.set(i + 1);
            clock.advance_millis(if i % 3 == 0 { 1 } else { 2 });
        };
        let step = estimator.measure_step(&mut callable, &mut |n: usize| n, 8);
        assert_eq!(step.runtime_ms, 1);
        assert_eq!(step.samples.len(), 3);
    }

    #[test]
    fn test_fresh_input_per_repeat_and_generation_untimed() {
        let clock = ManualClock::new();
        let estimator = RatioEstimator::new().with_repeats(4).with_clock(clock.clone());
        let generated = Cell::new(0usize);
        let mut generate = |n: usize| {
            generated.set(generated.get() + 1);
            // expensive generation must not show up in the measurement
            clock.advance_millis(1_000);
            vec![0u8; n]
        };
        let mut f = |v: Vec<u8>| {
            clock.advance_millis(v.len() as u64);
            v.len()
        };

        let steps = estimator.profile(&mut f, &mut generate, 8);
        assert_eq!(generated.get(), 4 * 3);
        assert_eq!(steps.iter().map(|s| s.runtime_ms).collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn test_profile_matches_ratio_rule() {
        let (estimator, callable) = synthetic(2, |n| if n == 1 { 0 } else { n as u64 });
        let steps = estimator.profile(callable, |n| n, 32);

        assert_eq!(steps.iter().map(|s| s.size).collect::<Vec<_>>(), vec![1, 2, 4, 8, 16]);
        let ratios = ratios_from_steps(&steps);
        assert_eq!(ratios.iter().map(|r| r.size).collect::<Vec<_>>(), vec![4, 8, 16]);
        assert!(ratios.iter().all(|r| r.ratio == 2.0));
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn test_zero_repeats_panics() {
        RatioEstimator::new().with_repeats(0);
    }

    #[test]
    fn test_wall_clock_sizes() {
        let ratios = runtime_ratios(
            |ms: u64| std::thread::sleep(std::time::Duration::from_millis(ms)),
            |n| n as u64,
            16,
            2,
        );
        // sleeps of at least 1ms always register, so every size after the first has a ratio
        assert_eq!(ratios.iter().map(|r| r.size).collect::<Vec<_>>(), vec![2, 4, 8]);
        assert!(ratios.iter().all(|r| r.ratio.is_finite() && r.ratio > 0.0));
    }
}
