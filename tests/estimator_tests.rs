// Integration tests for the runtime-ratio estimator
//
// These tests drive the public API the way a benchmark author would:
// - Ratio sequences for synthetic costs on a manual clock
// - Size progression and boundary handling
// - Generated inputs feeding the estimator
// - Sequence printing of generated data

use nvg::benchmarks::{
    doubling_sizes, ratios_from_steps, Growth, ManualClock, RatioEstimator, RatioSample, Stopwatch,
};
use nvg::display::write_sequence;
use nvg::runtime_ratios;
use nvg::workloads::Workload;
use nvg::Random;
use std::cell::RefCell;
use std::collections::HashSet;

/// Run the estimator with a callable that costs `cost(n)` milliseconds on a
/// manual clock.
fn ratios_for(cost: fn(usize) -> u64, max_n: usize, repeats: usize) -> Vec<RatioSample> {
    let clock = ManualClock::new();
    let estimator = RatioEstimator::new().with_repeats(repeats).with_clock(clock.clone());
    estimator.runtime_ratios(|n: usize| clock.advance_millis(cost(n)), |n| n, max_n)
}

fn sizes(ratios: &[RatioSample]) -> Vec<usize> {
    ratios.iter().map(|r| r.size).collect()
}

#[test]
fn test_linear_cost_detected() {
    let ratios = ratios_for(|n| n as u64, 16, 5);
    assert_eq!(sizes(&ratios), vec![2, 4, 8]);
    for sample in &ratios {
        assert!((sample.ratio - 2.0).abs() < 1e-9);
        assert_eq!(sample.growth(), Growth::Linear);
    }
}

#[test]
fn test_constant_cost_detected() {
    let ratios = ratios_for(|_| 2, 32, 5);
    assert_eq!(sizes(&ratios), vec![2, 4, 8, 16]);
    assert!(ratios.iter().all(|r| r.growth() == Growth::Constant));
}

#[test]
fn test_cubic_cost_detected() {
    let ratios = ratios_for(|n| (n * n * n) as u64, 32, 2);
    assert!(ratios.iter().all(|r| r.ratio == 8.0 && r.growth() == Growth::Cubic));
}

#[test]
fn test_max_n_one_is_empty() {
    assert!(ratios_for(|n| n as u64, 1, 3).is_empty());
    assert!(ratios_for(|n| n as u64, 0, 3).is_empty());
}

#[test]
fn test_sizes_follow_doubling_progression() {
    for max_n in [2usize, 3, 16, 17, 100, 1024] {
        let ratios = ratios_for(|n| n as u64 + 1, max_n, 1);
        let expected: Vec<usize> = doubling_sizes(max_n).skip(1).collect();
        assert_eq!(sizes(&ratios), expected, "max_n = {}", max_n);
        assert!(expected.iter().all(|&n| n < max_n && n.is_power_of_two()));
        if let Some(&last) = expected.last() {
            assert!(last * 2 >= max_n);
        }
    }
}

#[test]
fn test_sub_millisecond_sizes_skipped_until_measurable() {
    // cost is n / 4 ms, so sizes 1 and 2 measure 0ms
    let ratios = ratios_for(|n| (n / 4) as u64, 64, 4);
    assert_eq!(sizes(&ratios), vec![8, 16, 32]);
    assert!(ratios.iter().all(|r| r.ratio == 2.0));
}

#[test]
fn test_profile_and_ratios_agree() {
    let clock = ManualClock::new();
    let estimator = RatioEstimator::new().with_repeats(3).with_clock(clock.clone());
    let cost = |n: usize| clock.advance_millis((n * n) as u64);

    let direct = estimator.runtime_ratios(cost, |n| n, 128);
    let steps = estimator.profile(cost, |n| n, 128);
    assert_eq!(ratios_from_steps(&steps), direct);
    assert!(steps.iter().all(|s| s.samples.len() == 3));
}

#[test]
fn test_every_repeat_gets_fresh_random_input() {
    let clock = ManualClock::new();
    let estimator = RatioEstimator::new().with_repeats(6).with_clock(clock.clone());
    let random = RefCell::new(Random::seeded(99));
    let seen = RefCell::new(Vec::new());

    estimator.runtime_ratios(
        |v: Vec<usize>| {
            clock.advance_millis(v.len() as u64);
            seen.borrow_mut().push(v);
        },
        |n| random.borrow_mut().permutation_vector(n),
        256,
    );

    let seen = seen.into_inner();
    assert_eq!(seen.len(), 6 * 8);
    let distinct_at_128: HashSet<&Vec<usize>> = seen.iter().filter(|v| v.len() == 128).collect();
    assert_eq!(distinct_at_128.len(), 6);
}

#[test]
fn test_wall_clock_free_function() {
    let ratios = runtime_ratios(
        |v: Vec<usize>| v.iter().sum::<usize>(),
        |n| vec![1; n],
        1,
        20,
    );
    assert!(ratios.is_empty());
}

#[test]
fn test_wall_clock_linear_workload() {
    // the linear sum over multi-megabyte inputs runs for several milliseconds,
    // well clear of timer resolution at the largest sizes
    let estimator = RatioEstimator::new().with_repeats(3);
    let ratios = estimator.runtime_ratios(Workload::Linear.callable(), |n| vec![1usize; n], 1 << 24);

    let last = ratios.last().expect("largest sizes register on a millisecond timer");
    assert_eq!(last.size, 1 << 23);
    assert!(last.ratio > 1.3 && last.ratio < 3.5, "ratio {}", last.ratio);
}

#[test]
fn test_stopwatch_accumulates_across_pairs() {
    let clock = ManualClock::new();
    let mut watch = Stopwatch::with_clock(clock.clone());
    watch.start();
    clock.advance_millis(4);
    let first = watch.stop();
    watch.start();
    clock.advance_millis(9);
    let second = watch.stop();
    assert!(watch.elapsed() >= first);
    assert!(watch.elapsed() >= second);
    assert_eq!(watch.elapsed_milliseconds(), 13);
    watch.reset();
    assert_eq!(watch.elapsed_milliseconds(), 0);
}

#[test]
fn test_generated_vectors_print() {
    let mut random = Random::seeded(1);
    let permutation = random.permutation_vector(5);
    let mut buffer = Vec::new();
    write_sequence(&mut buffer, &permutation, ",", ";").unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert!(text.ends_with(';'));
    let mut parsed: Vec<usize> = text
        .trim_end_matches(';')
        .split(',')
        .map(|s| s.parse().unwrap())
        .collect();
    parsed.sort_unstable();
    assert_eq!(parsed, vec![0, 1, 2, 3, 4]);
}
