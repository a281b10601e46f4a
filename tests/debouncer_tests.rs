//! Integration tests for the basic Debouncer

mod common;
use common::*;

use thermostat_io::{Debouncer, MillisDuration};

#[test]
fn bounce_throttles_to_window() {
    let timer = MockTimeSource::new();
    let mut debouncer = Debouncer::with_frequency(&timer, MillisDuration(1000));

    let mut fired_at = Vec::new();
    for _ in 0..2500 {
        debouncer.bounce(|| fired_at.push(timer.millis()));
        timer.advance(1);
    }

    assert_eq!(fired_at, vec![0, 1000, 2000]);
}

#[test]
fn perma_bounce_fires_once_until_reset() {
    let timer = MockTimeSource::new();
    let mut debouncer = Debouncer::with_frequency(&timer, MillisDuration(10));

    let mut runs = 0;
    for _ in 0..100 {
        debouncer.perma_bounce(|| runs += 1);
        timer.advance(1);
    }
    assert_eq!(runs, 1);
    assert!(debouncer.is_perma_bounced());

    debouncer.reset();
    assert!(!debouncer.is_perma_bounced());
    debouncer.perma_bounce(|| runs += 1);
    assert_eq!(runs, 2);
}

#[test]
fn reset_clears_rate_limit() {
    let timer = MockTimeSource::new();
    let mut debouncer = Debouncer::with_frequency(&timer, MillisDuration(1000));

    let mut runs = 0;
    debouncer.bounce(|| runs += 1);
    timer.advance(10);
    assert!(debouncer.is_bounced());

    debouncer.reset();
    assert!(!debouncer.is_bounced());
    debouncer.bounce(|| runs += 1);
    assert_eq!(runs, 2);
}

#[test]
fn perma_bounce_also_starts_rate_limit() {
    let timer = MockTimeSource::new();
    let mut debouncer = Debouncer::with_frequency(&timer, MillisDuration(100));

    let mut runs = 0;
    debouncer.perma_bounce(|| runs += 1);
    timer.advance(50);
    debouncer.bounce(|| runs += 1);
    assert_eq!(runs, 1);

    timer.advance(50);
    debouncer.bounce(|| runs += 1);
    assert_eq!(runs, 2);
}

#[test]
fn bounce_ignores_latch() {
    let timer = MockTimeSource::new();
    let mut debouncer = Debouncer::with_frequency(&timer, MillisDuration(100));

    let mut runs = 0;
    debouncer.bounce(|| runs += 1);
    timer.advance(100);
    assert!(debouncer.is_perma_bounced());
    debouncer.bounce(|| runs += 1);
    assert_eq!(runs, 2);
}

#[test]
fn window_spans_counter_wraparound() {
    let timer = MockTimeSource::starting_at(u32::MAX - 100);
    let mut debouncer = Debouncer::with_frequency(&timer, MillisDuration(500));

    let mut runs = 0;
    debouncer.bounce(|| runs += 1);

    timer.advance(499);
    debouncer.bounce(|| runs += 1);
    assert_eq!(runs, 1);

    timer.advance(1);
    debouncer.bounce(|| runs += 1);
    assert_eq!(runs, 2);
}
