//! Connection events → requested pattern → writes on the line.
//!
//! Uses a 20 ms base interval; assertions wait on the recorded writes
//! rather than on wall-clock step counts.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use linkled::{BlinkPattern, ConnectionChannel, LedConfig, LedService, Level};

use crate::mock_line::{MockLine, MockProvider, SharedLog};

const INTERVAL_MS: u64 = 20;

fn config(invert: bool) -> LedConfig {
    LedConfig {
        gpio_chip: String::from("gpiochip0"),
        line: 17,
        invert,
        base_interval_ms: INTERVAL_MS as u32,
    }
}

fn intervals(n: u64) -> Duration {
    Duration::from_millis(INTERVAL_MS * n)
}

fn wait_for_writes(log: &SharedLog, count: usize) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while log.write_count() < count {
        assert!(Instant::now() < deadline, "timed out waiting for {count} writes");
        thread::sleep(Duration::from_millis(2));
    }
}

/// The next `n` writes made from now on.
fn writes_over(log: &SharedLog, n: usize) -> Vec<Level> {
    let start = log.write_count();
    wait_for_writes(log, start + n);
    log.writes()[start..].to_vec()
}

fn alternates(levels: &[Level]) -> bool {
    levels.windows(2).all(|w| w[0] != w[1])
}

fn start_service(invert: bool) -> (LedService<MockLine>, Arc<ConnectionChannel>, SharedLog) {
    let mut provider = MockProvider::new();
    let log = provider.log.clone();
    let events = Arc::new(ConnectionChannel::new());
    let mut service = LedService::new(&config(invert), &mut provider, Arc::clone(&events)).unwrap();
    service.start().unwrap();
    (service, events, log)
}

#[test]
fn led_is_off_before_any_event() {
    let (mut service, _events, log) = start_service(false);
    let levels = writes_over(&log, 3);
    assert!(levels.iter().all(|l| *l == Level::Low));
    assert_eq!(service.requested_pattern(), BlinkPattern::Off);
    service.stop();
}

#[test]
fn disconnected_blinks_connected_is_steady_and_stop_turns_off() {
    let (mut service, events, log) = start_service(false);

    events.try_send(false).unwrap();
    thread::sleep(intervals(2));
    assert_eq!(service.requested_pattern(), BlinkPattern::Blink);
    let blink = writes_over(&log, 6);
    assert!(alternates(&blink), "blink must alternate: {blink:?}");

    events.try_send(true).unwrap();
    thread::sleep(intervals(2));
    assert_eq!(service.requested_pattern(), BlinkPattern::On);
    let on = writes_over(&log, 4);
    assert!(on.iter().all(|l| *l == Level::High), "on must be steady: {on:?}");

    service.stop();
    let after_stop = log.write_count();
    assert_eq!(log.last_write(), Some(Level::Low));
    assert_eq!(log.releases(), 1);

    thread::sleep(intervals(4));
    assert_eq!(log.write_count(), after_stop, "no writes after stop");
}

#[test]
fn inverted_line_sees_low_when_connected() {
    let (mut service, events, log) = start_service(true);

    events.try_send(true).unwrap();
    thread::sleep(intervals(2));
    let on = writes_over(&log, 3);
    assert!(on.iter().all(|l| *l == Level::Low), "inverted on: {on:?}");

    service.stop();
    // Logical off is physical high on an inverted line.
    assert_eq!(log.last_write(), Some(Level::High));
}

#[test]
fn repeated_disconnect_keeps_blink_phase() {
    let (mut service, events, log) = start_service(false);

    events.try_send(false).unwrap();
    thread::sleep(intervals(3));
    let start = log.write_count();
    for _ in 0..4 {
        events.try_send(false).unwrap();
        thread::sleep(Duration::from_millis(INTERVAL_MS / 2));
    }
    wait_for_writes(&log, start + 6);
    let levels = log.writes()[start..].to_vec();
    assert!(alternates(&levels), "repeated false must not restart the sequence: {levels:?}");

    service.stop();
}

#[test]
fn last_of_rapid_flips_wins() {
    let (mut service, events, log) = start_service(false);

    for connected in [true, false, true, false, true] {
        events.try_send(connected).unwrap();
    }
    thread::sleep(intervals(3));
    assert_eq!(service.requested_pattern(), BlinkPattern::On);
    let on = writes_over(&log, 3);
    assert!(on.iter().all(|l| *l == Level::High));

    service.stop();
}
