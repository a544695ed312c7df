//! `LedService::with_line` over an embedded-hal pin wrapped in `PinLine`.

use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::digital::{ErrorType, OutputPin};
use linkled::adapters::pin_line::PinLine;
use linkled::{ConnectionChannel, LedConfig, LedService, Lifecycle};

/// Output pin recording every level it is driven to (`true` = high).
#[derive(Clone, Default)]
struct RecordingPin {
    levels: Arc<Mutex<Vec<bool>>>,
}

impl RecordingPin {
    fn levels(&self) -> Vec<bool> {
        self.levels.lock().unwrap().clone()
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.levels.lock().unwrap().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.levels.lock().unwrap().push(true);
        Ok(())
    }
}

fn config(invert: bool) -> LedConfig {
    LedConfig {
        invert,
        base_interval_ms: 10,
        ..LedConfig::default()
    }
}

fn wait_until(pin: &RecordingPin, done: impl Fn(&[bool]) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done(&pin.levels()) {
        assert!(Instant::now() < deadline, "timed out, pin saw {:?}", pin.levels());
        thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn connected_drives_pin_high_and_stop_leaves_it_low() {
    let pin = RecordingPin::default();
    let events = Arc::new(ConnectionChannel::new());
    let mut service =
        LedService::with_line(&config(false), PinLine::new(pin.clone()), Arc::clone(&events)).unwrap();
    service.start().unwrap();

    futures_lite::future::block_on(events.send(true));
    wait_until(&pin, |levels| levels.ends_with(&[true, true]));

    service.stop();
    assert_eq!(service.lifecycle(), Lifecycle::Stopped);
    // Final off write from the blink task, then the release.
    assert!(pin.levels().ends_with(&[false, false]));
}

#[test]
fn inverted_pin_is_driven_low_for_on() {
    let pin = RecordingPin::default();
    let events = Arc::new(ConnectionChannel::new());
    let mut service =
        LedService::with_line(&config(true), PinLine::new(pin.clone()), Arc::clone(&events)).unwrap();
    service.start().unwrap();

    // Off on an active-low LED holds the pin high.
    wait_until(&pin, |levels| levels.first() == Some(&true));

    futures_lite::future::block_on(events.send(true));
    wait_until(&pin, |levels| levels.ends_with(&[false, false]));
    service.stop();
}
