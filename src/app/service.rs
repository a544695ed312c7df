//! LED service: owns the status line and both control tasks.
//!
//! [`LedService`] acquires one output line at construction and keeps it
//! for its whole lifetime. `start()` spawns a dedicated worker thread
//! running the selector and the blink task on an `edge-executor`;
//! `stop()` raises the shutdown signal, waits for both tasks, and only
//! then releases the line.
//!
//! ```text
//!   Ready ──start()──▶ Running ──stop()──▶ Stopping ──join──▶ Stopped
//!     │                                                          ▲
//!     └──────────────────────── stop() ──────────────────────────┘
//! ```

use core::time::Duration;
use std::sync::Arc;
use std::thread::JoinHandle;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use futures_lite::future;
use log::{error, info, warn};

use crate::config::LedConfig;
use crate::drivers::blink_task::{BlinkExit, run_blink};
use crate::drivers::led_patterns::BlinkPattern;
use crate::drivers::status_led::StatusLed;
use crate::error::{Error, Result};

use super::channels::{ConnectionChannel, RequestedPattern, ShutdownSignal};
use super::ports::{LineProvider, OutputLine};
use super::selector::run_selector;

/// Worker thread name.
const WORKER_NAME: &str = "led-service";
/// Worker thread stack, in KiB.
const WORKER_STACK_KB: usize = 64;

/// Passes the LED to the worker once the thread exists.
type LedHandoff<L> = Signal<CriticalSectionRawMutex, StatusLed<L>>;

/// Service lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Line acquired, tasks not started.
    Ready,
    /// Selector and blink task active.
    Running,
    /// Shutdown raised, waiting for both tasks.
    Stopping,
    /// Tasks finished and line released.
    Stopped,
}

pub struct LedService<L: OutputLine + Send + 'static> {
    events: Arc<ConnectionChannel>,
    shutdown: Arc<ShutdownSignal>,
    requested: Arc<RequestedPattern>,
    interval: Duration,
    stack_size: usize,
    /// Present while no worker owns the LED.
    led: Option<StatusLed<L>>,
    worker: Option<JoinHandle<StatusLed<L>>>,
    lifecycle: Lifecycle,
}

impl<L: OutputLine + Send + 'static> LedService<L> {
    /// Acquire the configured line from `provider`.
    ///
    /// Acquisition failure is fatal: the service is never constructed.
    pub fn new<P>(
        config: &LedConfig,
        provider: &mut P,
        events: Arc<ConnectionChannel>,
    ) -> Result<Self>
    where
        P: LineProvider<Line = L>,
    {
        config.validate()?;
        let line = provider
            .open(&config.gpio_chip, config.line)
            .map_err(|e| {
                error!(
                    "LED: cannot open {} line {}: {}",
                    config.gpio_chip, config.line, e
                );
                Error::Device(e)
            })?;
        info!(
            "LED: acquired {} line {} (invert={})",
            config.gpio_chip, config.line, config.invert
        );
        Self::with_line(config, line, events)
    }

    /// Build the service around an already acquired line.
    pub fn with_line(config: &LedConfig, line: L, events: Arc<ConnectionChannel>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            events,
            shutdown: Arc::new(ShutdownSignal::new()),
            requested: Arc::new(RequestedPattern::default()),
            interval: config.base_interval(),
            stack_size: WORKER_STACK_KB * 1024,
            led: Some(StatusLed::new(line, config.invert)),
            worker: None,
            lifecycle: Lifecycle::Ready,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Spawn the worker thread running both tasks.
    ///
    /// If the thread cannot be spawned the line is released here and the
    /// service ends up `Stopped`.
    pub fn start(&mut self) -> Result<()> {
        if self.lifecycle != Lifecycle::Ready {
            return Err(Error::Lifecycle("service can only be started once"));
        }
        if self.led.is_none() {
            return Err(Error::Lifecycle("output line not available"));
        }

        let handoff: Arc<LedHandoff<L>> = Arc::new(Signal::new());
        let events = Arc::clone(&self.events);
        let shutdown = Arc::clone(&self.shutdown);
        let requested = Arc::clone(&self.requested);
        let worker_handoff = Arc::clone(&handoff);
        let interval = self.interval;

        let spawned = std::thread::Builder::new()
            .name(WORKER_NAME.into())
            .stack_size(self.stack_size)
            .spawn(move || run_worker(&events, &shutdown, &requested, &worker_handoff, interval));

        match spawned {
            Ok(handle) => {
                if let Some(led) = self.led.take() {
                    handoff.signal(led);
                }
                info!("LED: service started (base interval {:?})", self.interval);
                self.worker = Some(handle);
                self.lifecycle = Lifecycle::Running;
                Ok(())
            }
            Err(e) => {
                error!("LED: worker spawn failed: {}", e);
                self.stop();
                Err(Error::Spawn)
            }
        }
    }

    /// Shut down and block until both tasks have exited and the line has
    /// been released. Safe to call more than once.
    pub fn stop(&mut self) {
        match self.lifecycle {
            Lifecycle::Stopped => return,
            Lifecycle::Ready => {}
            Lifecycle::Running | Lifecycle::Stopping => {
                self.lifecycle = Lifecycle::Stopping;
                self.shutdown.signal(());
                if let Some(worker) = self.worker.take() {
                    match worker.join() {
                        Ok(led) => self.led = Some(led),
                        Err(_) => error!("LED: worker thread panicked, line not released"),
                    }
                }
            }
        }

        if let Some(led) = self.led.take() {
            match led.release() {
                Ok(()) => info!("LED: line released"),
                Err(e) => warn!("LED: line release failed: {}", e),
            }
        }
        self.lifecycle = Lifecycle::Stopped;
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn requested_pattern(&self) -> BlinkPattern {
        self.requested.load()
    }

    /// Producer side of the connection-state channel.
    pub fn events(&self) -> &Arc<ConnectionChannel> {
        &self.events
    }
}

impl<L: OutputLine + Send + 'static> Drop for LedService<L> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Worker thread body: wait for the LED, run selector and blink task to
/// completion and return the LED for release.
fn run_worker<L: OutputLine + Send>(
    events: &ConnectionChannel,
    shutdown: &ShutdownSignal,
    requested: &RequestedPattern,
    handoff: &LedHandoff<L>,
    interval: Duration,
) -> StatusLed<L> {
    let led = future::block_on(handoff.wait());
    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();

    let selector = executor.spawn(run_selector(events, shutdown, requested));
    let blink = executor.spawn(run_blink(requested, led, interval));

    let ((), (led, exit)) = future::block_on(executor.run(future::zip(selector, blink)));
    if exit == BlinkExit::WriteFailed {
        warn!("LED: blink task ended early after a write failure");
    }
    led
}
