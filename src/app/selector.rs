//! Pattern selector task.
//!
//! Consumes connection-state events in arrival order and publishes the
//! matching pattern. The shutdown signal is the only way out of the loop;
//! on shutdown the register is set to [`BlinkPattern::Exit`] so the blink
//! task terminates on its next poll.

use futures_lite::future;
use log::{debug, info};

use crate::drivers::led_patterns::BlinkPattern;

use super::channels::{ConnectionChannel, RequestedPattern, ShutdownSignal};

enum Wake {
    State(bool),
    Shutdown,
}

/// Run until `shutdown` is raised.
///
/// Neither source has priority: when both are ready, `race` picks one at
/// random, matching plain ready-set semantics.
pub async fn run_selector(
    events: &ConnectionChannel,
    shutdown: &ShutdownSignal,
    requested: &RequestedPattern,
) {
    loop {
        let wake = future::race(
            async { Wake::State(events.receive().await) },
            async {
                shutdown.wait().await;
                Wake::Shutdown
            },
        )
        .await;

        match wake {
            Wake::State(connected) => {
                let pattern = BlinkPattern::for_connection(connected);
                debug!("LED: connected={} -> {:?}", connected, pattern);
                requested.store(pattern);
            }
            Wake::Shutdown => {
                info!("LED: shutdown requested");
                requested.store(BlinkPattern::Exit);
                return;
            }
        }
    }
}
