//! Ring indicator polling

use callerid_hal::{InputPin, Polarity};

use super::monitor::{RingEvent, RingMonitor};
use crate::config::RingConfig;

/// Polls the ring-detect line and tracks ring bursts
///
/// Call [`poll`](Self::poll) at a steady tick; anything from 10 to 100 ms
/// catches every ring.
#[derive(Debug)]
pub struct RingWatcher<P> {
    pin: P,
    polarity: Polarity,
    monitor: RingMonitor,
}

impl<P: InputPin> RingWatcher<P> {
    pub fn new(pin: P, config: &RingConfig) -> Self {
        Self {
            pin,
            polarity: config.pin.polarity(),
            monitor: RingMonitor::new(config.hold_ms),
        }
    }

    /// Check if a ring burst is in progress
    pub fn is_ringing(&self) -> bool {
        self.monitor.is_ringing()
    }

    /// Sample the line once
    ///
    /// `delta_ms` is the time since the previous poll.
    pub fn poll(&mut self, delta_ms: u32) -> Option<RingEvent> {
        if self.polarity.is_asserted(&self.pin) {
            self.monitor.ring_detected()
        } else {
            self.monitor.update_time(delta_ms)
        }
    }

    pub fn release(self) -> P {
        self.pin
    }
}
