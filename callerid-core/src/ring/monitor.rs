//! Ring burst tracking
//!
//! A North American ring cadence is 2 s on, 4 s off, and the indicator
//! chatters while the ring voltage is present. A burst starts with the
//! first ring seen and ends once the line has been quiet for the hold time.

use crate::config::DEFAULT_RING_HOLD_MS;

/// Ring burst transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RingEvent {
    /// First ring of a burst
    Started,
    /// No ring for the hold time
    Stopped,
}

/// Ring burst tracker
///
/// Time is supplied by the caller as deltas, so the monitor has no clock
/// of its own and can be driven from any tick source.
#[derive(Debug, Clone)]
pub struct RingMonitor {
    /// Currently inside a ring burst
    ringing: bool,
    /// Quiet time that ends a burst (ms)
    hold_ms: u32,
    /// Time since the last ring (ms)
    quiet_ms: u32,
}

impl Default for RingMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_RING_HOLD_MS)
    }
}

impl RingMonitor {
    /// Create a monitor that ends a burst after `hold_ms` of quiet
    pub fn new(hold_ms: u32) -> Self {
        Self {
            ringing: false,
            hold_ms,
            quiet_ms: 0,
        }
    }

    /// Check if a ring burst is in progress
    pub fn is_ringing(&self) -> bool {
        self.ringing
    }

    /// Record ring activity on the line
    ///
    /// Returns `Started` only for the first ring of a burst. Every call
    /// restarts the quiet timer.
    pub fn ring_detected(&mut self) -> Option<RingEvent> {
        self.quiet_ms = 0;
        if self.ringing {
            return None;
        }
        self.ringing = true;
        Some(RingEvent::Started)
    }

    /// Update time tracking
    ///
    /// # Arguments
    /// - `delta_ms`: Time elapsed since last update
    ///
    /// Returns `Stopped` once when the quiet time reaches the hold time.
    pub fn update_time(&mut self, delta_ms: u32) -> Option<RingEvent> {
        if !self.ringing {
            return None;
        }

        self.quiet_ms = self.quiet_ms.saturating_add(delta_ms);
        if self.quiet_ms >= self.hold_ms {
            self.ringing = false;
            self.quiet_ms = 0;
            return Some(RingEvent::Stopped);
        }
        None
    }
}
