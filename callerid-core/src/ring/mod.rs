//! Ring detection
//!
//! Turns the ring indicator line into "ringing started" and "ringing
//! stopped" events, one pair per burst of rings.

pub mod monitor;
pub mod watcher;

pub use monitor::{RingEvent, RingMonitor};
pub use watcher::RingWatcher;
