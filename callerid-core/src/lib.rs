//! Board-agnostic bridge logic for the caller-ID decoder
//!
//! This crate contains everything between the hardware traits and the
//! message bus that does not depend on a specific platform:
//!
//! - Bridge configuration (broker, topics, serial line, ring pin)
//! - The serial listener that decodes and publishes call records
//! - Ring burst detection on the ring indicator line
//! - Notification payload formatting and the publisher seam
//! - Raw line capture for replaying sessions

#![no_std]
#![deny(unsafe_code)]

pub mod capture;
pub mod config;
pub mod listener;
pub mod notify;
pub mod ring;
pub mod trace;
pub mod traits;

pub use capture::{CaptureError, CaptureRx};
pub use config::{BridgeConfig, ConfigError};
pub use listener::{CallerIdListener, ListenerError};
pub use notify::{Notification, NotifyError};
pub use ring::{RingEvent, RingMonitor, RingWatcher};
pub use trace::BridgeTrace;
pub use traits::Publisher;
