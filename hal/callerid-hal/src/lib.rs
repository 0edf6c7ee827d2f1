//! Callerid Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the caller-ID bridge is written
//! against. A Raspberry Pi build backs them with a tty and a sysfs GPIO;
//! tests back them with in-memory fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Bridge logic (callerid-core)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  callerid-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  modem tty    │       │  ring-detect  │
//! │  (1200 baud)  │       │  GPIO line    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartRx`] - Serial byte source from the caller-ID modem
//! - [`gpio::InputPin`] - Digital input for the ring indicator

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, Polarity};
pub use uart::{UartConfig, UartRx};
