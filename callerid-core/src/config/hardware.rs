//! Hardware configuration types
//!
//! Serial line and ring-detect pin settings.

use heapless::String;

use callerid_hal::{Polarity, UartConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum device path length
pub const MAX_PATH_LEN: usize = 64;

/// Quiet time that ends a ring burst (US cadence is 2 s on, 4 s off)
pub const DEFAULT_RING_HOLD_MS: u32 = 7000;

/// BCM pin wired to the ring indicator on the reference board
pub const DEFAULT_RING_PIN: u8 = 17;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create an active-high pin
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }

    /// Line level that means asserted
    pub fn polarity(&self) -> Polarity {
        if self.inverted {
            Polarity::ActiveLow
        } else {
            Polarity::ActiveHigh
        }
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self::inverted(DEFAULT_RING_PIN)
    }
}

/// Caller-ID modem serial line
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyAMA0`
    pub path: String<MAX_PATH_LEN>,
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl SerialConfig {
    /// UART settings for this line (8N1)
    pub fn uart_config(&self) -> UartConfig {
        UartConfig {
            baudrate: self.baudrate,
            ..UartConfig::default()
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        let mut path = String::new();
        let _ = path.push_str("/dev/ttyAMA0");
        Self {
            path,
            baudrate: UartConfig::default().baudrate,
        }
    }
}

/// Ring indicator input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RingConfig {
    /// Ring-detect pin
    pub pin: PinConfig,
    /// Quiet time after the last ring before the burst is over (ms)
    pub hold_ms: u32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            pin: PinConfig::default(),
            hold_ms: DEFAULT_RING_HOLD_MS,
        }
    }
}
