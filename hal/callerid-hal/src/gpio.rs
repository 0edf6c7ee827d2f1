//! GPIO pin abstractions
//!
//! The ring indicator is a single digital input driven by the line
//! interface. Most opto-isolated ring detectors pull the line low while
//! ringing.

/// Digital input pin
///
/// Implementations should handle reading the actual line level for the
/// specific platform.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}

/// Which line level means "asserted"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Asserted when the line is low
    #[default]
    ActiveLow,
    /// Asserted when the line is high
    ActiveHigh,
}

impl Polarity {
    /// Check whether `pin` is currently asserted under this polarity
    pub fn is_asserted<P: InputPin + ?Sized>(self, pin: &P) -> bool {
        match self {
            Polarity::ActiveLow => pin.is_low(),
            Polarity::ActiveHigh => pin.is_high(),
        }
    }
}
