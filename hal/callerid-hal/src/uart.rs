//! UART serial communication abstractions
//!
//! The caller-ID modem presents already-demodulated FSK data as a plain
//! asynchronous serial stream. Only the receive side is needed.

/// Bell 202 data rate
pub const BELL_202_BAUDRATE: u32 = 1200;

/// UART receiver
///
/// Blocking trait for receiving data from a UART interface.
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read data from the UART
    ///
    /// Blocks until at least one byte is available, then returns the
    /// number of bytes written into `buf`. A return of `Ok(0)` means the
    /// read timed out with nothing received.
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte from the UART
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut buf = [0u8; 1];
        let n = self.read_blocking(&mut buf)?;
        Ok((n > 0).then_some(buf[0]))
    }
}

impl<T: UartRx + ?Sized> UartRx for &mut T {
    type Error = T::Error;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read_blocking(buf)
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: BELL_202_BAUDRATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
