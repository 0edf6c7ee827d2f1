//! Raw line capture
//!
//! Wraps the modem receiver and copies every byte read into a sink, so a
//! session can be recorded byte-exact and replayed through the decoder
//! later. Useful when bringing up new line hardware.

use core::fmt;

use callerid_hal::UartRx;
use embedded_io::Write;

/// Capture errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureError<R, W> {
    /// The wrapped receiver failed
    Read(R),
    /// The sink failed
    Write(W),
    /// The sink accepted fewer bytes than were read
    ShortWrite { read: usize, written: usize },
}

impl<R: fmt::Debug, W: fmt::Debug> fmt::Display for CaptureError<R, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Read(e) => write!(f, "read failed: {e:?}"),
            CaptureError::Write(e) => write!(f, "capture write failed: {e:?}"),
            CaptureError::ShortWrite { read, written } => {
                write!(f, "captured {written} of {read} bytes")
            }
        }
    }
}

/// Receiver that tees everything it reads into a sink
#[derive(Debug)]
pub struct CaptureRx<R, W> {
    inner: R,
    sink: W,
    captured: usize,
}

impl<R: UartRx, W: Write> CaptureRx<R, W> {
    pub fn new(inner: R, sink: W) -> Self {
        Self {
            inner,
            sink,
            captured: 0,
        }
    }

    /// Total bytes written to the sink
    pub fn captured(&self) -> usize {
        self.captured
    }

    /// Flush the sink
    pub fn flush(&mut self) -> Result<(), W::Error> {
        self.sink.flush()
    }

    /// Take back the receiver and sink
    pub fn release(self) -> (R, W) {
        (self.inner, self.sink)
    }
}

impl<R: UartRx, W: Write> UartRx for CaptureRx<R, W> {
    type Error = CaptureError<R::Error, W::Error>;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = self.inner.read_blocking(buf).map_err(CaptureError::Read)?;
        if n == 0 {
            return Ok(0);
        }

        let written = self.sink.write(&buf[..n]).map_err(CaptureError::Write)?;
        self.captured += written;
        if written != n {
            return Err(CaptureError::ShortWrite { read: n, written });
        }
        Ok(n)
    }
}
