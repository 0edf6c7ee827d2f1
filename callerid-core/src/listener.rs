//! Serial caller-ID listener
//!
//! Reads the modem line, feeds the decoder and publishes each call record.
//! A read error is fatal for the listener: the modem is gone and the caller
//! decides whether to reopen it. Publish errors are counted and skipped.

use core::fmt;

use callerid_hal::UartRx;
use callerid_protocol::{CallerIdDecoder, DecodeObserver, NoTrace, SyncState};

use crate::config::TopicConfig;
use crate::notify::{self, Notification};
use crate::traits::Publisher;

/// Buffer size for UART receive
pub const RX_BUF_SIZE: usize = 128;

/// Fatal listener errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ListenerError<E> {
    /// The byte source failed
    Read(E),
}

impl<E: fmt::Debug> fmt::Display for ListenerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerError::Read(e) => write!(f, "serial read failed: {e:?}"),
        }
    }
}

/// Drives one caller-ID line
pub struct CallerIdListener<R, P, O = NoTrace> {
    rx: R,
    publisher: P,
    decoder: CallerIdDecoder<O>,
    topics: TopicConfig,
    published: u32,
    publish_failures: u32,
}

impl<R: UartRx, P: Publisher> CallerIdListener<R, P, NoTrace> {
    pub fn new(rx: R, publisher: P, topics: TopicConfig) -> Self {
        Self::with_observer(rx, publisher, topics, NoTrace)
    }
}

impl<R: UartRx, P: Publisher, O: DecodeObserver> CallerIdListener<R, P, O> {
    /// Create a listener whose decoder reports to `observer`
    pub fn with_observer(rx: R, publisher: P, topics: TopicConfig, observer: O) -> Self {
        Self {
            rx,
            publisher,
            decoder: CallerIdDecoder::with_observer(observer),
            topics,
            published: 0,
            publish_failures: 0,
        }
    }

    /// Read once from the line and process what arrived
    ///
    /// Returns the number of call records published.
    pub fn poll(&mut self) -> Result<usize, ListenerError<R::Error>> {
        let mut buf = [0u8; RX_BUF_SIZE];
        let n = self
            .rx
            .read_blocking(&mut buf)
            .map_err(ListenerError::Read)?;

        let mut count = 0;
        for &byte in &buf[..n.min(RX_BUF_SIZE)] {
            let Some(record) = self.decoder.feed(byte) else {
                continue;
            };
            match notify::publish(
                &mut self.publisher,
                &self.topics,
                Notification::CallerId(&record),
            ) {
                Ok(()) => {
                    self.published = self.published.saturating_add(1);
                    count += 1;
                }
                Err(_) => {
                    self.publish_failures = self.publish_failures.saturating_add(1);
                }
            }
        }
        Ok(count)
    }

    /// Process the line until the byte source fails
    pub fn run(&mut self) -> ListenerError<R::Error> {
        loop {
            if let Err(e) = self.poll() {
                return e;
            }
        }
    }

    /// Records successfully handed to the publisher
    pub fn published(&self) -> u32 {
        self.published
    }

    /// Records the publisher refused
    pub fn publish_failures(&self) -> u32 {
        self.publish_failures
    }

    pub fn state(&self) -> SyncState {
        self.decoder.state()
    }

    pub fn observer(&self) -> &O {
        self.decoder.observer()
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Take back the byte source and publisher
    pub fn release(self) -> (R, P) {
        (self.rx, self.publisher)
    }
}
