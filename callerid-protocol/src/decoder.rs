//! Byte stream to call record decoder
//!
//! Chains the [`FrameSynchronizer`] and the MDMF parameter decoder. Feed it
//! bytes in any chunking; it yields a [`CallRecord`] for every message that
//! passes its checksum and decodes cleanly.

use crate::mdmf;
use crate::record::CallRecord;
use crate::sync::{FrameSynchronizer, SyncState};
use crate::trace::{DecodeObserver, NoTrace};

/// Caller-ID decoder for one byte stream
#[derive(Debug, Clone)]
pub struct CallerIdDecoder<O = NoTrace> {
    sync: FrameSynchronizer,
    observer: O,
}

impl Default for CallerIdDecoder<NoTrace> {
    fn default() -> Self {
        Self::new()
    }
}

impl CallerIdDecoder<NoTrace> {
    /// Create a decoder that reports nothing
    pub fn new() -> Self {
        Self::with_observer(NoTrace)
    }
}

impl<O: DecodeObserver> CallerIdDecoder<O> {
    /// Create a decoder reporting to `observer`
    pub fn with_observer(observer: O) -> Self {
        Self {
            sync: FrameSynchronizer::new(),
            observer,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Current synchronizer state
    pub fn state(&self) -> SyncState {
        self.sync.state()
    }

    /// Drop any partial message
    pub fn reset(&mut self) {
        self.sync.reset();
    }

    /// Feed a single byte
    ///
    /// Returns a record when this byte completed a valid message. Dropped
    /// frames and decode errors go to the observer; the decoder is always
    /// ready for the next byte.
    pub fn feed(&mut self, byte: u8) -> Option<CallRecord> {
        let before = self.sync.state();
        let result = self.sync.feed(byte);

        match (before, self.sync.state()) {
            (SyncState::Idle, SyncState::Sync) => self.observer.sync_acquired(),
            (SyncState::Sync, SyncState::Idle) => self.observer.sync_lost(),
            _ => {}
        }

        let frame = match result {
            Ok(Some(frame)) => frame,
            Ok(None) => return None,
            Err(e) => {
                self.observer.frame_rejected(e);
                return None;
            }
        };

        self.observer.frame_accepted(&frame);
        match mdmf::decode_frame(&frame, &mut self.observer) {
            Ok(record) => {
                self.observer.record(&record);
                Some(record)
            }
            Err(e) => {
                self.observer.decode_failed(e);
                None
            }
        }
    }

    /// Feed a chunk of bytes, handing every completed record to `on_record`
    ///
    /// Returns the number of records produced.
    pub fn feed_bytes<F: FnMut(CallRecord)>(&mut self, bytes: &[u8], mut on_record: F) -> usize {
        let mut count = 0;
        for &byte in bytes {
            if let Some(record) = self.feed(byte) {
                on_record(record);
                count += 1;
            }
        }
        count
    }
}
