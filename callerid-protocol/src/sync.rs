//! Frame synchronizer
//!
//! Finds message boundaries in a continuous serial stream with no external
//! framing. The line idles in the marker state and the modem turns the
//! channel seizure signal into a long run of 0x55 bytes, so a message is
//! only trusted after a run of [`PREAMBLE_RUN`] of them.

use heapless::Vec;

use crate::frame::{
    checksum_valid, Frame, FrameError, MAX_FRAME_SIZE, MSG_TYPE_MDMF, PREAMBLE_BYTE,
    PREAMBLE_RUN, SYNC_HOLD,
};

/// Synchronizer states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncState {
    /// Counting consecutive preamble bytes
    Idle,
    /// Preamble seen, waiting for the message type
    Sync,
    /// Got TYPE, waiting for LENGTH
    ReadingLength,
    /// Reading parameter bytes
    ReadingData,
    /// Waiting for CHECKSUM
    ReadingChecksum,
}

/// State machine reassembling caller-ID frames from a byte stream
///
/// One instance per byte stream. Instances share nothing, so independent
/// phone lines get independent synchronizers.
#[derive(Debug, Clone)]
pub struct FrameSynchronizer {
    state: SyncState,
    /// TYPE, LENGTH, parameters and CHECKSUM as received
    buffer: Vec<u8, MAX_FRAME_SIZE>,
    /// Consecutive preamble bytes seen while idle
    preamble_run: usize,
    /// Non-type bytes still tolerated while in sync
    hold_remaining: usize,
    /// Parameter bytes still to read
    data_remaining: usize,
}

impl Default for FrameSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSynchronizer {
    /// Create a new synchronizer in the idle state
    pub fn new() -> Self {
        Self {
            state: SyncState::Idle,
            buffer: Vec::new(),
            preamble_run: 0,
            hold_remaining: 0,
            data_remaining: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Drop any partial message and return to idle
    pub fn reset(&mut self) {
        self.state = SyncState::Idle;
        self.buffer.clear();
        self.preamble_run = 0;
        self.hold_remaining = 0;
        self.data_remaining = 0;
    }

    /// Feed a single byte to the synchronizer
    ///
    /// Returns `Ok(Some(frame))` when a complete frame with a valid checksum
    /// has been reassembled, `Ok(None)` when more bytes are needed, or `Err`
    /// when a message was abandoned. Every error leaves the synchronizer
    /// idle and ready for the next preamble.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            SyncState::Idle => {
                if byte == PREAMBLE_BYTE {
                    self.preamble_run += 1;
                    if self.preamble_run >= PREAMBLE_RUN {
                        self.preamble_run = 0;
                        self.hold_remaining = SYNC_HOLD;
                        self.state = SyncState::Sync;
                    }
                } else {
                    self.preamble_run = 0;
                }
                Ok(None)
            }
            SyncState::Sync => {
                if byte == MSG_TYPE_MDMF {
                    self.buffer.clear();
                    self.push(byte)?;
                    self.state = SyncState::ReadingLength;
                } else {
                    self.hold_remaining = self.hold_remaining.saturating_sub(1);
                    if self.hold_remaining == 0 {
                        // False preamble; start looking again
                        self.reset();
                    }
                }
                Ok(None)
            }
            SyncState::ReadingLength => {
                if byte == 0 {
                    self.reset();
                    return Err(FrameError::ZeroLength);
                }
                self.push(byte)?;
                self.data_remaining = usize::from(byte);
                self.state = SyncState::ReadingData;
                Ok(None)
            }
            SyncState::ReadingData => {
                self.push(byte)?;
                self.data_remaining -= 1;
                if self.data_remaining == 0 {
                    self.state = SyncState::ReadingChecksum;
                }
                Ok(None)
            }
            SyncState::ReadingChecksum => {
                self.push(byte)?;

                if !checksum_valid(&self.buffer) {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }

                let end = self.buffer.len() - 1;
                let frame = Frame::new(self.buffer[0], &self.buffer[2..end]);
                self.reset();
                frame.map(Some)
            }
        }
    }

    /// Append to the reassembly buffer, abandoning the message if full
    fn push(&mut self, byte: u8) -> Result<(), FrameError> {
        if self.buffer.push(byte).is_err() {
            self.reset();
            return Err(FrameError::PayloadTooLarge);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::checksum;

    fn feed_all(sync: &mut FrameSynchronizer, bytes: &[u8]) -> Option<Result<Frame, FrameError>> {
        let mut last = None;
        for &b in bytes {
            match sync.feed(b) {
                Ok(None) => {}
                Ok(Some(frame)) => last = Some(Ok(frame)),
                Err(e) => last = Some(Err(e)),
            }
        }
        last
    }

    fn preamble(sync: &mut FrameSynchronizer) {
        for _ in 0..PREAMBLE_RUN {
            assert_eq!(sync.feed(PREAMBLE_BYTE), Ok(None));
        }
    }

    #[test]
    fn test_preamble_locks_after_run() {
        let mut sync = FrameSynchronizer::new();
        for _ in 0..PREAMBLE_RUN - 1 {
            sync.feed(PREAMBLE_BYTE).unwrap();
        }
        assert_eq!(sync.state(), SyncState::Idle);
        sync.feed(PREAMBLE_BYTE).unwrap();
        assert_eq!(sync.state(), SyncState::Sync);
    }

    #[test]
    fn test_broken_preamble_restarts_count() {
        let mut sync = FrameSynchronizer::new();
        for _ in 0..PREAMBLE_RUN - 1 {
            sync.feed(PREAMBLE_BYTE).unwrap();
        }
        sync.feed(0x00).unwrap();
        for _ in 0..PREAMBLE_RUN - 1 {
            sync.feed(PREAMBLE_BYTE).unwrap();
        }
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn test_sync_hold_expires() {
        let mut sync = FrameSynchronizer::new();
        preamble(&mut sync);
        for _ in 0..SYNC_HOLD - 1 {
            sync.feed(0xFF).unwrap();
            assert_eq!(sync.state(), SyncState::Sync);
        }
        sync.feed(0xFF).unwrap();
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn test_extra_preamble_within_hold() {
        // Real lines send ~30 bytes of seizure; the tail eats into the hold budget
        let mut sync = FrameSynchronizer::new();
        for _ in 0..PREAMBLE_RUN + SYNC_HOLD - 1 {
            sync.feed(PREAMBLE_BYTE).unwrap();
        }
        assert_eq!(sync.state(), SyncState::Sync);
        sync.feed(MSG_TYPE_MDMF).unwrap();
        assert_eq!(sync.state(), SyncState::ReadingLength);
    }

    #[test]
    fn test_reassembles_frame() {
        let frame = Frame::mdmf(&[0x07, 0x03, b'B', b'o', b'b']).unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        let mut sync = FrameSynchronizer::new();
        preamble(&mut sync);
        let parsed = feed_all(&mut sync, &encoded).unwrap().unwrap();

        assert_eq!(parsed, frame);
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn test_state_progression() {
        let mut sync = FrameSynchronizer::new();
        preamble(&mut sync);

        sync.feed(MSG_TYPE_MDMF).unwrap();
        assert_eq!(sync.state(), SyncState::ReadingLength);
        sync.feed(2).unwrap();
        assert_eq!(sync.state(), SyncState::ReadingData);
        sync.feed(0x0B).unwrap();
        assert_eq!(sync.state(), SyncState::ReadingData);
        sync.feed(0x00).unwrap();
        assert_eq!(sync.state(), SyncState::ReadingChecksum);

        let csum = checksum(&[MSG_TYPE_MDMF, 2, 0x0B, 0x00]);
        let frame = sync.feed(csum).unwrap().unwrap();
        assert_eq!(frame.payload.as_slice(), &[0x0B, 0x00]);
    }

    #[test]
    fn test_zero_length_abandons() {
        let mut sync = FrameSynchronizer::new();
        preamble(&mut sync);
        sync.feed(MSG_TYPE_MDMF).unwrap();
        assert_eq!(sync.feed(0), Err(FrameError::ZeroLength));
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn test_invalid_checksum() {
        let frame = Frame::mdmf(&[0x02, 0x01, b'5']).unwrap();
        let mut encoded = frame.encode_to_vec().unwrap();
        // Corrupt the checksum
        let last_idx = encoded.len() - 1;
        encoded[last_idx] ^= 0xFF;

        let mut sync = FrameSynchronizer::new();
        preamble(&mut sync);
        let result = feed_all(&mut sync, &encoded).unwrap();
        assert_eq!(result, Err(FrameError::InvalidChecksum));
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn test_non_mdmf_type_ignored() {
        // SDMF (0x04) is not recognized as a message start
        let mut sync = FrameSynchronizer::new();
        preamble(&mut sync);
        sync.feed(0x04).unwrap();
        assert_eq!(sync.state(), SyncState::Sync);
    }

    #[test]
    fn test_preamble_inside_payload_is_data() {
        let payload = [PREAMBLE_BYTE; 20];
        let frame = Frame::mdmf(&payload).unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        let mut sync = FrameSynchronizer::new();
        preamble(&mut sync);
        let parsed = feed_all(&mut sync, &encoded).unwrap().unwrap();
        assert_eq!(parsed.payload.as_slice(), &payload);
    }

    #[test]
    fn test_resync_after_garbage() {
        let frame = Frame::mdmf(&[0x0B, 0x01, 0x00]).unwrap();
        let mut line = [0u8; 64];
        line[..4].copy_from_slice(&[0x00, 0xFF, 0x12, 0x80]);
        let len = frame.encode_with_preamble(&mut line[4..]).unwrap();

        let mut sync = FrameSynchronizer::new();
        let parsed = feed_all(&mut sync, &line[..4 + len]).unwrap().unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn test_reset_drops_partial_message() {
        let mut sync = FrameSynchronizer::new();
        preamble(&mut sync);
        sync.feed(MSG_TYPE_MDMF).unwrap();
        sync.feed(10).unwrap();
        sync.reset();
        assert_eq!(sync.state(), SyncState::Idle);
    }
}
