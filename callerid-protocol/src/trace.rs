//! Decode observers
//!
//! The decoder reports what it sees through [`DecodeObserver`] instead of
//! printing. Nothing an observer does can change a decoding outcome.

use crate::frame::{Frame, FrameError};
use crate::mdmf::{DecodeError, Parameter};
use crate::record::CallRecord;

/// Receives decoding progress
///
/// Every method has an empty default so observers only implement what
/// they care about.
pub trait DecodeObserver {
    /// Preamble run completed, listening for a message type
    fn sync_acquired(&mut self) {}

    /// No message type arrived within the hold budget
    fn sync_lost(&mut self) {}

    /// A frame passed its checksum
    fn frame_accepted(&mut self, _frame: &Frame) {}

    /// A partial or corrupt frame was dropped
    fn frame_rejected(&mut self, _error: FrameError) {}

    /// A parameter was recognized in an accepted frame
    fn field(&mut self, _param: &Parameter<'_>) {}

    /// An accepted frame's parameters could not be decoded
    fn decode_failed(&mut self, _error: DecodeError) {}

    /// A call record was produced
    fn record(&mut self, _record: &CallRecord) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl DecodeObserver for NoTrace {}

impl<O: DecodeObserver + ?Sized> DecodeObserver for &mut O {
    fn sync_acquired(&mut self) {
        (**self).sync_acquired()
    }

    fn sync_lost(&mut self) {
        (**self).sync_lost()
    }

    fn frame_accepted(&mut self, frame: &Frame) {
        (**self).frame_accepted(frame)
    }

    fn frame_rejected(&mut self, error: FrameError) {
        (**self).frame_rejected(error)
    }

    fn field(&mut self, param: &Parameter<'_>) {
        (**self).field(param)
    }

    fn decode_failed(&mut self, error: DecodeError) {
        (**self).decode_failed(error)
    }

    fn record(&mut self, record: &CallRecord) {
        (**self).record(record)
    }
}

/// Both observers see every event, first `A` then `B`
impl<A: DecodeObserver, B: DecodeObserver> DecodeObserver for (A, B) {
    fn sync_acquired(&mut self) {
        self.0.sync_acquired();
        self.1.sync_acquired();
    }

    fn sync_lost(&mut self) {
        self.0.sync_lost();
        self.1.sync_lost();
    }

    fn frame_accepted(&mut self, frame: &Frame) {
        self.0.frame_accepted(frame);
        self.1.frame_accepted(frame);
    }

    fn frame_rejected(&mut self, error: FrameError) {
        self.0.frame_rejected(error);
        self.1.frame_rejected(error);
    }

    fn field(&mut self, param: &Parameter<'_>) {
        self.0.field(param);
        self.1.field(param);
    }

    fn decode_failed(&mut self, error: DecodeError) {
        self.0.decode_failed(error);
        self.1.decode_failed(error);
    }

    fn record(&mut self, record: &CallRecord) {
        self.0.record(record);
        self.1.record(record);
    }
}

/// Running counts of decoder outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodeStats {
    pub sync_acquired: u32,
    pub sync_lost: u32,
    pub frames_accepted: u32,
    pub checksum_failures: u32,
    pub zero_length: u32,
    /// Frames dropped for any other framing reason
    pub frames_dropped: u32,
    pub decode_errors: u32,
    pub unknown_fields: u32,
    pub records: u32,
}

impl DecodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames that never produced a record
    pub fn rejected(&self) -> u32 {
        self.checksum_failures + self.zero_length + self.frames_dropped + self.decode_errors
    }
}

impl DecodeObserver for DecodeStats {
    fn sync_acquired(&mut self) {
        self.sync_acquired = self.sync_acquired.saturating_add(1);
    }

    fn sync_lost(&mut self) {
        self.sync_lost = self.sync_lost.saturating_add(1);
    }

    fn frame_accepted(&mut self, _frame: &Frame) {
        self.frames_accepted = self.frames_accepted.saturating_add(1);
    }

    fn frame_rejected(&mut self, error: FrameError) {
        let counter = match error {
            FrameError::InvalidChecksum => &mut self.checksum_failures,
            FrameError::ZeroLength => &mut self.zero_length,
            _ => &mut self.frames_dropped,
        };
        *counter = counter.saturating_add(1);
    }

    fn field(&mut self, param: &Parameter<'_>) {
        if matches!(param.kind, crate::mdmf::ParameterType::Unknown(_)) {
            self.unknown_fields = self.unknown_fields.saturating_add(1);
        }
    }

    fn decode_failed(&mut self, _error: DecodeError) {
        self.decode_errors = self.decode_errors.saturating_add(1);
    }

    fn record(&mut self, _record: &CallRecord) {
        self.records = self.records.saturating_add(1);
    }
}

/// Observer that logs through defmt
///
/// Recognized fields and sync transitions at debug level, dropped frames
/// and decode errors at warn.
#[cfg(feature = "defmt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtTrace;

#[cfg(feature = "defmt")]
impl DecodeObserver for DefmtTrace {
    fn sync_acquired(&mut self) {
        defmt::trace!("preamble locked");
    }

    fn sync_lost(&mut self) {
        defmt::trace!("no message type after preamble, back to idle");
    }

    fn frame_rejected(&mut self, error: FrameError) {
        defmt::warn!("frame dropped: {}", error);
    }

    fn field(&mut self, param: &Parameter<'_>) {
        use crate::mdmf::ParameterType;

        match param.kind {
            ParameterType::Time => defmt::debug!("Time: {=[u8]:a}", param.value),
            ParameterType::CallingNumber => defmt::debug!("Number: {=[u8]:a}", param.value),
            ParameterType::NumberAbsent if param.value == b"O" => {
                defmt::debug!("Number blocked")
            }
            ParameterType::NumberAbsent => defmt::debug!("Number reason: {=[u8]:a}", param.value),
            ParameterType::CallerName => defmt::debug!("Name: {=[u8]:a}", param.value),
            ParameterType::NameAbsent => defmt::debug!("Name reason: {=[u8]:a}", param.value),
            ParameterType::MessageWaiting => defmt::debug!("Message waiting"),
            ParameterType::Unknown(tag) => defmt::debug!("unrecognized parameter {=u8:#x}", tag),
            other => defmt::debug!("reserved parameter {}", other),
        }
    }

    fn decode_failed(&mut self, error: DecodeError) {
        defmt::warn!("decode failed: {}", error);
    }

    fn record(&mut self, record: &CallRecord) {
        defmt::info!(
            "call: name={=str} time={=str} number={=str}",
            record.name.as_str(),
            record.time.as_str(),
            record.number.as_str()
        );
    }
}
