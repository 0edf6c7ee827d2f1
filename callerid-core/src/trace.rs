//! Decoder tracing for the bridge
//!
//! Always keeps counts; logs through defmt as well when verbose.

use callerid_protocol::mdmf::{DecodeError, Parameter};
use callerid_protocol::{CallRecord, DecodeObserver, DecodeStats, Frame, FrameError};

#[cfg(feature = "defmt")]
type Logger = callerid_protocol::DefmtTrace;
#[cfg(not(feature = "defmt"))]
type Logger = callerid_protocol::NoTrace;

/// Observer selected by `BridgeConfig::verbose`
#[derive(Debug, Clone, Default)]
pub struct BridgeTrace {
    stats: DecodeStats,
    verbose: bool,
}

impl BridgeTrace {
    pub fn new(verbose: bool) -> Self {
        Self {
            stats: DecodeStats::new(),
            verbose,
        }
    }

    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Run `f` against the logger when verbose
    ///
    /// Without the `defmt` feature there is nothing to log to.
    fn log(&self, f: impl FnOnce(&mut Logger)) {
        if self.verbose {
            f(&mut Logger::default());
        }
    }
}

impl DecodeObserver for BridgeTrace {
    fn sync_acquired(&mut self) {
        self.stats.sync_acquired();
        self.log(|t| t.sync_acquired());
    }

    fn sync_lost(&mut self) {
        self.stats.sync_lost();
        self.log(|t| t.sync_lost());
    }

    fn frame_accepted(&mut self, frame: &Frame) {
        self.stats.frame_accepted(frame);
        self.log(|t| t.frame_accepted(frame));
    }

    fn frame_rejected(&mut self, error: FrameError) {
        self.stats.frame_rejected(error);
        self.log(|t| t.frame_rejected(error));
    }

    fn field(&mut self, param: &Parameter<'_>) {
        self.stats.field(param);
        self.log(|t| t.field(param));
    }

    fn decode_failed(&mut self, error: DecodeError) {
        self.stats.decode_failed(error);
        self.log(|t| t.decode_failed(error));
    }

    fn record(&mut self, record: &CallRecord) {
        self.stats.record(record);
        self.log(|t| t.record(record));
    }
}
