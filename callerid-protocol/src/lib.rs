//! Bell 202 / MDMF Caller-ID Protocol
//!
//! This crate turns the raw byte stream coming out of a caller-ID modem
//! into structured call records. The modem has already demodulated the FSK
//! carrier; what arrives here is an unframed, possibly noisy serial stream.
//!
//! # Wire Format
//!
//! Every announcement is a channel seizure run followed by one message:
//! ```text
//! ┌──────────────┬──────┬────────┬──────────────────┬──────────┐
//! │ PREAMBLE     │ TYPE │ LENGTH │ PARAMETERS       │ CHECKSUM │
//! │ ≥16 × 0x55   │ 0x80 │ 1B     │ LENGTH bytes     │ 1B       │
//! └──────────────┴──────┴────────┴──────────────────┴──────────┘
//! ```
//!
//! Parameters are tag-length-value:
//! ```text
//! ┌─────┬─────┬──────────────────┐
//! │ TAG │ LEN │ LEN ASCII bytes  │
//! └─────┴─────┴──────────────────┘
//! ```
//!
//! The checksum makes the sum of TYPE, LENGTH, PARAMETERS and CHECKSUM
//! wrap to zero modulo 256.
//!
//! # Pipeline
//!
//! - [`FrameSynchronizer`] locks onto the preamble and reassembles frames
//! - [`mdmf`] walks the parameters of a checksum-valid frame
//! - [`CallerIdDecoder`] chains the two and reports to a [`DecodeObserver`]

#![no_std]
#![deny(unsafe_code)]

pub mod decoder;
pub mod frame;
pub mod mdmf;
pub mod record;
pub mod sync;
pub mod trace;

pub use decoder::CallerIdDecoder;
pub use frame::{
    checksum, checksum_valid, Frame, FrameError, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE, MSG_TYPE_MDMF,
    PREAMBLE_BYTE, PREAMBLE_RUN,
};
pub use mdmf::{DecodeError, Parameter, ParameterType};
pub use record::{CallRecord, Field, ReasonCode, Timestamp};
pub use sync::{FrameSynchronizer, SyncState};
pub use trace::{DecodeObserver, DecodeStats, NoTrace};

#[cfg(feature = "defmt")]
pub use trace::DefmtTrace;
