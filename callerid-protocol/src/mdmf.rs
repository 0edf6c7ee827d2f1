//! Multiple Data Message Format parameters
//!
//! An MDMF payload is a sequence of tag-length-value parameters:
//! ```text
//! [tag][len][len bytes] [tag][len][len bytes] ...
//! ```
//! Unknown tags are skipped; the format is meant to grow. A parameter whose
//! declared length runs past the end of the payload aborts the message.

use core::fmt;

use heapless::Vec;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::record::{CallRecord, Field, Text};
use crate::trace::{DecodeObserver, NoTrace};

// Parameter tags
pub const TAG_TIME: u8 = 0x01;
pub const TAG_CALLING_NUMBER: u8 = 0x02;
pub const TAG_DIALABLE_NUMBER: u8 = 0x03;
pub const TAG_NUMBER_ABSENT: u8 = 0x04;
pub const TAG_REDIRECTION: u8 = 0x05;
pub const TAG_CALL_QUALIFIER: u8 = 0x06;
pub const TAG_CALLER_NAME: u8 = 0x07;
pub const TAG_NAME_ABSENT: u8 = 0x08;
pub const TAG_MESSAGE_WAITING: u8 = 0x0B;

/// Errors decoding the parameters of a checksum-valid message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// A parameter's length runs past the end of the payload
    FieldOverrun {
        tag: u8,
        declared: u8,
        remaining: usize,
    },
    /// A value does not fit in a record field
    FieldTooLong,
    /// The frame is not an MDMF message
    UnexpectedType(u8),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::FieldOverrun {
                tag,
                declared,
                remaining,
            } => write!(
                f,
                "parameter {tag:#04x} declares {declared} bytes but only {remaining} remain"
            ),
            DecodeError::FieldTooLong => f.write_str("parameter value too long"),
            DecodeError::UnexpectedType(t) => write!(f, "unexpected message type {t:#04x}"),
        }
    }
}

/// Parameter type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParameterType {
    /// Date and time, `mmddHHMM`
    Time,
    /// Calling line number
    CallingNumber,
    /// Reserved for dialable directory number
    DialableNumber,
    /// Reason the number is absent ('O' = blocked)
    NumberAbsent,
    /// Reserved for redirection reason
    Redirection,
    /// Call qualifier
    CallQualifier,
    /// Calling party name
    CallerName,
    /// Reason the name is absent ('P' = private)
    NameAbsent,
    /// Visual message waiting indicator
    MessageWaiting,
    /// Vendor-specific or unassigned tag
    Unknown(u8),
}

impl ParameterType {
    /// Parse a parameter type from its tag byte
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            TAG_TIME => ParameterType::Time,
            TAG_CALLING_NUMBER => ParameterType::CallingNumber,
            TAG_DIALABLE_NUMBER => ParameterType::DialableNumber,
            TAG_NUMBER_ABSENT => ParameterType::NumberAbsent,
            TAG_REDIRECTION => ParameterType::Redirection,
            TAG_CALL_QUALIFIER => ParameterType::CallQualifier,
            TAG_CALLER_NAME => ParameterType::CallerName,
            TAG_NAME_ABSENT => ParameterType::NameAbsent,
            TAG_MESSAGE_WAITING => ParameterType::MessageWaiting,
            other => ParameterType::Unknown(other),
        }
    }

    /// Convert to tag byte
    pub fn to_byte(self) -> u8 {
        match self {
            ParameterType::Time => TAG_TIME,
            ParameterType::CallingNumber => TAG_CALLING_NUMBER,
            ParameterType::DialableNumber => TAG_DIALABLE_NUMBER,
            ParameterType::NumberAbsent => TAG_NUMBER_ABSENT,
            ParameterType::Redirection => TAG_REDIRECTION,
            ParameterType::CallQualifier => TAG_CALL_QUALIFIER,
            ParameterType::CallerName => TAG_CALLER_NAME,
            ParameterType::NameAbsent => TAG_NAME_ABSENT,
            ParameterType::MessageWaiting => TAG_MESSAGE_WAITING,
            ParameterType::Unknown(tag) => tag,
        }
    }

    /// Returns true if this parameter populates a call record field
    pub fn is_record_field(&self) -> bool {
        matches!(
            self,
            ParameterType::Time
                | ParameterType::CallingNumber
                | ParameterType::NumberAbsent
                | ParameterType::CallerName
                | ParameterType::NameAbsent
        )
    }
}

/// One tag-length-value parameter, borrowed from the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Parameter<'a> {
    pub kind: ParameterType,
    pub value: &'a [u8],
}

/// Iterator over the parameters of a payload
///
/// Stops when fewer than three bytes remain (no room for a tag, a length
/// and a value) or after yielding the first error.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    remaining: &'a [u8],
    failed: bool,
}

/// Iterate the parameters of an MDMF payload
pub fn fields(payload: &[u8]) -> Fields<'_> {
    Fields {
        remaining: payload,
        failed: false,
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = Result<Parameter<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.len() <= 2 {
            return None;
        }

        let tag = self.remaining[0];
        let declared = self.remaining[1];
        let rest = &self.remaining[2..];

        if usize::from(declared) > rest.len() {
            self.failed = true;
            return Some(Err(DecodeError::FieldOverrun {
                tag,
                declared,
                remaining: rest.len(),
            }));
        }

        let (value, tail) = rest.split_at(usize::from(declared));
        self.remaining = tail;
        Some(Ok(Parameter {
            kind: ParameterType::from_byte(tag),
            value,
        }))
    }
}

/// Copy a parameter value into field text
///
/// Values are ASCII on the wire; anything else is replaced with '?'.
fn to_text(value: &[u8]) -> Result<Text, DecodeError> {
    let mut text = Text::new();
    for &b in value {
        let c = if b.is_ascii() { char::from(b) } else { '?' };
        text.push(c).map_err(|_| DecodeError::FieldTooLong)?;
    }
    Ok(text)
}

/// Apply one parameter to a record
///
/// Parameters that do not carry a record field are accepted and ignored.
fn apply(record: &mut CallRecord, param: &Parameter<'_>) -> Result<(), DecodeError> {
    match param.kind {
        ParameterType::Time => record.time = Field::Value(to_text(param.value)?),
        ParameterType::CallingNumber => record.number = Field::Value(to_text(param.value)?),
        ParameterType::NumberAbsent => record.number = Field::Withheld(to_text(param.value)?),
        ParameterType::CallerName => record.name = Field::Value(to_text(param.value)?),
        ParameterType::NameAbsent => record.name = Field::Withheld(to_text(param.value)?),
        ParameterType::DialableNumber
        | ParameterType::Redirection
        | ParameterType::CallQualifier
        | ParameterType::MessageWaiting
        | ParameterType::Unknown(_) => {}
    }
    Ok(())
}

/// Decode an MDMF payload into a call record
///
/// `payload` is the parameter bytes only: type, length and checksum
/// already stripped.
pub fn decode(payload: &[u8]) -> Result<CallRecord, DecodeError> {
    decode_observed(payload, &mut NoTrace)
}

/// Decode an MDMF payload, reporting each parameter to `observer`
pub fn decode_observed<O: DecodeObserver + ?Sized>(
    payload: &[u8],
    observer: &mut O,
) -> Result<CallRecord, DecodeError> {
    let mut record = CallRecord::new();
    for param in fields(payload) {
        let param = param?;
        observer.field(&param);
        apply(&mut record, &param)?;
    }
    Ok(record)
}

/// Decode a checksum-valid frame
pub fn decode_frame<O: DecodeObserver + ?Sized>(
    frame: &Frame,
    observer: &mut O,
) -> Result<CallRecord, DecodeError> {
    if !frame.is_mdmf() {
        return Err(DecodeError::UnexpectedType(frame.msg_type));
    }
    decode_observed(&frame.payload, observer)
}

/// Append one parameter to a payload under construction
pub fn encode_parameter(
    payload: &mut Vec<u8, MAX_PAYLOAD_SIZE>,
    kind: ParameterType,
    value: &[u8],
) -> Result<(), FrameError> {
    let len = u8::try_from(value.len()).map_err(|_| FrameError::PayloadTooLarge)?;
    payload
        .push(kind.to_byte())
        .map_err(|_| FrameError::PayloadTooLarge)?;
    payload.push(len).map_err(|_| FrameError::PayloadTooLarge)?;
    payload
        .extend_from_slice(value)
        .map_err(|_| FrameError::PayloadTooLarge)
}
