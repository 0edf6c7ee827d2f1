//! Decoded call records

use core::fmt;

use heapless::String;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::mdmf::{self, ParameterType};

/// Longest value a single parameter can carry
pub const MAX_TEXT_LEN: usize = MAX_PAYLOAD_SIZE - 2;

/// Field text
pub type Text = String<MAX_TEXT_LEN>;

/// Why a number or name was not delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReasonCode {
    /// 'O': caller blocked delivery
    Blocked,
    /// 'P': caller marked private
    Private,
    /// Provider-defined code
    Other(char),
}

impl ReasonCode {
    /// Interpret the text of an absence parameter
    pub fn from_text(text: &str) -> Option<Self> {
        match text.chars().next()? {
            'O' => Some(ReasonCode::Blocked),
            'P' => Some(ReasonCode::Private),
            c => Some(ReasonCode::Other(c)),
        }
    }
}

/// One field of a call record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// No parameter for this field was received
    #[default]
    Absent,
    /// The delivered number, name or time
    Value(Text),
    /// A reason code sent in place of the value
    Withheld(Text),
}

impl Field {
    /// Text of the field, empty if absent
    pub fn as_str(&self) -> &str {
        match self {
            Field::Absent => "",
            Field::Value(text) | Field::Withheld(text) => text.as_str(),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// The delivered value, if there is one
    pub fn value(&self) -> Option<&str> {
        match self {
            Field::Value(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// The reason code, if the value was withheld
    pub fn reason(&self) -> Option<ReasonCode> {
        match self {
            Field::Withheld(text) => ReasonCode::from_text(text),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local time of the call as sent by the central office
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl Timestamp {
    /// Parse `mmddHHMM`
    pub fn parse(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != 8 || !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let pair = |i: usize| (bytes[i] - b'0') * 10 + (bytes[i + 1] - b'0');

        let ts = Self {
            month: pair(0),
            day: pair(2),
            hour: pair(4),
            minute: pair(6),
        };
        let valid = (1..=12).contains(&ts.month)
            && (1..=31).contains(&ts.day)
            && ts.hour < 24
            && ts.minute < 60;
        valid.then_some(ts)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02} {:02}:{:02}",
            self.month, self.day, self.hour, self.minute
        )
    }
}

/// Caller name, number and time decoded from one MDMF message
///
/// Displays as the bridge payload, `name:<name>, time:<time>, number:<number>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CallRecord {
    pub name: Field,
    pub number: Field,
    pub time: Field,
}

impl CallRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed call time, if present and well formed
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.time.value().and_then(Timestamp::parse)
    }

    /// Check whether no parameter populated this record
    pub fn is_empty(&self) -> bool {
        self.name.is_absent() && self.number.is_absent() && self.time.is_absent()
    }

    /// Encode this record as an MDMF frame (for testing or simulation)
    ///
    /// Fields are emitted in the order a central office sends them: time,
    /// number, name. Absent fields are left out.
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let mut payload = heapless::Vec::<u8, MAX_PAYLOAD_SIZE>::new();

        if let Field::Value(t) | Field::Withheld(t) = &self.time {
            mdmf::encode_parameter(&mut payload, ParameterType::Time, t.as_bytes())?;
        }
        match &self.number {
            Field::Absent => {}
            Field::Value(n) => {
                mdmf::encode_parameter(&mut payload, ParameterType::CallingNumber, n.as_bytes())?
            }
            Field::Withheld(r) => {
                mdmf::encode_parameter(&mut payload, ParameterType::NumberAbsent, r.as_bytes())?
            }
        }
        match &self.name {
            Field::Absent => {}
            Field::Value(n) => {
                mdmf::encode_parameter(&mut payload, ParameterType::CallerName, n.as_bytes())?
            }
            Field::Withheld(r) => {
                mdmf::encode_parameter(&mut payload, ParameterType::NameAbsent, r.as_bytes())?
            }
        }

        Frame::mdmf(&payload)
    }
}

impl fmt::Display for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name:{}, time:{}, number:{}",
            self.name, self.time, self.number
        )
    }
}
