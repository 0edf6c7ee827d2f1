//! Notifications published by the bridge
//!
//! Payloads are the plain-text formats Home Assistant automations already
//! match on:
//! - caller ID: `name:<name>, time:<mmddHHMM>, number:<number>`
//! - ringing: `Yes` / `No`

use core::fmt::{self, Write};

use heapless::String;

use callerid_protocol::CallRecord;

use crate::config::TopicConfig;
use crate::ring::RingEvent;
use crate::traits::Publisher;

/// Longest payload the bridge produces
pub const MAX_NOTIFICATION_LEN: usize = 800;

/// Errors publishing a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotifyError<E> {
    /// Payload did not fit the formatting buffer
    PayloadTooLong,
    /// Publisher refused the message
    Publish(E),
}

impl<E: fmt::Debug> fmt::Display for NotifyError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::PayloadTooLong => f.write_str("notification payload too long"),
            NotifyError::Publish(e) => write!(f, "publish failed: {e:?}"),
        }
    }
}

/// Something worth telling the message bus about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification<'a> {
    /// A decoded caller-ID announcement
    CallerId(&'a CallRecord),
    /// Ring burst started (`true`) or ended (`false`)
    Ringing(bool),
}

impl From<RingEvent> for Notification<'_> {
    fn from(event: RingEvent) -> Self {
        Notification::Ringing(matches!(event, RingEvent::Started))
    }
}

impl<'a> Notification<'a> {
    /// Topic this notification goes to
    pub fn topic<'t>(&self, topics: &'t TopicConfig) -> &'t str {
        match self {
            Notification::CallerId(_) => topics.callerid.as_str(),
            Notification::Ringing(_) => topics.ringing.as_str(),
        }
    }

    /// Render the payload text
    pub fn payload(&self) -> Result<String<MAX_NOTIFICATION_LEN>, fmt::Error> {
        let mut out = String::new();
        match self {
            Notification::CallerId(record) => write!(out, "{}", record)?,
            Notification::Ringing(true) => out.push_str("Yes").map_err(|_| fmt::Error)?,
            Notification::Ringing(false) => out.push_str("No").map_err(|_| fmt::Error)?,
        }
        Ok(out)
    }
}

/// Format and publish one notification
pub fn publish<P: Publisher + ?Sized>(
    publisher: &mut P,
    topics: &TopicConfig,
    notification: Notification<'_>,
) -> Result<(), NotifyError<P::Error>> {
    let payload = notification
        .payload()
        .map_err(|_| NotifyError::PayloadTooLong)?;
    publisher
        .publish(notification.topic(topics), payload.as_bytes())
        .map_err(NotifyError::Publish)
}
