//! Message bus publisher trait

/// Destination for bridge notifications
///
/// The bridge hands each notification over once. Delivery is best-effort:
/// retries, reconnects and queueing belong to the implementation, and a
/// returned error is counted by the caller, never retried.
pub trait Publisher {
    /// Error type for publish operations
    type Error;

    /// Publish `payload` on `topic`
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Self::Error>;
}

impl<P: Publisher + ?Sized> Publisher for &mut P {
    type Error = P::Error;

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Self::Error> {
        (**self).publish(topic, payload)
    }
}
